//! Process-wide identifiers
//!
//! Elements and observers are identified by opaque `u64` values drawn from a
//! single monotonically increasing counter, so an id is never reused within
//! a process.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_raw() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Identity of an element inside a host container's display tree
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// Allocate a fresh element id
    pub fn next() -> Self {
        Self(next_raw())
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Identity of a signal observer (see [`crate::events::SignalHub`])
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverTag(u64);

impl ObserverTag {
    /// Allocate a fresh observer tag
    pub fn next() -> Self {
        Self(next_raw())
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = ElementId::next();
        let b = ElementId::next();
        let c = ObserverTag::next();
        assert_ne!(a, b);
        assert!(b.raw() < c.raw());
    }
}
