//! Scroll signal subscription
//!
//! One [`ScrollObserver`] per infinite scroll instance. It holds the
//! subscriptions that route the host's signals to the state machine, and
//! drops every queued delivery when it detaches.

use endless_core::{ObserverTag, ScrollSignal, SignalHub, SignalKind, SubscriptionId};
use smallvec::SmallVec;

/// Signals infinite scroll listens for
pub const OBSERVED_SIGNALS: [SignalKind; 4] = [
    SignalKind::ContentSize,
    SignalKind::ContentOffset,
    SignalKind::DragEnded,
    SignalKind::ScrollSettled,
];

pub struct ScrollObserver {
    tag: ObserverTag,
    subscriptions: SmallVec<[SubscriptionId; 4]>,
}

impl ScrollObserver {
    pub fn new() -> Self {
        Self {
            tag: ObserverTag::next(),
            subscriptions: SmallVec::new(),
        }
    }

    pub fn tag(&self) -> ObserverTag {
        self.tag
    }

    pub fn is_attached(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Subscribe to every observed signal; does nothing if already attached
    pub fn attach(&mut self, hub: &mut SignalHub) {
        if self.is_attached() {
            return;
        }
        for kind in OBSERVED_SIGNALS {
            self.subscriptions.push(hub.subscribe(self.tag, kind));
        }
        tracing::debug!(observer = ?self.tag, "scroll observer attached");
    }

    /// Unsubscribe and discard any deliveries still queued
    pub fn detach(&mut self, hub: &mut SignalHub) {
        if !self.is_attached() {
            return;
        }
        for id in self.subscriptions.drain(..) {
            hub.unsubscribe(id);
        }
        tracing::debug!(observer = ?self.tag, "scroll observer detached");
    }

    /// Take the signals delivered since the last drain
    pub fn drain(&self, hub: &mut SignalHub) -> Vec<ScrollSignal> {
        if !self.is_attached() {
            return Vec::new();
        }
        hub.drain_for(self.tag)
    }
}

impl Default for ScrollObserver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use endless_core::Point;

    fn scrolled(y: f32) -> ScrollSignal {
        ScrollSignal::ContentOffsetChanged {
            offset: Point::new(0.0, y),
            dragging: false,
        }
    }

    #[test]
    fn test_attach_is_idempotent() {
        let mut hub = SignalHub::new();
        let mut observer = ScrollObserver::new();

        observer.attach(&mut hub);
        observer.attach(&mut hub);

        assert_eq!(hub.observer_count(), 1);
        assert_eq!(hub.subscription_count(), OBSERVED_SIGNALS.len());
        assert!(hub.is_subscribed(observer.tag(), SignalKind::ScrollSettled));
    }

    #[test]
    fn test_detach_drops_queued_signals() {
        let mut hub = SignalHub::new();
        let mut observer = ScrollObserver::new();
        observer.attach(&mut hub);

        hub.emit(scrolled(10.0));
        observer.detach(&mut hub);

        assert!(!observer.is_attached());
        assert_eq!(hub.observer_count(), 0);
        assert!(!hub.has_pending());
        assert!(observer.drain(&mut hub).is_empty());
    }

    #[test]
    fn test_drain_returns_signals_in_order() {
        let mut hub = SignalHub::new();
        let mut observer = ScrollObserver::new();
        observer.attach(&mut hub);

        hub.emit(scrolled(10.0));
        hub.emit(ScrollSignal::DragEnded);

        assert_eq!(
            observer.drain(&mut hub),
            vec![
                scrolled(10.0),
                ScrollSignal::DragEnded,
            ]
        );
        assert!(observer.drain(&mut hub).is_empty());
    }
}
