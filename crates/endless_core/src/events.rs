//! Scroll signal dispatch
//!
//! A host container pushes typed [`ScrollSignal`]s into its [`SignalHub`]
//! whenever a watched property changes. The hub keeps a queue of deliveries
//! for live subscriptions only; signals nobody subscribed to are dropped on
//! emit, so a removed observer never sees stale notifications. Owners drain
//! their deliveries on the next event-loop turn.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::geometry::{Point, Size};
pub use crate::ids::ObserverTag;

new_key_type! {
    /// Handle for a single (observer, signal kind) subscription
    pub struct SubscriptionId;
}

/// The kinds of change a host container can report
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// Content extent changed
    ContentSize,
    /// Scroll position changed
    ContentOffset,
    /// A user drag gesture ended
    DragEnded,
    /// Scrolling came to rest (deceleration finished)
    ScrollSettled,
}

/// A change notification with its typed payload
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollSignal {
    ContentSizeChanged(Size),
    /// `dragging` is the host's drag state when the offset was written
    ContentOffsetChanged { offset: Point, dragging: bool },
    DragEnded,
    ScrollSettled,
}

impl ScrollSignal {
    pub fn kind(&self) -> SignalKind {
        match self {
            ScrollSignal::ContentSizeChanged(_) => SignalKind::ContentSize,
            ScrollSignal::ContentOffsetChanged { .. } => SignalKind::ContentOffset,
            ScrollSignal::DragEnded => SignalKind::DragEnded,
            ScrollSignal::ScrollSettled => SignalKind::ScrollSettled,
        }
    }
}

struct Subscription {
    observer: ObserverTag,
    kind: SignalKind,
}

struct Delivery {
    subscription: SubscriptionId,
    signal: ScrollSignal,
}

/// Registry of signal subscriptions plus the queue of pending deliveries
#[derive(Default)]
pub struct SignalHub {
    subscriptions: SlotMap<SubscriptionId, Subscription>,
    by_kind: FxHashMap<SignalKind, SmallVec<[SubscriptionId; 2]>>,
    pending: VecDeque<Delivery>,
}

impl SignalHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `observer` to signals of `kind`
    ///
    /// Subscribing the same observer to the same kind twice returns the
    /// existing subscription.
    pub fn subscribe(&mut self, observer: ObserverTag, kind: SignalKind) -> SubscriptionId {
        if let Some(existing) = self.find(observer, kind) {
            return existing;
        }

        let id = self.subscriptions.insert(Subscription { observer, kind });
        self.by_kind.entry(kind).or_default().push(id);
        tracing::trace!(?observer, ?kind, "signal subscription added");
        id
    }

    /// Remove a subscription and discard its undelivered signals
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let Some(subscription) = self.subscriptions.remove(id) else {
            return false;
        };

        if let Some(ids) = self.by_kind.get_mut(&subscription.kind) {
            ids.retain(|other| *other != id);
        }
        self.pending.retain(|delivery| delivery.subscription != id);
        tracing::trace!(observer = ?subscription.observer, kind = ?subscription.kind, "signal subscription removed");
        true
    }

    /// Remove every subscription held by `observer`
    pub fn unsubscribe_all(&mut self, observer: ObserverTag) -> usize {
        let ids: SmallVec<[SubscriptionId; 4]> = self
            .subscriptions
            .iter()
            .filter(|(_, s)| s.observer == observer)
            .map(|(id, _)| id)
            .collect();

        ids.into_iter().filter(|id| self.unsubscribe(*id)).count()
    }

    pub fn is_subscribed(&self, observer: ObserverTag, kind: SignalKind) -> bool {
        self.find(observer, kind).is_some()
    }

    /// Number of distinct observers holding at least one subscription
    pub fn observer_count(&self) -> usize {
        let mut observers: SmallVec<[ObserverTag; 4]> =
            self.subscriptions.values().map(|s| s.observer).collect();
        observers.sort_unstable();
        observers.dedup();
        observers.len()
    }

    /// Total number of live subscriptions
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Push a signal to every subscription of its kind
    pub fn emit(&mut self, signal: ScrollSignal) {
        let Some(ids) = self.by_kind.get(&signal.kind()) else {
            return;
        };

        for id in ids {
            self.pending.push_back(Delivery {
                subscription: *id,
                signal,
            });
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Take the queued signals addressed to `observer`, in emission order
    pub fn drain_for(&mut self, observer: ObserverTag) -> Vec<ScrollSignal> {
        let mut drained = Vec::new();
        let subscriptions = &self.subscriptions;

        self.pending.retain(|delivery| {
            let mine = subscriptions
                .get(delivery.subscription)
                .is_some_and(|s| s.observer == observer);
            if mine {
                drained.push(delivery.signal);
            }
            !mine
        });

        drained
    }

    fn find(&self, observer: ObserverTag, kind: SignalKind) -> Option<SubscriptionId> {
        self.by_kind.get(&kind)?.iter().copied().find(|id| {
            self.subscriptions
                .get(*id)
                .is_some_and(|s| s.observer == observer)
        })
    }
}
