//! State Machine Runtime
//!
//! Flat state machines over plain enums. A state type implements
//! [`StateTransitions`] to map `(state, event)` pairs to the next state;
//! [`StateMachine`] applies events and records a bounded transition history
//! for diagnostics.
//!
//! ```rust
//! use endless_core::fsm::{StateMachine, StateTransitions};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Door { Closed, Open }
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum Push { Open, Close }
//!
//! impl StateTransitions for Door {
//!     type Event = Push;
//!
//!     fn on_event(&self, event: Push) -> Option<Self> {
//!         match (self, event) {
//!             (Door::Closed, Push::Open) => Some(Door::Open),
//!             (Door::Open, Push::Close) => Some(Door::Closed),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut door = StateMachine::new(Door::Closed);
//! assert_eq!(door.send(Push::Open), Some(Door::Open));
//! assert_eq!(door.send(Push::Open), None);
//! ```

use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

/// Default number of transitions retained in the history
pub const DEFAULT_HISTORY_LIMIT: usize = 32;

/// Trait for state enums that handle event transitions
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + Debug + 'static
{
    /// Events understood by this state type
    type Event: Clone + Copy + PartialEq + Eq + Debug;

    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: Self::Event) -> Option<Self>;
}

/// A transition that was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<S: StateTransitions> {
    pub from: S,
    pub event: S::Event,
    pub to: S,
}

/// A state machine instance
#[derive(Debug, Clone)]
pub struct StateMachine<S: StateTransitions> {
    current: S,
    history: VecDeque<Transition<S>>,
    history_limit: usize,
}

impl<S: StateTransitions> StateMachine<S> {
    pub fn new(initial: S) -> Self {
        Self::with_history_limit(initial, DEFAULT_HISTORY_LIMIT)
    }

    /// Create a machine that keeps at most `limit` transitions of history
    pub fn with_history_limit(initial: S, limit: usize) -> Self {
        Self {
            current: initial,
            history: VecDeque::with_capacity(limit.min(DEFAULT_HISTORY_LIMIT)),
            history_limit: limit,
        }
    }

    /// Get the current state
    pub fn current(&self) -> S {
        self.current
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current == state
    }

    /// Check if an event would trigger a transition from the current state
    pub fn can_send(&self, event: S::Event) -> bool {
        self.current.on_event(event).is_some()
    }

    /// Send an event, returning the new state if a transition happened
    pub fn send(&mut self, event: S::Event) -> Option<S> {
        let from = self.current;
        let Some(to) = from.on_event(event) else {
            tracing::trace!(state = ?from, ?event, "event ignored");
            return None;
        };

        self.current = to;
        self.record(Transition { from, event, to });
        tracing::debug!(?from, ?event, ?to, "state transition");
        Some(to)
    }

    /// Transitions taken so far, oldest first
    pub fn history(&self) -> impl Iterator<Item = &Transition<S>> {
        self.history.iter()
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn record(&mut self, transition: Transition<S>) {
        if self.history_limit == 0 {
            return;
        }
        if self.history.len() == self.history_limit {
            self.history.pop_front();
        }
        self.history.push_back(transition);
    }
}

impl<S: StateTransitions + Default> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    enum Gesture {
        #[default]
        Idle,
        Tracking,
        Decelerating,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Input {
        Touch,
        Release,
        Rest,
    }

    impl StateTransitions for Gesture {
        type Event = Input;

        fn on_event(&self, event: Input) -> Option<Self> {
            match (self, event) {
                (Gesture::Idle, Input::Touch) => Some(Gesture::Tracking),
                (Gesture::Tracking, Input::Release) => Some(Gesture::Decelerating),
                (Gesture::Decelerating, Input::Touch) => Some(Gesture::Tracking),
                (Gesture::Decelerating, Input::Rest) => Some(Gesture::Idle),
                _ => None,
            }
        }
    }

    #[test]
    fn test_simple_transitions() {
        let mut fsm = StateMachine::<Gesture>::default();
        assert!(fsm.is_in(Gesture::Idle));

        assert_eq!(fsm.send(Input::Touch), Some(Gesture::Tracking));
        assert_eq!(fsm.send(Input::Release), Some(Gesture::Decelerating));
        assert_eq!(fsm.send(Input::Rest), Some(Gesture::Idle));
    }

    #[test]
    fn test_invalid_event_no_transition() {
        let mut fsm = StateMachine::new(Gesture::Idle);

        assert_eq!(fsm.send(Input::Release), None);
        assert_eq!(fsm.current(), Gesture::Idle);
        assert_eq!(fsm.history().count(), 0);
    }

    #[test]
    fn test_can_send() {
        let fsm = StateMachine::new(Gesture::Tracking);
        assert!(fsm.can_send(Input::Release));
        assert!(!fsm.can_send(Input::Touch));
    }

    #[test]
    fn test_history_is_bounded() {
        let mut fsm = StateMachine::with_history_limit(Gesture::Idle, 2);

        fsm.send(Input::Touch);
        fsm.send(Input::Release);
        fsm.send(Input::Rest);

        let history: Vec<_> = fsm.history().copied().collect();
        assert_eq!(
            history,
            vec![
                Transition {
                    from: Gesture::Tracking,
                    event: Input::Release,
                    to: Gesture::Decelerating,
                },
                Transition {
                    from: Gesture::Decelerating,
                    event: Input::Rest,
                    to: Gesture::Idle,
                },
            ]
        );

        fsm.clear_history();
        assert_eq!(fsm.history().count(), 0);
    }
}
