//! Per-container infinite scroll state

use endless_core::fsm::{StateMachine, StateTransitions, Transition};

use crate::config::{DeferPolicy, InfiniteScrollConfig};
use crate::indicator::IndicatorStyle;

/// Load cycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadPhase {
    /// Waiting for the user to scroll near the end
    #[default]
    Idle,
    /// Indicator shown, insets grown, load callback scheduled or running
    Triggered,
}

/// Events driving [`LoadPhase`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadEvent {
    /// Scrolled past the trigger threshold
    Trigger,
    /// Insets shrank back after the caller finished loading
    Finished,
}

impl StateTransitions for LoadPhase {
    type Event = LoadEvent;

    fn on_event(&self, event: LoadEvent) -> Option<Self> {
        match (self, event) {
            (LoadPhase::Idle, LoadEvent::Trigger) => Some(LoadPhase::Triggered),
            (LoadPhase::Triggered, LoadEvent::Finished) => Some(LoadPhase::Idle),
            _ => None,
        }
    }
}

/// Infinite scroll state owned by one container
///
/// `indicator_inset` and `extra_bottom_inset` hold exactly what was added
/// to the container's bottom inset when loading started, so the same
/// amounts can be removed when it ends. Both are zero while idle.
#[derive(Debug, Clone)]
pub struct ScrollState {
    pub(crate) initialized: bool,
    pub(crate) phase: StateMachine<LoadPhase>,
    pub(crate) hidden: bool,
    pub(crate) defer_callback_while_scrolling: bool,
    pub(crate) defer_policy: DeferPolicy,
    pub(crate) trigger_offset: f32,
    pub(crate) indicator_inset: f32,
    pub(crate) extra_bottom_inset: f32,
    pub(crate) indicator_margin: f32,
    pub(crate) indicator_style: IndicatorStyle,
}

impl ScrollState {
    pub fn from_config(config: &InfiniteScrollConfig) -> Self {
        Self {
            initialized: false,
            phase: StateMachine::new(LoadPhase::Idle),
            hidden: config.hidden,
            defer_callback_while_scrolling: config.defer_callback_while_scrolling,
            defer_policy: config.defer_policy,
            trigger_offset: config.trigger_offset.abs(),
            indicator_inset: 0.0,
            extra_bottom_inset: 0.0,
            indicator_margin: config.indicator_margin,
            indicator_style: config.indicator_style,
        }
    }

    /// Whether the load callback has been installed and observers attached
    pub fn initialized(&self) -> bool {
        self.initialized
    }

    /// Whether a load cycle is in progress
    pub fn loading(&self) -> bool {
        self.phase.is_in(LoadPhase::Triggered)
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase.current()
    }

    /// Recent load-cycle transitions, oldest first
    pub fn transitions(&self) -> impl Iterator<Item = &Transition<LoadPhase>> {
        self.phase.history()
    }

    pub fn hidden(&self) -> bool {
        self.hidden
    }

    pub fn defer_callback_while_scrolling(&self) -> bool {
        self.defer_callback_while_scrolling
    }

    pub fn defer_policy(&self) -> DeferPolicy {
        self.defer_policy
    }

    pub fn trigger_offset(&self) -> f32 {
        self.trigger_offset
    }

    /// Bottom inset currently reserved for the indicator row
    pub fn indicator_inset(&self) -> f32 {
        self.indicator_inset
    }

    /// Bottom padding currently added to push short content's indicator to the viewport bottom
    pub fn extra_bottom_inset(&self) -> f32 {
        self.extra_bottom_inset
    }

    pub fn indicator_margin(&self) -> f32 {
        self.indicator_margin
    }

    pub fn indicator_style(&self) -> IndicatorStyle {
        self.indicator_style
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::from_config(&InfiniteScrollConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_phase_transitions() {
        assert_eq!(
            LoadPhase::Idle.on_event(LoadEvent::Trigger),
            Some(LoadPhase::Triggered)
        );
        assert_eq!(
            LoadPhase::Triggered.on_event(LoadEvent::Finished),
            Some(LoadPhase::Idle)
        );
        assert_eq!(LoadPhase::Triggered.on_event(LoadEvent::Trigger), None);
        assert_eq!(LoadPhase::Idle.on_event(LoadEvent::Finished), None);
    }

    #[test]
    fn test_state_from_config_normalizes_trigger_offset() {
        let config = InfiniteScrollConfig::default().trigger_offset(-250.0);
        let state = ScrollState::from_config(&config);

        assert_eq!(state.trigger_offset(), 250.0);
        assert!(!state.loading());
        assert!(!state.initialized());
        assert_eq!(state.indicator_inset(), 0.0);
        assert_eq!(state.extra_bottom_inset(), 0.0);
    }
}
