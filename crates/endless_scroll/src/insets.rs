//! Bottom inset bookkeeping
//!
//! While loading, the container's bottom inset carries two additions: a row
//! for the indicator, and padding that pushes short content's indicator
//! down to the bottom of the viewport. Both amounts are recorded in
//! [`ScrollState`] when added and subtracted verbatim when removed, so any
//! inset changes the caller makes in between survive.

use crate::host::ScrollHost;
use crate::state::ScrollState;

/// Bottom inset before and after a reconciliation step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsetChange {
    pub from: f32,
    pub to: f32,
}

/// Inset arithmetic over a host and its infinite scroll state
pub struct InsetReconciler;

impl InsetReconciler {
    /// Bottom inset without anything infinite scroll added
    pub fn original_bottom_inset<H: ScrollHost + ?Sized>(host: &H, state: &ScrollState) -> f32 {
        host.content_inset().bottom - state.extra_bottom_inset - state.indicator_inset
    }

    /// Content height stretched to at least fill the visible viewport
    pub fn clamp_extent<H: ScrollHost + ?Sized>(host: &H, state: &ScrollState, raw: f32) -> f32 {
        let min_height = host.bounds_size().height
            - host.content_inset().top
            - Self::original_bottom_inset(host, state);
        raw.max(min_height)
    }

    /// Offset at which the bottom of the content sits at the bottom of the viewport
    pub fn content_end<H: ScrollHost + ?Sized>(host: &H, state: &ScrollState) -> f32 {
        Self::clamp_extent(host, state, host.content_size().height) - host.bounds_size().height
            + Self::original_bottom_inset(host, state)
    }

    /// Make room for an indicator row of `row_height`
    ///
    /// The model inset is updated on the host right away; the returned change
    /// describes the transition to present.
    pub fn grow_for_loading<H: ScrollHost + ?Sized>(
        host: &mut H,
        state: &mut ScrollState,
        row_height: f32,
    ) -> InsetChange {
        let extent = host.content_size().height;
        let extra = Self::clamp_extent(host, state, extent) - extent;

        let mut inset = host.content_inset();
        let from = inset.bottom;
        inset.bottom += row_height + extra;

        state.indicator_inset = row_height;
        state.extra_bottom_inset = extra;
        host.set_content_inset(inset);

        tracing::debug!(from, to = inset.bottom, row_height, extra, "bottom inset grown");
        InsetChange {
            from,
            to: inset.bottom,
        }
    }

    /// Remove exactly what [`InsetReconciler::grow_for_loading`] added
    pub fn shrink_after_loading<H: ScrollHost + ?Sized>(
        host: &mut H,
        state: &mut ScrollState,
    ) -> InsetChange {
        let mut inset = host.content_inset();
        let from = inset.bottom;
        inset.bottom -= state.indicator_inset + state.extra_bottom_inset;

        state.indicator_inset = 0.0;
        state.extra_bottom_inset = 0.0;
        host.set_content_inset(inset);

        tracing::debug!(from, to = inset.bottom, "bottom inset restored");
        InsetChange {
            from,
            to: inset.bottom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::SimulatedScrollView;
    use endless_core::{EdgeInsets, Size};

    #[test]
    fn test_short_content_is_clamped_to_viewport() {
        let view = SimulatedScrollView::new(Size::new(320.0, 500.0), 400.0);
        let state = ScrollState::default();

        assert_eq!(InsetReconciler::clamp_extent(&view, &state, 400.0), 500.0);
        assert_eq!(InsetReconciler::clamp_extent(&view, &state, 900.0), 900.0);
        assert_eq!(InsetReconciler::content_end(&view, &state), 0.0);
    }

    #[test]
    fn test_clamp_respects_top_and_original_bottom_inset() {
        let view = SimulatedScrollView::new(Size::new(320.0, 500.0), 100.0)
            .with_inset(EdgeInsets::vertical(64.0, 20.0));
        let state = ScrollState::default();

        assert_eq!(InsetReconciler::original_bottom_inset(&view, &state), 20.0);
        assert_eq!(InsetReconciler::clamp_extent(&view, &state, 100.0), 416.0);
    }

    #[test]
    fn test_grow_short_content() {
        let mut view = SimulatedScrollView::new(Size::new(320.0, 500.0), 400.0);
        let mut state = ScrollState::default();

        let change = InsetReconciler::grow_for_loading(&mut view, &mut state, 44.0);

        assert_eq!(change, InsetChange { from: 0.0, to: 144.0 });
        assert_eq!(view.content_inset().bottom, 144.0);
        assert_eq!(state.indicator_inset(), 44.0);
        assert_eq!(state.extra_bottom_inset(), 100.0);
        // The caller's own inset is still recoverable while loading
        assert_eq!(InsetReconciler::original_bottom_inset(&view, &state), 0.0);
    }

    #[test]
    fn test_grow_then_shrink_restores_inset() {
        let mut view = SimulatedScrollView::new(Size::new(320.0, 500.0), 1200.0)
            .with_inset(EdgeInsets::vertical(10.0, 30.0));
        let mut state = ScrollState::default();

        InsetReconciler::grow_for_loading(&mut view, &mut state, 44.0);
        assert_eq!(view.content_inset().bottom, 74.0);

        let change = InsetReconciler::shrink_after_loading(&mut view, &mut state);
        assert_eq!(change, InsetChange { from: 74.0, to: 30.0 });
        assert_eq!(view.content_inset(), EdgeInsets::vertical(10.0, 30.0));
        assert_eq!(state.indicator_inset(), 0.0);
        assert_eq!(state.extra_bottom_inset(), 0.0);
    }

    #[test]
    fn test_shrink_keeps_caller_changes_made_while_loading() {
        let mut view = SimulatedScrollView::new(Size::new(320.0, 500.0), 400.0);
        let mut state = ScrollState::default();

        InsetReconciler::grow_for_loading(&mut view, &mut state, 44.0);
        let inset = view.content_inset();
        view.set_content_inset(inset.with_bottom(inset.bottom + 8.0));

        InsetReconciler::shrink_after_loading(&mut view, &mut state);
        assert_eq!(view.content_inset().bottom, 8.0);
    }
}
