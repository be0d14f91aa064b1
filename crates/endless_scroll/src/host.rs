//! Host container interface
//!
//! Infinite scroll never owns layout or rendering. It observes and adjusts a
//! scroll container through [`ScrollHost`], which any list or grid view can
//! implement. Setters are expected to push the matching [`ScrollSignal`]
//! into the host's [`SignalHub`]:
//!
//! | change | signal |
//! |---|---|
//! | content size set | [`ScrollSignal::ContentSizeChanged`] |
//! | content offset set (user or programmatic) | [`ScrollSignal::ContentOffsetChanged`] |
//! | drag gesture released | [`ScrollSignal::DragEnded`] |
//! | deceleration came to rest | [`ScrollSignal::ScrollSettled`] |
//!
//! Offset signals record whether a user drag was in progress when the
//! offset was written; only drag-written offsets can start a load.
//!
//! [`ScrollSignal`]: endless_core::ScrollSignal
//! [`ScrollSignal::ContentSizeChanged`]: endless_core::ScrollSignal::ContentSizeChanged
//! [`ScrollSignal::ContentOffsetChanged`]: endless_core::ScrollSignal::ContentOffsetChanged
//! [`ScrollSignal::DragEnded`]: endless_core::ScrollSignal::DragEnded
//! [`ScrollSignal::ScrollSettled`]: endless_core::ScrollSignal::ScrollSettled

use endless_core::{EdgeInsets, ElementId, Point, SignalHub, Size};

/// A vertically scrolling container
pub trait ScrollHost {
    /// Size of the scrollable content
    fn content_size(&self) -> Size;

    /// Current scroll position
    fn content_offset(&self) -> Point;

    /// Move the scroll position without animation
    fn set_content_offset(&mut self, offset: Point);

    /// Size of the visible viewport
    fn bounds_size(&self) -> Size;

    /// Padding around the content (model value, not the presented one)
    fn content_inset(&self) -> EdgeInsets;

    fn set_content_inset(&mut self, inset: EdgeInsets);

    /// Whether the user's finger is currently dragging the content
    fn is_dragging(&self) -> bool;

    /// Whether the content is still moving after a drag was released
    fn is_decelerating(&self) -> bool {
        false
    }

    /// Whether the user is interacting with the container in any way
    fn is_tracking(&self) -> bool {
        self.is_dragging() || self.is_decelerating()
    }

    /// Whether `id` is part of this container's display tree
    fn contains_element(&self, id: ElementId) -> bool;

    /// Add an element to the display tree
    fn insert_element(&mut self, id: ElementId);

    /// Remove an element from the display tree
    fn remove_element(&mut self, id: ElementId);

    /// Signal registry this container pushes change notifications into
    fn signals(&mut self) -> &mut SignalHub;

    /// Presented bottom inset while an inset transition is running
    ///
    /// Called once per frame with the interpolated value. The model value
    /// has already been applied through [`ScrollHost::set_content_inset`].
    fn present_bottom_inset(&mut self, _bottom: f32) {}

    /// Recompute the content size from the data source
    ///
    /// Called before insets shrink at the end of a load, so newly appended
    /// rows are measured before the position is reconciled.
    fn refresh_content_size(&mut self) {}
}
