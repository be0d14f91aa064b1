//! Headless scroll container
//!
//! [`SimulatedScrollView`] implements [`ScrollHost`] without a window or a
//! renderer. Gestures are driven by hand (`begin_drag`, `drag_to`,
//! `end_drag`, `settle`) and every property change pushes the matching
//! signal, the same way a real container would.

#[cfg(feature = "headless")]
pub mod scenario;

use endless_core::{EdgeInsets, ElementId, Point, ScrollSignal, SignalHub, Size};

use crate::host::ScrollHost;

/// In-memory scroll container for tests and scenarios
pub struct SimulatedScrollView {
    bounds: Size,
    content_size: Size,
    content_offset: Point,
    content_inset: EdgeInsets,
    presented_bottom_inset: f32,
    dragging: bool,
    decelerating: bool,
    elements: Vec<ElementId>,
    signals: SignalHub,
    unmeasured_height: f32,
    content_size_refreshes: u32,
}

impl SimulatedScrollView {
    /// Create a container with a `bounds` viewport and content as wide as the viewport
    pub fn new(bounds: Size, content_height: f32) -> Self {
        Self {
            bounds,
            content_size: Size::new(bounds.width, content_height),
            content_offset: Point::ZERO,
            content_inset: EdgeInsets::ZERO,
            presented_bottom_inset: 0.0,
            dragging: false,
            decelerating: false,
            elements: Vec::new(),
            signals: SignalHub::new(),
            unmeasured_height: 0.0,
            content_size_refreshes: 0,
        }
    }

    /// Start with the given insets
    pub fn with_inset(mut self, inset: EdgeInsets) -> Self {
        self.content_inset = inset;
        self.presented_bottom_inset = inset.bottom;
        self
    }

    pub fn set_content_size(&mut self, size: Size) {
        self.content_size = size;
        self.signals.emit(ScrollSignal::ContentSizeChanged(size));
    }

    /// Grow the content by `height` and report the new size
    pub fn append_content(&mut self, height: f32) {
        let size = Size::new(self.content_size.width, self.content_size.height + height);
        self.set_content_size(size);
    }

    /// Add rows to the data source without measuring them yet
    ///
    /// The content size catches up on the next
    /// [`ScrollHost::refresh_content_size`].
    pub fn stage_content(&mut self, height: f32) {
        self.unmeasured_height += height;
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
        self.decelerating = false;
    }

    /// Drag the content to vertical offset `y`, starting a drag if needed
    pub fn drag_to(&mut self, y: f32) {
        if !self.dragging {
            self.begin_drag();
        }
        self.set_content_offset(self.content_offset.with_y(y));
    }

    /// Release the drag, optionally leaving the content decelerating
    pub fn end_drag(&mut self, decelerate: bool) {
        self.dragging = false;
        self.decelerating = decelerate;
        self.signals.emit(ScrollSignal::DragEnded);
    }

    /// Bring a decelerating scroll to rest
    pub fn settle(&mut self) {
        self.decelerating = false;
        self.signals.emit(ScrollSignal::ScrollSettled);
    }

    /// Last bottom inset shown on screen
    pub fn presented_bottom_inset(&self) -> f32 {
        self.presented_bottom_inset
    }

    /// Elements currently in the display tree
    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    /// Number of times the content size was recomputed
    pub fn content_size_refreshes(&self) -> u32 {
        self.content_size_refreshes
    }

    pub fn signal_hub(&self) -> &SignalHub {
        &self.signals
    }
}

impl ScrollHost for SimulatedScrollView {
    fn content_size(&self) -> Size {
        self.content_size
    }

    fn content_offset(&self) -> Point {
        self.content_offset
    }

    fn set_content_offset(&mut self, offset: Point) {
        self.content_offset = offset;
        self.signals.emit(ScrollSignal::ContentOffsetChanged {
            offset,
            dragging: self.dragging,
        });
    }

    fn bounds_size(&self) -> Size {
        self.bounds
    }

    fn content_inset(&self) -> EdgeInsets {
        self.content_inset
    }

    fn set_content_inset(&mut self, inset: EdgeInsets) {
        self.content_inset = inset;
    }

    fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn is_decelerating(&self) -> bool {
        self.decelerating
    }

    fn contains_element(&self, id: ElementId) -> bool {
        self.elements.contains(&id)
    }

    fn insert_element(&mut self, id: ElementId) {
        if !self.elements.contains(&id) {
            self.elements.push(id);
        }
    }

    fn remove_element(&mut self, id: ElementId) {
        self.elements.retain(|element| *element != id);
    }

    fn signals(&mut self) -> &mut SignalHub {
        &mut self.signals
    }

    fn present_bottom_inset(&mut self, bottom: f32) {
        self.presented_bottom_inset = bottom;
    }

    fn refresh_content_size(&mut self) {
        self.content_size_refreshes += 1;
        if self.unmeasured_height > 0.0 {
            let height = std::mem::take(&mut self.unmeasured_height);
            self.append_content(height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use endless_core::{ObserverTag, SignalKind};

    #[test]
    fn test_setters_emit_signals() {
        let mut view = SimulatedScrollView::new(Size::new(320.0, 500.0), 1000.0);
        let observer = ObserverTag::next();
        view.signals().subscribe(observer, SignalKind::ContentOffset);
        view.signals().subscribe(observer, SignalKind::ContentSize);

        view.drag_to(120.0);
        view.append_content(200.0);

        assert!(view.is_dragging());
        assert_eq!(
            view.signals().drain_for(observer),
            vec![
                ScrollSignal::ContentOffsetChanged {
                    offset: Point::new(0.0, 120.0),
                    dragging: true,
                },
                ScrollSignal::ContentSizeChanged(Size::new(320.0, 1200.0)),
            ]
        );
    }

    #[test]
    fn test_release_with_momentum_keeps_tracking() {
        let mut view = SimulatedScrollView::new(Size::new(320.0, 500.0), 1000.0);
        view.drag_to(50.0);
        view.end_drag(true);

        assert!(!view.is_dragging());
        assert!(view.is_tracking());

        view.settle();
        assert!(!view.is_tracking());
    }

    #[test]
    fn test_staged_content_is_measured_on_refresh() {
        let mut view = SimulatedScrollView::new(Size::new(320.0, 500.0), 1000.0);
        view.stage_content(300.0);
        assert_eq!(view.content_size().height, 1000.0);

        view.refresh_content_size();
        assert_eq!(view.content_size().height, 1300.0);
        assert_eq!(view.content_size_refreshes(), 1);
    }
}
