//! Loading indicator
//!
//! The indicator is the busy spinner shown in a row below the last item
//! while more content loads. Callers may install any type implementing
//! [`Indicator`]; otherwise a default [`Spinner`] is created on first use.

use endless_core::{ElementId, Point, Size};
use serde::{Deserialize, Serialize};

use crate::host::ScrollHost;

/// Default vertical margin above and below the indicator
///
/// A 22pt spinner with 11pt margins fills a standard 44pt row.
pub const DEFAULT_INDICATOR_MARGIN: f32 = 11.0;

/// Visual handle for a busy indicator
pub trait Indicator {
    /// Identity of the indicator inside the host's display tree
    fn id(&self) -> ElementId;

    fn start_animating(&mut self);

    fn stop_animating(&mut self);

    fn is_animating(&self) -> bool;

    fn is_hidden(&self) -> bool;

    fn set_hidden(&mut self, hidden: bool);

    /// Size of the indicator's bounds
    fn size(&self) -> Size;

    /// Center of the indicator in content coordinates
    fn center(&self) -> Point;

    fn set_center(&mut self, center: Point);

    /// Restyle the indicator; custom indicators may ignore this
    fn apply_style(&mut self, _style: IndicatorStyle) {}
}

/// Appearance of the default spinner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorStyle {
    /// Small dark spinner for light backgrounds
    #[default]
    Gray,
    /// Small light spinner for dark backgrounds
    White,
    /// Large light spinner
    Large,
}

impl IndicatorStyle {
    /// Bounds of a spinner in this style
    pub fn size(&self) -> Size {
        match self {
            IndicatorStyle::Gray | IndicatorStyle::White => Size::new(22.0, 22.0),
            IndicatorStyle::Large => Size::new(37.0, 37.0),
        }
    }
}

/// Default busy indicator
#[derive(Debug, Clone)]
pub struct Spinner {
    id: ElementId,
    style: IndicatorStyle,
    center: Point,
    hidden: bool,
    animating: bool,
}

impl Spinner {
    /// Create a hidden, stopped spinner
    pub fn new(style: IndicatorStyle) -> Self {
        Self {
            id: ElementId::next(),
            style,
            center: Point::ZERO,
            hidden: true,
            animating: false,
        }
    }

    pub fn style(&self) -> IndicatorStyle {
        self.style
    }
}

impl Indicator for Spinner {
    fn id(&self) -> ElementId {
        self.id
    }

    fn start_animating(&mut self) {
        self.animating = true;
    }

    fn stop_animating(&mut self) {
        self.animating = false;
    }

    fn is_animating(&self) -> bool {
        self.animating
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    fn size(&self) -> Size {
        self.style.size()
    }

    fn center(&self) -> Point {
        self.center
    }

    fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    fn apply_style(&mut self, style: IndicatorStyle) {
        self.style = style;
    }
}

/// Owns the active indicator and keeps it placed in the host
pub struct IndicatorController {
    indicator: Option<Box<dyn Indicator>>,
    style: IndicatorStyle,
}

impl IndicatorController {
    pub fn new(style: IndicatorStyle) -> Self {
        Self {
            indicator: None,
            style,
        }
    }

    /// The active indicator, if one exists yet
    pub fn indicator(&self) -> Option<&dyn Indicator> {
        self.indicator.as_deref()
    }

    pub fn style(&self) -> IndicatorStyle {
        self.style
    }

    /// Change the default spinner style, restyling the active indicator
    pub fn set_style(&mut self, style: IndicatorStyle) {
        self.style = style;
        if let Some(indicator) = self.indicator.as_deref_mut() {
            indicator.apply_style(style);
        }
    }

    /// Return the active indicator, creating a hidden default spinner if needed
    ///
    /// The indicator is (re)inserted into the host's display tree whenever it
    /// is missing from it.
    pub fn get_or_create<H: ScrollHost + ?Sized>(&mut self, host: &mut H) -> &mut dyn Indicator {
        let style = self.style;
        let indicator = self.indicator.get_or_insert_with(|| {
            tracing::debug!(?style, "creating default spinner");
            Box::new(Spinner::new(style))
        });

        let id = indicator.id();
        if !host.contains_element(id) {
            host.insert_element(id);
        }
        indicator.as_mut()
    }

    /// Install a caller-supplied indicator
    ///
    /// The new indicator starts hidden. A previous indicator is removed from
    /// the host's display tree.
    pub fn set_indicator<H: ScrollHost + ?Sized>(
        &mut self,
        host: &mut H,
        mut indicator: Box<dyn Indicator>,
    ) {
        indicator.set_hidden(true);
        if let Some(previous) = self.indicator.replace(indicator) {
            if host.contains_element(previous.id()) {
                host.remove_element(previous.id());
            }
        }
    }

    /// Height of the row reserved for the indicator: its height plus `margin` above and below
    pub fn row_height<H: ScrollHost + ?Sized>(&mut self, host: &mut H, margin: f32) -> f32 {
        self.get_or_create(host).size().height + margin * 2.0
    }

    /// Center the indicator below the content
    ///
    /// `clamped_extent` is the content height after clamping to the visible
    /// bounds. The indicator is only moved when its center actually changes.
    pub fn position<H: ScrollHost + ?Sized>(
        &mut self,
        host: &mut H,
        content_width: f32,
        clamped_extent: f32,
        row_height: f32,
    ) {
        let center = Point::new(content_width * 0.5, clamped_extent + row_height * 0.5);
        let indicator = self.get_or_create(host);
        if indicator.center() != center {
            indicator.set_center(center);
        }
    }

    /// Make the indicator visible and start animating
    pub fn show<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        let indicator = self.get_or_create(host);
        indicator.set_hidden(false);
        indicator.start_animating();
    }

    /// Hide the indicator and stop animating
    ///
    /// Does nothing when no indicator exists, so a torn-down controller is
    /// never repopulated.
    pub fn hide(&mut self) {
        if let Some(indicator) = self.indicator.as_deref_mut() {
            indicator.set_hidden(true);
            indicator.stop_animating();
        }
    }

    /// Remove the indicator from the host and drop it
    pub fn detach<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(indicator) = self.indicator.take() {
            if host.contains_element(indicator.id()) {
                host.remove_element(indicator.id());
            }
            tracing::debug!(id = ?indicator.id(), "indicator detached");
        }
    }
}

impl Default for IndicatorController {
    fn default() -> Self {
        Self::new(IndicatorStyle::default())
    }
}
