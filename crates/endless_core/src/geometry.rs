//! Geometry primitives in container coordinates
//!
//! The vertical axis grows downward: a content offset of `y = 0` shows the
//! top of the content, larger values scroll toward the end.

use serde::{Deserialize, Serialize};

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Same point with a different vertical coordinate
    pub const fn with_y(self, y: f32) -> Self {
        Self { x: self.x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Padding applied around the scrollable content of a container
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeInsets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    pub const fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Insets with only the vertical edges set
    pub const fn vertical(top: f32, bottom: f32) -> Self {
        Self::new(top, 0.0, bottom, 0.0)
    }

    /// Same insets with a different bottom edge
    pub const fn with_bottom(self, bottom: f32) -> Self {
        Self { bottom, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_bottom_keeps_other_edges() {
        let insets = EdgeInsets::new(10.0, 4.0, 0.0, 4.0).with_bottom(44.0);
        assert_eq!(insets, EdgeInsets::new(10.0, 4.0, 44.0, 4.0));
    }

    #[test]
    fn test_insets_deserialize_partial() {
        let insets: EdgeInsets = serde_json::from_str(r#"{ "top": 64.0 }"#).unwrap();
        assert_eq!(insets, EdgeInsets::vertical(64.0, 0.0));
    }
}
