//! Easing functions for transitions

use serde::{Deserialize, Serialize};

/// Easing curve applied to a transition's linear progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// `cubic-bezier(0.42, 0, 1, 1)`
    EaseIn,
    /// `cubic-bezier(0, 0, 0.58, 1)`
    EaseOut,
    /// `cubic-bezier(0.42, 0, 0.58, 1)`, the default curve for inset changes
    #[default]
    EaseInOut,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Control points `(x1, y1, x2, y2)` of the curve, or None for linear
    pub fn control_points(&self) -> Option<(f32, f32, f32, f32)> {
        match *self {
            Easing::Linear => None,
            Easing::EaseIn => Some((0.42, 0.0, 1.0, 1.0)),
            Easing::EaseOut => Some((0.0, 0.0, 0.58, 1.0)),
            Easing::EaseInOut => Some((0.42, 0.0, 0.58, 1.0)),
            Easing::CubicBezier(x1, y1, x2, y2) => Some((x1, y1, x2, y2)),
        }
    }

    /// Map linear progress `t` in `[0, 1]` to eased progress
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self.control_points() {
            None => t,
            Some((x1, y1, x2, y2)) => solve_bezier(t, x1, y1, x2, y2),
        }
    }
}

/// One axis of a cubic bezier through (0,0) and (1,1), in polynomial form
struct BezierAxis {
    a: f64,
    b: f64,
    c: f64,
}

impl BezierAxis {
    fn new(p1: f32, p2: f32) -> Self {
        let c = 3.0 * p1 as f64;
        let b = 3.0 * (p2 as f64 - p1 as f64) - c;
        let a = 1.0 - c - b;
        Self { a, b, c }
    }

    fn sample(&self, s: f64) -> f64 {
        ((self.a * s + self.b) * s + self.c) * s
    }

    fn slope(&self, s: f64) -> f64 {
        (3.0 * self.a * s + 2.0 * self.b) * s + self.c
    }
}

const EPSILON: f64 = 1e-6;

fn solve_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 || t >= 1.0 {
        return t;
    }

    let x_axis = BezierAxis::new(x1, x2);
    let y_axis = BezierAxis::new(y1, y2);
    let x = t as f64;

    // Newton's method converges in a few steps for well-behaved curves
    let mut s = x;
    for _ in 0..8 {
        let error = x_axis.sample(s) - x;
        if error.abs() < EPSILON {
            return y_axis.sample(s) as f32;
        }
        let slope = x_axis.slope(s);
        if slope.abs() < EPSILON {
            break;
        }
        s -= error / slope;
    }

    // Bisection for flat regions
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    s = x;
    while hi - lo > EPSILON {
        let sampled = x_axis.sample(s);
        if (sampled - x).abs() < EPSILON {
            break;
        }
        if sampled < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }

    y_axis.sample(s) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_exact() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::CubicBezier(0.2, 0.9, 0.1, 1.0),
        ] {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?}");
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let e = Easing::EaseInOut;
        assert!((e.apply(0.5) - 0.5).abs() < 1e-3);
        assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_ease_in_starts_slow() {
        assert!(Easing::EaseIn.apply(0.2) < 0.2);
        assert!(Easing::EaseOut.apply(0.2) > 0.2);
    }

    #[test]
    fn test_out_of_range_progress_is_clamped() {
        assert_eq!(Easing::Linear.apply(1.7), 1.0);
        assert_eq!(Easing::EaseOut.apply(-0.3), 0.0);
    }
}
