//! Single-value transitions

use serde::{Deserialize, Serialize};

use crate::easing::Easing;

/// Duration and curve of a transition
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationSpec {
    /// Duration in seconds
    pub duration: f32,
    #[serde(default)]
    pub easing: Easing,
}

impl AnimationSpec {
    pub const fn new(duration: f32, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// Transition that completes on the first tick
    pub const fn instant() -> Self {
        Self::new(0.0, Easing::Linear)
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::new(0.35, Easing::EaseInOut)
    }
}

/// A value moving from `from` to `to` over a fixed duration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    spec: AnimationSpec,
    elapsed: f32,
}

impl Tween {
    pub fn new(from: f32, to: f32, spec: AnimationSpec) -> Self {
        Self {
            from,
            to,
            spec,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    /// Linear progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        if self.spec.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.spec.duration).clamp(0.0, 1.0)
    }

    /// Current presented value
    pub fn value(&self) -> f32 {
        let eased = self.spec.easing.apply(self.progress());
        self.from + (self.to - self.from) * eased
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Restart toward a new target from the current presented value
    pub fn retarget(&mut self, to: f32, spec: AnimationSpec) {
        *self = Self::new(self.value(), to, spec);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_tween_midpoint() {
        let mut tween = Tween::new(0.0, 100.0, AnimationSpec::new(1.0, Easing::Linear));
        tween.advance(0.5);
        assert!((tween.value() - 50.0).abs() < 1e-4);
        assert!(!tween.is_finished());

        tween.advance(0.6);
        assert_eq!(tween.value(), 100.0);
        assert!(tween.is_finished());
    }

    #[test]
    fn test_zero_duration_is_finished_immediately() {
        let tween = Tween::new(10.0, 54.0, AnimationSpec::instant());
        assert!(tween.is_finished());
        assert_eq!(tween.value(), 54.0);
    }

    #[test]
    fn test_retarget_starts_from_current_value() {
        let mut tween = Tween::new(0.0, 144.0, AnimationSpec::new(1.0, Easing::Linear));
        tween.advance(0.25);
        tween.retarget(0.0, AnimationSpec::new(1.0, Easing::Linear));

        assert!((tween.value() - 36.0).abs() < 1e-4);
        assert_eq!(tween.target(), 0.0);
    }
}
