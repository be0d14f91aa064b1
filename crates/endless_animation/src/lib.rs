//! Endless Animation System
//!
//! Eased scalar transitions driven by an explicit frame tick.
//!
//! # Features
//!
//! - **Easing Curves**: linear and the standard cubic-bezier ease family
//! - **Transitions**: a value moving from `from` to `to` over a duration
//! - **Channels**: one running transition per animated property; starting a
//!   new one interrupts the old from its current value
//! - **Completions**: every transition reports exactly once, with
//!   `finished = false` when it was interrupted

pub mod easing;
pub mod scheduler;
pub mod transition;

pub use easing::Easing;
pub use scheduler::{AnimationId, AnimationScheduler, ChannelId, Completion, Frame};
pub use transition::{AnimationSpec, Tween};
