//! Endless Core Runtime
//!
//! Foundational primitives shared by the Endless crates:
//!
//! - **Geometry**: points, sizes and edge insets in container coordinates
//! - **Scroll Signals**: typed change notifications pushed by a host container
//! - **State Machines**: enum-driven transitions with a bounded history
//! - **Deferred Tasks**: cancelable work queued for a later event-loop turn
//!
//! # Example
//!
//! ```rust
//! use endless_core::events::{ObserverTag, ScrollSignal, SignalHub, SignalKind};
//! use endless_core::Point;
//!
//! let mut hub = SignalHub::new();
//! let observer = ObserverTag::next();
//! hub.subscribe(observer, SignalKind::ContentOffset);
//!
//! hub.emit(ScrollSignal::ContentOffsetChanged {
//!     offset: Point::new(0.0, 120.0),
//!     dragging: true,
//! });
//! assert_eq!(hub.drain_for(observer).len(), 1);
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;
pub mod ids;
pub mod tasks;

pub use events::{ObserverTag, ScrollSignal, SignalHub, SignalKind, SubscriptionId};
pub use fsm::{StateMachine, StateTransitions, Transition};
pub use geometry::{EdgeInsets, Point, Size};
pub use ids::ElementId;
pub use tasks::{TaskId, TaskQueue, TaskTrigger};
