//! Endless Infinite Scroll
//!
//! Load-more behavior for any vertically scrolling container. When the user
//! drags near the end of the content, a busy indicator appears in a row
//! below the last item, the container's bottom inset grows to make room for
//! it, and a load handler is called. Once the caller has appended content
//! and finished, the inset shrinks back and the indicator hides.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use endless_core::Size;
//! use endless_scroll::headless::SimulatedScrollView;
//! use endless_scroll::prelude::*;
//!
//! let view = SimulatedScrollView::new(Size::new(320.0, 500.0), 1000.0);
//! let mut scroll = InfiniteScroll::new(view);
//!
//! scroll.add_infinite_scroll(|request| {
//!     request.host_mut().append_content(500.0);
//!     request.finish();
//! });
//!
//! scroll.update(|view| view.drag_to(520.0));
//! assert!(scroll.is_animating_infinite_scroll());
//!
//! scroll.update(|view| view.end_drag(false));
//! for _ in 0..60 {
//!     scroll.tick(Duration::from_millis(16));
//! }
//! assert!(!scroll.is_animating_infinite_scroll());
//! assert_eq!(scroll.host().content_size().height, 1500.0);
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod indicator;
pub mod insets;
pub mod machine;
pub mod observer;
pub mod state;

#[cfg(any(test, feature = "headless"))]
pub mod headless;

pub use config::{DeferPolicy, InfiniteScrollConfig};
pub use error::{EndlessError, Result};
pub use host::ScrollHost;
pub use indicator::{Indicator, IndicatorController, IndicatorStyle, Spinner};
pub use insets::{InsetChange, InsetReconciler};
pub use machine::{FinishHandler, InfiniteScroll, InsetAnimation, LoadHandler, LoadRequest};
pub use observer::ScrollObserver;
pub use state::{LoadEvent, LoadPhase, ScrollState};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{DeferPolicy, InfiniteScrollConfig};
    pub use crate::host::ScrollHost;
    pub use crate::indicator::{Indicator, IndicatorStyle};
    pub use crate::machine::{InfiniteScroll, LoadRequest};
    pub use crate::state::LoadPhase;
}
