//! Scripted scroll sessions
//!
//! A scenario describes a container, an infinite scroll config and a list
//! of gesture and assertion steps. Scenarios are JSON:
//!
//! ```json
//! {
//!   "viewport": { "width": 320, "height": 500 },
//!   "content_height": 400,
//!   "page_height": 600,
//!   "finish_in_handler": true,
//!   "steps": [
//!     { "type": "drag_to", "y": 10 },
//!     { "type": "assert_loading", "expected": true },
//!     { "type": "release" },
//!     { "type": "tick", "frames": 30 },
//!     { "type": "assert_handler_calls", "count": 1 }
//!   ]
//! }
//! ```

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use endless_core::{EdgeInsets, Point, Size};
use serde::{Deserialize, Serialize};

use super::SimulatedScrollView;
use crate::config::InfiniteScrollConfig;
use crate::error::{EndlessError, Result};
use crate::host::ScrollHost;
use crate::indicator::Indicator;
use crate::machine::InfiniteScroll;

/// Tolerance for position and inset assertions
const EPSILON: f32 = 1e-3;

fn default_frames() -> u32 {
    1
}

fn default_frame_ms() -> u64 {
    16
}

fn default_max_frames() -> u32 {
    600
}

/// A scripted session against a simulated container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub viewport: Size,
    pub content_height: f32,
    #[serde(default)]
    pub content_inset: EdgeInsets,
    #[serde(default)]
    pub config: InfiniteScrollConfig,
    /// Height the load handler appends on each call
    #[serde(default)]
    pub page_height: f32,
    /// Whether the load handler finishes loading before returning
    #[serde(default)]
    pub finish_in_handler: bool,
    pub steps: Vec<ScenarioStep>,
}

/// One scenario step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Drag the content to vertical offset `y`
    DragTo { y: f32 },
    /// Lift the finger
    Release {
        #[serde(default)]
        decelerate: bool,
    },
    /// Let a decelerating scroll come to rest
    Settle,
    /// Move the content without a gesture
    ScrollTo { y: f32 },
    /// Append content outside the load handler
    Append { height: f32 },
    /// Finish the current load cycle
    Finish,
    /// Advance `frames` event-loop turns of `frame_ms` each
    Tick {
        #[serde(default = "default_frames")]
        frames: u32,
        #[serde(default = "default_frame_ms")]
        frame_ms: u64,
    },
    /// Tick until no transition or handler call is outstanding
    RunUntilIdle {
        #[serde(default = "default_max_frames")]
        max_frames: u32,
    },
    AssertLoading { expected: bool },
    AssertInset { bottom: f32 },
    AssertOffset { y: f32 },
    AssertHandlerCalls { count: u32 },
    AssertIndicatorVisible { expected: bool },
}

/// Final state after a scenario ran
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioReport {
    pub steps_run: usize,
    pub handler_calls: u32,
    pub loading: bool,
    pub content_height: f32,
    pub content_offset: Point,
    pub content_inset: EdgeInsets,
    /// Load-cycle transitions taken, oldest first
    pub transitions: Vec<String>,
}

impl Scenario {
    /// Load a scenario from JSON text
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Run every step, stopping at the first failed assertion
    pub fn run(&self) -> Result<ScenarioReport> {
        self.config.validate()?;

        let view = SimulatedScrollView::new(self.viewport, self.content_height)
            .with_inset(self.content_inset);
        let mut scroll = InfiniteScroll::with_config(view, self.config.clone());

        let calls = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&calls);
        let page_height = self.page_height;
        let finish_in_handler = self.finish_in_handler;
        scroll.add_infinite_scroll(move |request| {
            counter.set(counter.get() + 1);
            if page_height > 0.0 {
                request.host_mut().append_content(page_height);
            }
            if finish_in_handler {
                request.finish();
            }
        });

        for (index, step) in self.steps.iter().enumerate() {
            let step_no = index + 1;
            tracing::debug!(step = step_no, ?step, "scenario step");

            match *step {
                ScenarioStep::DragTo { y } => scroll.update(|view| view.drag_to(y)),
                ScenarioStep::Release { decelerate } => {
                    scroll.update(|view| view.end_drag(decelerate))
                }
                ScenarioStep::Settle => scroll.update(|view| view.settle()),
                ScenarioStep::ScrollTo { y } => scroll.update(|view| {
                    let offset = view.content_offset().with_y(y);
                    view.set_content_offset(offset);
                }),
                ScenarioStep::Append { height } => {
                    scroll.update(|view| view.append_content(height))
                }
                ScenarioStep::Finish => scroll.finish_infinite_scroll(),
                ScenarioStep::Tick { frames, frame_ms } => {
                    for _ in 0..frames {
                        scroll.tick(Duration::from_millis(frame_ms));
                    }
                }
                ScenarioStep::RunUntilIdle { max_frames } => {
                    let mut frames = 0;
                    while scroll.has_pending_work() && frames < max_frames {
                        scroll.tick(Duration::from_millis(default_frame_ms()));
                        frames += 1;
                    }
                    check(step_no, !scroll.has_pending_work(), || {
                        format!("still busy after {max_frames} frames")
                    })?;
                }
                ScenarioStep::AssertLoading { expected } => {
                    let actual = scroll.is_animating_infinite_scroll();
                    check(step_no, actual == expected, || {
                        format!("expected loading = {expected}, got {actual}")
                    })?;
                }
                ScenarioStep::AssertInset { bottom } => {
                    let actual = scroll.host().content_inset().bottom;
                    check(step_no, approx_eq(actual, bottom), || {
                        format!("expected bottom inset {bottom}, got {actual}")
                    })?;
                }
                ScenarioStep::AssertOffset { y } => {
                    let actual = scroll.host().content_offset().y;
                    check(step_no, approx_eq(actual, y), || {
                        format!("expected offset {y}, got {actual}")
                    })?;
                }
                ScenarioStep::AssertHandlerCalls { count } => {
                    let actual = calls.get();
                    check(step_no, actual == count, || {
                        format!("expected {count} handler calls, got {actual}")
                    })?;
                }
                ScenarioStep::AssertIndicatorVisible { expected } => {
                    let actual = scroll.indicator().is_some_and(|i| !i.is_hidden());
                    check(step_no, actual == expected, || {
                        format!("expected indicator visible = {expected}, got {actual}")
                    })?;
                }
            }
        }

        let host = scroll.host();
        Ok(ScenarioReport {
            steps_run: self.steps.len(),
            handler_calls: calls.get(),
            loading: scroll.is_animating_infinite_scroll(),
            content_height: host.content_size().height,
            content_offset: host.content_offset(),
            content_inset: host.content_inset(),
            transitions: scroll
                .state()
                .transitions()
                .map(|t| format!("{:?} --{:?}--> {:?}", t.from, t.event, t.to))
                .collect(),
        })
    }
}

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON
}

fn check(step: usize, ok: bool, message: impl FnOnce() -> String) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(EndlessError::Assertion {
            step,
            message: message(),
        })
    }
}
