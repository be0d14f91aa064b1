//! Infinite scroll state machine
//!
//! [`InfiniteScroll`] wraps a [`ScrollHost`] and drives the load cycle:
//!
//! ```text
//!   Idle ──(user drags past threshold)──▶ Triggered ──(finish + inset shrink)──▶ Idle
//! ```
//!
//! Entering `Triggered` shows the indicator, grows the bottom inset and
//! queues the load handler. The caller appends content and calls
//! [`InfiniteScroll::finish_infinite_scroll`]; once the inset has shrunk
//! back the indicator hides and the finish completions run.
//!
//! Everything happens on the owner's turn. Host signals are queued in the
//! host's hub and handled by [`InfiniteScroll::pump`]; inset transitions
//! and deferred handler calls advance in [`InfiniteScroll::tick`].

use std::time::Duration;

use endless_animation::{AnimationScheduler, AnimationSpec, ChannelId};
use endless_core::{Point, ScrollSignal, Size, TaskId, TaskQueue, TaskTrigger};

use crate::config::{DeferPolicy, InfiniteScrollConfig};
use crate::host::ScrollHost;
use crate::indicator::{Indicator, IndicatorController, IndicatorStyle};
use crate::insets::{InsetChange, InsetReconciler};
use crate::observer::ScrollObserver;
use crate::state::{LoadEvent, LoadPhase, ScrollState};

/// Animation channel for the presented bottom inset
pub const BOTTOM_INSET: ChannelId = 0;

/// Upper bound on signal rounds handled by a single pump
const MAX_PUMP_ROUNDS: usize = 16;

/// Called when more content should be loaded
pub type LoadHandler<H> = Box<dyn FnMut(&mut LoadRequest<'_, H>)>;

/// Called once the indicator is hidden after a finish
pub type FinishHandler<H> = Box<dyn FnOnce(&mut H)>;

/// Which inset transition is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsetAnimation {
    /// Growing to make room for the indicator
    Reveal,
    /// Shrinking back after loading finished
    Conceal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeferredCall {
    LoadHandler,
}

/// Access given to the load handler while it runs
pub struct LoadRequest<'a, H> {
    host: &'a mut H,
    finish: bool,
    completions: Vec<FinishHandler<H>>,
}

impl<'a, H> LoadRequest<'a, H> {
    pub fn host(&self) -> &H {
        self.host
    }

    /// Mutable host access, e.g. to append the loaded rows
    pub fn host_mut(&mut self) -> &mut H {
        self.host
    }

    /// Finish loading as soon as the handler returns
    pub fn finish(&mut self) {
        self.finish = true;
    }

    /// Finish loading as soon as the handler returns, then run `completion`
    pub fn finish_with<F>(&mut self, completion: F)
    where
        F: FnOnce(&mut H) + 'static,
    {
        self.finish = true;
        self.completions.push(Box::new(completion));
    }

    pub fn is_finish_requested(&self) -> bool {
        self.finish
    }
}

/// Infinite scroll attached to a scroll container
pub struct InfiniteScroll<H: ScrollHost> {
    host: H,
    state: ScrollState,
    observer: ScrollObserver,
    indicator: IndicatorController,
    animations: AnimationScheduler<InsetAnimation>,
    inset_animation: AnimationSpec,
    tasks: TaskQueue<DeferredCall>,
    pending_call: Option<TaskId>,
    handler: Option<LoadHandler<H>>,
    finish_handlers: Vec<FinishHandler<H>>,
    finishing: bool,
}

impl<H: ScrollHost> InfiniteScroll<H> {
    /// Wrap `host` with default configuration
    pub fn new(host: H) -> Self {
        Self::with_config(host, InfiniteScrollConfig::default())
    }

    pub fn with_config(host: H, config: InfiniteScrollConfig) -> Self {
        Self {
            host,
            state: ScrollState::from_config(&config),
            observer: ScrollObserver::new(),
            indicator: IndicatorController::new(config.indicator_style),
            animations: AnimationScheduler::new(),
            inset_animation: config.inset_animation,
            tasks: TaskQueue::new(),
            pending_call: None,
            handler: None,
            finish_handlers: Vec::new(),
            finishing: false,
        }
    }

    /// Install the load handler and start observing the host
    ///
    /// Calling this again only replaces the handler.
    pub fn add_infinite_scroll<F>(&mut self, handler: F)
    where
        F: FnMut(&mut LoadRequest<'_, H>) + 'static,
    {
        self.handler = Some(Box::new(handler));

        if self.state.initialized {
            tracing::debug!("infinite scroll already attached, handler replaced");
            return;
        }

        self.observer.attach(self.host.signals());
        self.state.initialized = true;
        tracing::debug!(observer = ?self.observer.tag(), "infinite scroll attached");
    }

    /// Replace the load handler without attaching
    ///
    /// A handler call that is already queued runs the new handler.
    pub fn set_handler<F>(&mut self, handler: F)
    where
        F: FnMut(&mut LoadRequest<'_, H>) + 'static,
    {
        self.handler = Some(Box::new(handler));
    }

    /// Stop observing the host and drop the indicator and handler
    ///
    /// Insets are left as they are; a load in progress can still be finished.
    pub fn remove_infinite_scroll(&mut self) {
        if !self.state.initialized {
            return;
        }

        self.observer.detach(self.host.signals());
        self.indicator.detach(&mut self.host);
        self.handler = None;
        if let Some(id) = self.pending_call.take() {
            self.tasks.cancel(id);
        }
        self.state.initialized = false;
        tracing::debug!(loading = self.state.loading(), "infinite scroll removed");
    }

    /// Finish the current load cycle
    pub fn finish_infinite_scroll(&mut self) {
        self.finish(None);
    }

    /// Finish the current load cycle and run `completion` once the indicator is hidden
    ///
    /// Ignored while idle. Calling again before the inset has shrunk queues
    /// another completion without restarting the transition.
    pub fn finish_infinite_scroll_with<F>(&mut self, completion: F)
    where
        F: FnOnce(&mut H) + 'static,
    {
        self.finish(Some(Box::new(completion)));
    }

    /// Whether a load cycle is in progress
    pub fn is_animating_infinite_scroll(&self) -> bool {
        self.state.loading()
    }

    /// Suppress the trigger; takes effect on the next scroll
    pub fn set_hidden(&mut self, hidden: bool) {
        self.state.hidden = hidden;
    }

    /// Start loading `offset` points before the real end of content
    pub fn set_trigger_offset(&mut self, offset: f32) {
        self.state.trigger_offset = offset.abs();
    }

    pub fn set_indicator_margin(&mut self, margin: f32) {
        self.state.indicator_margin = margin;
    }

    pub fn set_defer_callback_while_scrolling(&mut self, defer: bool) {
        self.state.defer_callback_while_scrolling = defer;
    }

    pub fn set_defer_policy(&mut self, policy: DeferPolicy) {
        self.state.defer_policy = policy;
    }

    pub fn set_indicator_style(&mut self, style: IndicatorStyle) {
        self.state.indicator_style = style;
        self.indicator.set_style(style);
    }

    /// Use a custom indicator instead of the default spinner
    pub fn set_indicator<I>(&mut self, indicator: I)
    where
        I: Indicator + 'static,
    {
        self.indicator.set_indicator(&mut self.host, Box::new(indicator));
    }

    pub fn set_inset_animation(&mut self, spec: AnimationSpec) {
        self.inset_animation = spec;
    }

    /// Handle every signal the host has queued
    pub fn pump(&mut self) {
        for _ in 0..MAX_PUMP_ROUNDS {
            let signals = self.observer.drain(self.host.signals());
            if signals.is_empty() {
                return;
            }
            for signal in signals {
                self.handle_signal(signal);
            }
        }
        tracing::debug!(rounds = MAX_PUMP_ROUNDS, "signal pump stopped with signals still queued");
    }

    /// Advance one event-loop turn by `dt`
    pub fn tick(&mut self, dt: Duration) {
        self.pump();

        let frame = self.animations.tick(dt.as_secs_f32());
        if let Some(bottom) = frame.value(BOTTOM_INSET) {
            self.host.present_bottom_inset(bottom);
        }
        for completion in frame.completions {
            self.inset_animation_ended(completion.tag, completion.finished);
        }

        let due = self.tasks.advance(dt, self.host.is_tracking());
        self.run_tasks(due);

        self.pump();
    }

    /// Mutate the host, then handle the signals it raised
    pub fn update<R>(&mut self, f: impl FnOnce(&mut H) -> R) -> R {
        let result = f(&mut self.host);
        self.pump();
        result
    }

    /// Whether inset transitions or handler calls are still outstanding
    pub fn has_pending_work(&self) -> bool {
        self.animations.has_active_animations() || !self.tasks.is_empty()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Direct host access; signals raised here are handled on the next pump
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn indicator(&self) -> Option<&dyn Indicator> {
        self.indicator.indicator()
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn phase(&self) -> LoadPhase {
        self.state.phase()
    }

    /// Detach and hand the host back
    pub fn into_host(mut self) -> H {
        self.remove_infinite_scroll();
        self.host
    }

    fn handle_signal(&mut self, signal: ScrollSignal) {
        tracing::trace!(?signal, "scroll signal");
        match signal {
            ScrollSignal::ContentSizeChanged(size) => {
                if self.state.initialized {
                    self.position_indicator(size);
                }
            }
            ScrollSignal::ContentOffsetChanged { offset, dragging } => {
                if self.state.initialized && dragging {
                    self.did_scroll(offset);
                }
            }
            ScrollSignal::DragEnded => {
                self.scroll_to_indicator_if_needed(true);
                if !self.host.is_decelerating() {
                    let due = self.tasks.settle();
                    self.run_tasks(due);
                }
            }
            ScrollSignal::ScrollSettled => {
                let due = self.tasks.settle();
                self.run_tasks(due);
            }
        }
    }

    /// Offset written during a user drag
    fn did_scroll(&mut self, offset: Point) {
        // Empty tables report a content height of 1
        if self.host.content_size().height <= 1.0 || self.state.loading() {
            return;
        }

        let action_y = InsetReconciler::content_end(&self.host, &self.state) - self.state.trigger_offset;
        if offset.y <= action_y {
            return;
        }
        if self.state.hidden {
            tracing::trace!(y = offset.y, "threshold crossed while hidden");
            return;
        }

        tracing::debug!(y = offset.y, action_y, "infinite scroll triggered");
        self.start_animating();
    }

    fn start_animating(&mut self) {
        self.position_indicator(self.host.content_size());
        self.indicator.show(&mut self.host);

        let row_height = self.row_height();
        let change = InsetReconciler::grow_for_loading(&mut self.host, &mut self.state, row_height);
        self.state.phase.send(LoadEvent::Trigger);

        self.animate_inset(change, InsetAnimation::Reveal);
        self.schedule_handler();
    }

    fn finish(&mut self, completion: Option<FinishHandler<H>>) {
        if !self.state.loading() {
            tracing::debug!("finish ignored while idle");
            return;
        }

        self.finish_handlers.extend(completion);
        if self.finishing {
            return;
        }
        self.finishing = true;

        // Measure appended rows before the inset changes
        self.host.refresh_content_size();
        let change = InsetReconciler::shrink_after_loading(&mut self.host, &mut self.state);
        self.animate_inset(change, InsetAnimation::Conceal);
    }

    fn animate_inset(&mut self, change: InsetChange, tag: InsetAnimation) {
        if self.inset_animation.duration <= 0.0 {
            self.animations.cancel(BOTTOM_INSET);
            self.host.present_bottom_inset(change.to);
            self.inset_animation_ended(tag, true);
            return;
        }

        self.animations.animate(
            BOTTOM_INSET,
            change.from,
            change.to,
            self.inset_animation,
            tag,
        );
    }

    fn inset_animation_ended(&mut self, tag: InsetAnimation, finished: bool) {
        match tag {
            InsetAnimation::Reveal => {
                if finished {
                    self.scroll_to_indicator_if_needed(true);
                }
            }
            InsetAnimation::Conceal => {
                if finished {
                    self.scroll_to_indicator_if_needed(false);
                }

                self.indicator.hide();
                self.state.phase.send(LoadEvent::Finished);
                self.finishing = false;

                for completion in std::mem::take(&mut self.finish_handlers) {
                    completion(&mut self.host);
                }
            }
        }
    }

    /// Snap away from an indicator row that is only partly visible
    fn scroll_to_indicator_if_needed(&mut self, reveal: bool) {
        if self.host.is_dragging() || !self.state.loading() || !self.state.initialized {
            return;
        }

        let min_y = InsetReconciler::content_end(&self.host, &self.state);
        let max_y = min_y + self.row_height();

        let offset = self.host.content_offset();
        if offset.y > min_y && offset.y < max_y {
            let y = if reveal { max_y } else { min_y };
            tracing::debug!(from = offset.y, to = y, reveal, "snapping to indicator row");
            self.host.set_content_offset(offset.with_y(y));
        }
    }

    fn position_indicator(&mut self, content_size: Size) {
        let extent = InsetReconciler::clamp_extent(&self.host, &self.state, content_size.height);
        let row_height = self.row_height();
        self.indicator
            .position(&mut self.host, content_size.width, extent, row_height);
    }

    fn row_height(&mut self) -> f32 {
        self.indicator
            .row_height(&mut self.host, self.state.indicator_margin)
    }

    fn schedule_handler(&mut self) {
        if let Some(id) = self.pending_call.take() {
            self.tasks.cancel(id);
        }

        let trigger = if !self.state.defer_callback_while_scrolling {
            TaskTrigger::NextTurn
        } else {
            match self.state.defer_policy {
                DeferPolicy::AfterDelay { delay_ms } => TaskTrigger::After {
                    delay: Duration::from_millis(delay_ms),
                    wait_for_idle: true,
                },
                DeferPolicy::ScrollSettled => TaskTrigger::ScrollSettled,
            }
        };

        self.pending_call = Some(self.tasks.schedule(DeferredCall::LoadHandler, trigger));
    }

    fn run_tasks(&mut self, due: Vec<(TaskId, DeferredCall)>) {
        for (id, call) in due {
            if self.pending_call == Some(id) {
                self.pending_call = None;
            }
            match call {
                DeferredCall::LoadHandler => self.call_handler(),
            }
        }
    }

    fn call_handler(&mut self) {
        let Some(mut handler) = self.handler.take() else {
            tracing::debug!("no load handler installed");
            return;
        };

        let mut request = LoadRequest {
            host: &mut self.host,
            finish: false,
            completions: Vec::new(),
        };
        handler(&mut request);
        let LoadRequest {
            finish,
            completions,
            ..
        } = request;

        self.handler = Some(handler);

        if finish {
            self.finish_handlers.extend(completions);
            self.finish(None);
        }
    }
}
