//! Animation scheduler
//!
//! Owns every running transition and advances them each frame. Transitions
//! are grouped by channel (one animated property each); starting a
//! transition on a busy channel interrupts the running one, which then
//! starts the new transition from its current presented value.
//!
//! Completions are delivered from [`AnimationScheduler::tick`] only, never
//! synchronously from [`AnimationScheduler::animate`], so completion
//! handlers always run on a later turn than the code that started them.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::transition::{AnimationSpec, Tween};

new_key_type! {
    pub struct AnimationId;
}

/// Identifier for an animated property
pub type ChannelId = u32;

struct Running<T> {
    channel: ChannelId,
    tween: Tween,
    tag: T,
}

/// Report for a transition that ended
#[derive(Clone, Debug, PartialEq)]
pub struct Completion<T> {
    pub id: AnimationId,
    pub channel: ChannelId,
    pub tag: T,
    /// False when the transition was interrupted before reaching its target
    pub finished: bool,
}

/// Output of one scheduler tick
#[derive(Debug)]
pub struct Frame<T> {
    /// Presented value of each channel that was animating this frame
    pub values: SmallVec<[(ChannelId, f32); 2]>,
    /// Transitions that ended since the previous tick
    pub completions: Vec<Completion<T>>,
}

impl<T> Frame<T> {
    pub fn value(&self, channel: ChannelId) -> Option<f32> {
        self.values
            .iter()
            .find(|(c, _)| *c == channel)
            .map(|(_, v)| *v)
    }
}

/// The animation scheduler that ticks all active transitions
pub struct AnimationScheduler<T> {
    animations: SlotMap<AnimationId, Running<T>>,
    interrupted: Vec<Completion<T>>,
}

impl<T> AnimationScheduler<T> {
    pub fn new() -> Self {
        Self {
            animations: SlotMap::with_key(),
            interrupted: Vec::new(),
        }
    }

    /// Start a transition on `channel`
    ///
    /// If the channel is already animating, the running transition is
    /// interrupted and `from` is replaced by its current presented value.
    pub fn animate(
        &mut self,
        channel: ChannelId,
        from: f32,
        to: f32,
        spec: AnimationSpec,
        tag: T,
    ) -> AnimationId {
        let tween = match self.interrupt(channel) {
            Some(mut previous) => {
                previous.retarget(to, spec);
                previous
            }
            None => Tween::new(from, to, spec),
        };

        let from = tween.value();
        let id = self.animations.insert(Running { channel, tween, tag });
        tracing::trace!(?id, channel, from, to, "transition started");
        id
    }

    /// Stop the transition on `channel`; its completion is reported on the next tick
    pub fn cancel(&mut self, channel: ChannelId) -> bool {
        self.interrupt(channel).is_some()
    }

    /// Current presented value of `channel`, if it is animating
    pub fn value(&self, channel: ChannelId) -> Option<f32> {
        self.find(channel).map(|id| self.animations[id].tween.value())
    }

    pub fn is_animating(&self, channel: ChannelId) -> bool {
        self.find(channel).is_some()
    }

    /// Check if any transitions are running or completions are waiting
    pub fn has_active_animations(&self) -> bool {
        !self.animations.is_empty() || !self.interrupted.is_empty()
    }

    /// Number of running transitions
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Advance every transition by `dt` seconds
    pub fn tick(&mut self, dt: f32) -> Frame<T> {
        let mut frame = Frame {
            values: SmallVec::new(),
            completions: std::mem::take(&mut self.interrupted),
        };

        let mut done: SmallVec<[AnimationId; 2]> = SmallVec::new();
        for (id, running) in self.animations.iter_mut() {
            running.tween.advance(dt);
            frame.values.push((running.channel, running.tween.value()));
            if running.tween.is_finished() {
                done.push(id);
            }
        }

        for id in done {
            if let Some(running) = self.animations.remove(id) {
                tracing::trace!(?id, channel = running.channel, "transition finished");
                frame.completions.push(Completion {
                    id,
                    channel: running.channel,
                    tag: running.tag,
                    finished: true,
                });
            }
        }

        frame
    }

    fn find(&self, channel: ChannelId) -> Option<AnimationId> {
        self.animations
            .iter()
            .find(|(_, running)| running.channel == channel)
            .map(|(id, _)| id)
    }

    /// Remove the running transition on `channel`, returning its tween
    fn interrupt(&mut self, channel: ChannelId) -> Option<Tween> {
        let id = self.find(channel)?;
        let running = self.animations.remove(id)?;
        tracing::trace!(?id, channel, value = running.tween.value(), "transition interrupted");
        self.interrupted.push(Completion {
            id,
            channel,
            tag: running.tag,
            finished: false,
        });
        Some(running.tween)
    }
}

impl<T> Default for AnimationScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;

    const INSET: ChannelId = 0;
    const OPACITY: ChannelId = 1;

    fn linear(duration: f32) -> AnimationSpec {
        AnimationSpec::new(duration, Easing::Linear)
    }

    #[test]
    fn test_completion_reported_once_when_finished() {
        let mut scheduler = AnimationScheduler::new();
        scheduler.animate(INSET, 0.0, 44.0, linear(0.3), "grow");

        let frame = scheduler.tick(0.1);
        assert!(frame.completions.is_empty());
        assert!((frame.value(INSET).unwrap() - 44.0 / 3.0).abs() < 1e-3);

        let frame = scheduler.tick(0.25);
        assert_eq!(frame.value(INSET), Some(44.0));
        assert_eq!(frame.completions.len(), 1);
        assert!(frame.completions[0].finished);
        assert_eq!(frame.completions[0].tag, "grow");

        let frame = scheduler.tick(0.1);
        assert!(frame.completions.is_empty());
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_new_transition_interrupts_from_current_value() {
        let mut scheduler = AnimationScheduler::new();
        scheduler.animate(INSET, 0.0, 100.0, linear(1.0), "grow");
        scheduler.tick(0.5);

        // `from` is ignored: the channel is busy at 50
        scheduler.animate(INSET, 100.0, 0.0, linear(1.0), "shrink");
        assert_eq!(scheduler.value(INSET), Some(50.0));
        assert_eq!(scheduler.len(), 1);

        let frame = scheduler.tick(0.0);
        assert_eq!(frame.completions.len(), 1);
        assert_eq!(frame.completions[0].tag, "grow");
        assert!(!frame.completions[0].finished);

        let frame = scheduler.tick(0.5);
        assert_eq!(frame.value(INSET), Some(25.0));
    }

    #[test]
    fn test_channels_are_independent() {
        let mut scheduler = AnimationScheduler::new();
        scheduler.animate(INSET, 0.0, 10.0, linear(0.2), 'i');
        scheduler.animate(OPACITY, 0.0, 1.0, linear(0.4), 'o');

        let frame = scheduler.tick(0.2);
        let tags: Vec<char> = frame.completions.iter().map(|c| c.tag).collect();
        assert_eq!(tags, vec!['i']);
        assert!(scheduler.is_animating(OPACITY));
        assert!(!scheduler.is_animating(INSET));
    }

    #[test]
    fn test_cancel_reports_unfinished_on_next_tick() {
        let mut scheduler = AnimationScheduler::new();
        scheduler.animate(INSET, 0.0, 10.0, linear(1.0), ());

        assert!(scheduler.cancel(INSET));
        assert!(!scheduler.cancel(INSET));
        assert!(scheduler.has_active_animations());

        let frame = scheduler.tick(0.016);
        assert_eq!(frame.completions.len(), 1);
        assert!(!frame.completions[0].finished);
        assert!(frame.value(INSET).is_none());
    }
}
