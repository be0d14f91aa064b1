//! Deferred task queue
//!
//! Work that must run "later" on the UI thread is queued here under a
//! cancelable [`TaskId`] instead of being fired from a timer. The owner
//! advances the queue once per event-loop turn and runs whatever comes due.
//!
//! Tasks only fire from [`TaskQueue::advance`] and [`TaskQueue::settle`],
//! never during [`TaskQueue::schedule`], so a task can't run re-entrantly
//! inside the code that scheduled it.

use std::time::Duration;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle for a queued task
    pub struct TaskId;
}

/// When a queued task becomes due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskTrigger {
    /// On the next turn, even while the user is interacting
    NextTurn,
    /// Once `delay` has elapsed; with `wait_for_idle` the task also holds
    /// back while the host is tracking a gesture or decelerating
    After { delay: Duration, wait_for_idle: bool },
    /// When scrolling comes to rest
    ScrollSettled,
}

struct QueuedTask<T> {
    payload: T,
    trigger: TaskTrigger,
    elapsed: Duration,
    seq: u64,
}

impl<T> QueuedTask<T> {
    fn is_due(&self, tracking: bool) -> bool {
        match self.trigger {
            TaskTrigger::NextTurn => true,
            TaskTrigger::After {
                delay,
                wait_for_idle,
            } => self.elapsed >= delay && !(wait_for_idle && tracking),
            TaskTrigger::ScrollSettled => !tracking,
        }
    }
}

/// Queue of deferred tasks carrying a payload of type `T`
pub struct TaskQueue<T> {
    tasks: SlotMap<TaskId, QueuedTask<T>>,
    next_seq: u64,
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self {
            tasks: SlotMap::with_key(),
            next_seq: 0,
        }
    }

    /// Queue a task
    pub fn schedule(&mut self, payload: T, trigger: TaskTrigger) -> TaskId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = self.tasks.insert(QueuedTask {
            payload,
            trigger,
            elapsed: Duration::ZERO,
            seq,
        });
        tracing::trace!(?id, ?trigger, "task scheduled");
        id
    }

    /// Cancel a queued task, returning its payload if it had not run yet
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        let task = self.tasks.remove(id)?;
        tracing::trace!(?id, "task cancelled");
        Some(task.payload)
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Advance time by `dt` and remove every task that is now due
    ///
    /// `tracking` reports whether the host is in the middle of a user
    /// interaction. Due tasks are returned in scheduling order.
    pub fn advance(&mut self, dt: Duration, tracking: bool) -> Vec<(TaskId, T)> {
        for task in self.tasks.values_mut() {
            task.elapsed += dt;
        }
        self.take_where(|task| task.is_due(tracking))
    }

    /// Scrolling came to rest: release every [`TaskTrigger::ScrollSettled`] task
    pub fn settle(&mut self) -> Vec<(TaskId, T)> {
        self.take_where(|task| task.trigger == TaskTrigger::ScrollSettled)
    }

    fn take_where(&mut self, due: impl Fn(&QueuedTask<T>) -> bool) -> Vec<(TaskId, T)> {
        let mut ready: Vec<(u64, TaskId)> = self
            .tasks
            .iter()
            .filter(|(_, task)| due(task))
            .map(|(id, task)| (task.seq, id))
            .collect();
        ready.sort_unstable_by_key(|(seq, _)| *seq);

        ready
            .into_iter()
            .filter_map(|(_, id)| self.tasks.remove(id).map(|task| (id, task.payload)))
            .collect()
    }
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_next_turn_fires_while_tracking() {
        let mut queue = TaskQueue::new();
        queue.schedule("load", TaskTrigger::NextTurn);

        let due = queue.advance(FRAME, true);
        assert_eq!(due.len(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_delay_waits_for_idle() {
        let mut queue = TaskQueue::new();
        let id = queue.schedule(
            "load",
            TaskTrigger::After {
                delay: Duration::from_millis(100),
                wait_for_idle: true,
            },
        );

        // Delay elapses during the drag but the task holds back
        for _ in 0..10 {
            assert!(queue.advance(FRAME, true).is_empty());
        }
        assert!(queue.is_pending(id));

        let due = queue.advance(FRAME, false);
        assert_eq!(due, vec![(id, "load")]);
    }

    #[test]
    fn test_delay_without_idle_requirement() {
        let mut queue = TaskQueue::new();
        queue.schedule(
            1u32,
            TaskTrigger::After {
                delay: Duration::from_millis(40),
                wait_for_idle: false,
            },
        );

        assert!(queue.advance(FRAME, true).is_empty());
        assert!(queue.advance(FRAME, true).is_empty());
        assert_eq!(queue.advance(FRAME, true).len(), 1);
    }

    #[test]
    fn test_settle_releases_only_settled_tasks() {
        let mut queue = TaskQueue::new();
        let settled = queue.schedule('s', TaskTrigger::ScrollSettled);
        let delayed = queue.schedule(
            'd',
            TaskTrigger::After {
                delay: Duration::from_secs(1),
                wait_for_idle: true,
            },
        );

        assert_eq!(queue.settle(), vec![(settled, 's')]);
        assert!(queue.is_pending(delayed));
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut queue = TaskQueue::new();
        let id = queue.schedule((), TaskTrigger::NextTurn);

        assert_eq!(queue.cancel(id), Some(()));
        assert_eq!(queue.cancel(id), None);
        assert!(queue.advance(FRAME, false).is_empty());
    }

    #[test]
    fn test_due_tasks_come_out_in_schedule_order() {
        let mut queue = TaskQueue::new();
        for n in 0..5 {
            queue.schedule(n, TaskTrigger::NextTurn);
        }

        let order: Vec<i32> = queue
            .advance(FRAME, false)
            .into_iter()
            .map(|(_, n)| n)
            .collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }
}
