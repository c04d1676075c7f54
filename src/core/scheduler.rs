//! Cancellable scheduled tasks.
//!
//! The game never owns a real timer. Components schedule work at a logical
//! millisecond timestamp and the host drives time forward by calling
//! `advance(now)` on whatever owns the scheduler. Whoever owns a `Scheduler`
//! owns its pending tasks: dropping or clearing it cancels them, so a callback
//! from a finished session can never fire into the next one.
//!
//! ```
//! use rap_memory::core::Scheduler;
//!
//! let mut scheduler = Scheduler::new();
//! let tick = scheduler.schedule(1_000, "tick");
//! scheduler.schedule(500, "revert");
//! scheduler.cancel(tick);
//!
//! assert_eq!(scheduler.pop_due(2_000), Some((500, "revert")));
//! assert_eq!(scheduler.pop_due(2_000), None);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Handle for a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub u64);

impl TaskId {
    /// Create a new task ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

/// Time-ordered queue of pending tasks.
///
/// Tasks due at the same instant run in the order they were scheduled.
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    /// Keyed by (due time, task id) so iteration order is firing order.
    queue: BTreeMap<(u64, TaskId), T>,
    next_id: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            queue: BTreeMap::new(),
            next_id: 0,
        }
    }
}

impl<T> Scheduler<T> {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to become due at `due_ms`.
    pub fn schedule(&mut self, due_ms: u64, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.queue.insert((due_ms, id), task);
        id
    }

    /// Cancel a pending task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let key = self.queue.keys().find(|(_, task_id)| *task_id == id).copied();
        match key {
            Some(key) => self.queue.remove(&key).is_some(),
            None => false,
        }
    }

    /// Cancel every pending task.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Remove and return the earliest task due at or before `now_ms`.
    ///
    /// Returns the task together with the time it was due, so periodic tasks
    /// can reschedule relative to their slot rather than to `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(u64, T)> {
        let (&(due, id), _) = self.queue.iter().next()?;
        if due > now_ms {
            return None;
        }
        self.queue.remove(&(due, id)).map(|task| (due, task))
    }

    /// When the next task becomes due.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Check whether a task is still pending.
    #[must_use]
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.queue.keys().any(|(_, task_id)| *task_id == id)
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
