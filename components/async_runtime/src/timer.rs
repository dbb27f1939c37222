//! Pending timers ordered by deadline.

use crate::task_queue::Task;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::Duration;

/// Handle returned by `set_timeout`, usable to clear the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Min-heap of timers keyed by `(deadline, id)`.
///
/// Ids increase monotonically, so timers sharing a deadline fire in the
/// order they were scheduled.
#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<(Duration, TimerId)>>,
    pending: HashMap<TimerId, Task>,
    next_id: u64,
}

impl TimerQueue {
    /// Creates an empty timer queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `task` to become runnable at `deadline`.
    pub fn schedule(&mut self, deadline: Duration, task: Task) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.heap.push(Reverse((deadline, id)));
        self.pending.insert(id, task);
        id
    }

    /// Removes a timer that has not fired yet. Returns false if it already
    /// fired or was cleared.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        // Heap entry is discarded lazily.
        self.pending.remove(&id).is_some()
    }

    /// Earliest deadline among live timers.
    pub fn next_deadline(&mut self) -> Option<Duration> {
        while let Some(&Reverse((deadline, id))) = self.heap.peek() {
            if self.pending.contains_key(&id) {
                return Some(deadline);
            }
            self.heap.pop();
        }
        None
    }

    /// Pops the next timer whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<Task> {
        loop {
            let Reverse((deadline, id)) = *self.heap.peek()?;
            if deadline > now {
                return None;
            }
            self.heap.pop();
            if let Some(task) = self.pending.remove(&id) {
                return Some(task);
            }
        }
    }

    /// Number of live timers.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if no live timers remain.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
