//! Event loop implementation.
//!
//! This module provides the single-threaded event loop that coordinates
//! timers, tasks and microtasks, plus the [`Scheduler`] handle that code
//! running inside the loop uses to queue more work.

use crate::clock::{Clock, SystemClock};
use crate::promise::Promise;
use crate::task_queue::{MicroTask, MicrotaskQueue, Task, TaskQueue};
use crate::timer::{TimerId, TimerQueue};
use core_types::JsError;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

#[derive(Debug, Default)]
struct LoopState {
    tasks: TaskQueue,
    microtasks: MicrotaskQueue,
    timers: TimerQueue,
}

#[derive(Debug)]
struct Shared {
    state: Mutex<LoopState>,
    clock: Arc<dyn Clock>,
}

/// Cloneable handle for queueing work on an [`EventLoop`].
///
/// Handles are cheap to clone and are meant to be captured by task closures,
/// which is how a timer callback schedules the next timer.
#[derive(Debug, Clone)]
pub struct Scheduler {
    shared: Arc<Shared>,
}

impl Scheduler {
    /// Current time on the loop's clock.
    pub fn now(&self) -> Duration {
        self.shared.clock.now()
    }

    /// Runs `task` as a task once at least `delay` has elapsed.
    ///
    /// Never blocks the caller.
    pub fn set_timeout(&self, delay: Duration, task: Task) -> TimerId {
        let deadline = self.now() + delay;
        let label = task.label();
        let id = self.shared.state.lock().timers.schedule(deadline, task);
        debug!(?id, label, ?delay, ?deadline, "timer scheduled");
        id
    }

    /// Clears a timer that has not fired yet.
    pub fn clear_timeout(&self, id: TimerId) -> bool {
        let cleared = self.shared.state.lock().timers.cancel(id);
        debug!(?id, cleared, "timer cleared");
        cleared
    }

    /// Adds a task to the task queue.
    pub fn enqueue_task(&self, task: Task) {
        self.shared.state.lock().tasks.enqueue(task);
    }

    /// Adds a microtask to the microtask queue.
    pub fn enqueue_microtask(&self, microtask: MicroTask) {
        self.shared.state.lock().microtasks.enqueue(microtask);
    }

    /// Creates a pending promise whose reactions run on this loop.
    pub fn new_promise(&self) -> Promise {
        Promise::new(self.clone())
    }
}

/// The event loop.
///
/// Each iteration (turn) of the loop:
/// 1. Moves expired timers into the task queue
/// 2. Takes the oldest task from the task queue and executes it
/// 3. Drains all microtasks in the microtask queue
/// 4. When nothing is runnable, advances the clock to the next timer
///
/// # Examples
///
/// ```
/// use async_runtime::{EventLoop, ManualClock, Task};
/// use core_types::Value;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let mut event_loop = EventLoop::with_clock(Arc::new(ManualClock::new()));
///
/// event_loop.set_timeout(Duration::from_millis(2000), Task::new(|| Ok(Value::Undefined)));
/// event_loop.run_until_done().unwrap();
/// assert_eq!(event_loop.now(), Duration::from_millis(2000));
/// ```
#[derive(Debug)]
pub struct EventLoop {
    shared: Arc<Shared>,
}

impl EventLoop {
    /// Creates a new EventLoop driven by wall-clock time.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock::new()))
    }

    /// Creates a new EventLoop driven by the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(LoopState::default()),
                clock,
            }),
        }
    }

    /// Returns a handle for scheduling work on this loop.
    pub fn scheduler(&self) -> Scheduler {
        Scheduler {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Current time on the loop's clock.
    pub fn now(&self) -> Duration {
        self.shared.clock.now()
    }

    /// Adds a task to the task queue.
    pub fn enqueue_task(&mut self, task: Task) {
        self.scheduler().enqueue_task(task);
    }

    /// Adds a microtask to the microtask queue.
    pub fn enqueue_microtask(&mut self, microtask: MicroTask) {
        self.scheduler().enqueue_microtask(microtask);
    }

    /// Schedules `task` to run after `delay`.
    pub fn set_timeout(&mut self, delay: Duration, task: Task) -> TimerId {
        self.scheduler().set_timeout(delay, task)
    }

    /// Returns true if the task queue is empty.
    pub fn is_task_queue_empty(&self) -> bool {
        self.shared.state.lock().tasks.is_empty()
    }

    /// Returns true if the microtask queue is empty.
    pub fn is_microtask_queue_empty(&self) -> bool {
        self.shared.state.lock().microtasks.is_empty()
    }

    /// Number of timers that have not fired yet.
    pub fn pending_timers(&self) -> usize {
        self.shared.state.lock().timers.len()
    }

    /// Runs the loop until no tasks, microtasks or timers remain.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all tasks completed successfully, or the first error a
    /// task or microtask returned.
    pub fn run_until_done(&mut self) -> Result<(), JsError> {
        loop {
            self.process_one_cycle()?;

            if self.has_runnable_work() {
                continue;
            }

            let next = self.shared.state.lock().timers.next_deadline();
            match next {
                Some(deadline) => {
                    trace!(?deadline, "advancing clock to next timer");
                    self.shared.clock.advance_to(deadline);
                }
                None => return Ok(()),
            }
        }
    }

    /// Runs all microtasks in the queue until empty.
    ///
    /// Microtasks added during execution are also processed before this
    /// method returns.
    pub fn run_all_microtasks(&mut self) -> Result<(), JsError> {
        loop {
            // Lock must be released before running: microtasks enqueue more.
            let next = self.shared.state.lock().microtasks.dequeue();
            match next {
                Some(microtask) => {
                    microtask.run()?;
                }
                None => return Ok(()),
            }
        }
    }

    /// Processes one complete cycle: expired timers are promoted, one task
    /// runs, then all microtasks drain.
    pub fn process_one_cycle(&mut self) -> Result<(), JsError> {
        self.promote_due_timers();

        let task = self.shared.state.lock().tasks.dequeue();
        if let Some(task) = task {
            trace!(label = task.label(), "running task");
            task.run()?;
        }

        self.run_all_microtasks()
    }

    fn promote_due_timers(&self) {
        let now = self.now();
        let mut state = self.shared.state.lock();
        while let Some(task) = state.timers.pop_due(now) {
            trace!(label = task.label(), ?now, "timer fired");
            state.tasks.enqueue(task);
        }
    }

    fn has_runnable_work(&self) -> bool {
        let state = self.shared.state.lock();
        !state.tasks.is_empty() || !state.microtasks.is_empty()
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}
