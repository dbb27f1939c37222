//! Task and microtask queue management.
//!
//! Tasks are executed one at a time, with all microtasks draining after each
//! task. Timer callbacks become tasks once their deadline passes.

use core_types::{JsError, Value};
use std::collections::VecDeque;
use std::fmt;

type Callback = Box<dyn FnOnce() -> Result<Value, JsError> + Send>;

/// A task to be executed by the event loop.
///
/// Tasks represent work to be done in a later iteration of the event loop,
/// such as an expired timer callback.
pub struct Task {
    label: &'static str,
    callback: Callback,
}

impl Task {
    /// Creates a new Task from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() -> Result<Value, JsError> + Send + 'static,
    {
        Self::labeled("task", f)
    }

    /// Creates a new Task with a label that shows up in trace output.
    pub fn labeled<F>(label: &'static str, f: F) -> Self
    where
        F: FnOnce() -> Result<Value, JsError> + Send + 'static,
    {
        Self {
            label,
            callback: Box::new(f),
        }
    }

    /// The label given at construction.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Executes the task.
    pub fn run(self) -> Result<Value, JsError> {
        (self.callback)()
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Task {{ label: {:?}, .. }}", self.label)
    }
}

/// A microtask to be executed by the event loop.
///
/// Microtasks run after each task; promise reactions are microtasks.
pub struct MicroTask {
    callback: Callback,
}

impl MicroTask {
    /// Creates a new MicroTask from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() -> Result<Value, JsError> + Send + 'static,
    {
        Self {
            callback: Box::new(f),
        }
    }

    /// Executes the microtask.
    pub fn run(self) -> Result<Value, JsError> {
        (self.callback)()
    }
}

impl fmt::Debug for MicroTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MicroTask {{ .. }}")
    }
}

/// A FIFO queue of runnable work.
#[derive(Debug)]
pub struct Queue<T> {
    queue: VecDeque<T>,
}

/// Queue of tasks, processed one per event loop turn.
pub type TaskQueue = Queue<Task>;

/// Queue of microtasks, drained completely after each task.
pub type MicrotaskQueue = Queue<MicroTask>;

impl<T> Queue<T> {
    /// Creates a new empty queue.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Adds an item to the end of the queue.
    pub fn enqueue(&mut self, item: T) {
        self.queue.push_back(item);
    }

    /// Removes and returns the oldest item.
    pub fn dequeue(&mut self) -> Option<T> {
        self.queue.pop_front()
    }

    /// Returns true if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the number of queued items.
    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}
