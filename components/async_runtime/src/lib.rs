//! Single-threaded async runtime.
//!
//! This crate provides the pieces needed to run delayed, promise-driven
//! work on one thread:
//! - Event loop with timer, task and microtask queues
//! - Promise with write-once settlement and chained reactions
//! - Pluggable clocks (wall-clock or manually advanced virtual time)
//!
//! # Overview
//!
//! - [`EventLoop`] - Main event loop coordinating task execution
//! - [`Scheduler`] - Handle for queueing timers and tasks from inside the loop
//! - [`Promise`] - Deferred single-settlement value
//! - [`Clock`] - Time source driving timers
//!
//! # Examples
//!
//! ## Timer and Promise Usage
//!
//! ```
//! use async_runtime::{EventLoop, FulfillHandler, ManualClock, Task};
//! use core_types::Value;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let mut event_loop = EventLoop::with_clock(Arc::new(ManualClock::new()));
//! let scheduler = event_loop.scheduler();
//! let promise = scheduler.new_promise();
//!
//! let settle = promise.clone();
//! scheduler.set_timeout(
//!     Duration::from_millis(2000),
//!     Task::new(move || {
//!         settle.resolve(Value::Smi(42));
//!         Ok(Value::Undefined)
//!     }),
//! );
//! let doubled = promise.then(
//!     Some(FulfillHandler::new(|v| Ok(Value::from_number(v.as_number().unwrap_or(0.0) * 2.0)))),
//!     None,
//! );
//!
//! event_loop.run_until_done().unwrap();
//! assert_eq!(doubled.result(), Some(Value::Smi(84)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod event_loop;
pub mod promise;
pub mod task_queue;
pub mod timer;

// Re-export main types at crate root
pub use clock::{Clock, ManualClock, SystemClock};
pub use event_loop::{EventLoop, Scheduler};
pub use promise::{
    FulfillHandler, Promise, PromiseReaction, PromiseState, RejectHandler, Settlement,
};
pub use task_queue::{MicroTask, MicrotaskQueue, Queue, Task, TaskQueue};
pub use timer::{TimerId, TimerQueue};
