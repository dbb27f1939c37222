//! Delayed transform pipelines on top of the async runtime.
//!
//! - [`DelayedPipeline`] - doubles a sequence after a delay, settles a
//!   promise with the result and logs `Waiting` once afterwards
//! - [`LookupChain`] - two dependent asynchronous lookups with a single
//!   failure handler
//! - [`Console`] - the line-oriented output channel both write to
//! - [`PipelineConfig`] - delays used by the pipeline
//!
//! # Examples
//!
//! ```
//! use async_runtime::{EventLoop, ManualClock};
//! use core_types::Value;
//! use pipeline::{Console, DelayedPipeline};
//! use std::sync::Arc;
//!
//! let mut event_loop = EventLoop::with_clock(Arc::new(ManualClock::new()));
//! let (console, lines) = Console::capture();
//! let mut pipeline = DelayedPipeline::new(event_loop.scheduler(), console);
//!
//! pipeline.run_and_report(Value::Array(vec![Value::Smi(1), Value::Smi(2), Value::Smi(3)]));
//! event_loop.run_until_done().unwrap();
//!
//! assert_eq!(*lines.lock(), vec!["[ 2, 4, 6 ]", "Waiting"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod console;
pub mod delayed_pipeline;
pub mod lookup_chain;
pub mod transform;

pub use config::PipelineConfig;
pub use console::{CaptureWriter, Console, ConsoleWriter, StdoutWriter};
pub use delayed_pipeline::{DelayedPipeline, NULL_RESULT_MESSAGE, WAITING_MESSAGE};
pub use lookup_chain::{DirectoryLookup, Lookup, LookupChain};
pub use transform::{callback_transform, double_all};
