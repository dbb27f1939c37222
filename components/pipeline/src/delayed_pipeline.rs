//! Delayed transform with promise settlement.
//!
//! Timeline of one run with the default config:
//!
//! ```text
//! t=0     run() returns a pending promise
//! t=2000  transform runs, promise settles, Waiting timer is scheduled
//! t=4000  "Waiting" is written to the console
//! ```

use crate::config::PipelineConfig;
use crate::console::Console;
use crate::transform::callback_transform;
use async_runtime::{FulfillHandler, Promise, RejectHandler, Scheduler, Task};
use core_types::{JsError, Value};
use tracing::{debug, info, warn};

/// Rejection message used when the transform yields no result.
pub const NULL_RESULT_MESSAGE: &str = "Callback Function Returned Null";

/// Line written once after every settlement.
pub const WAITING_MESSAGE: &str = "Waiting";

/// Runs the doubling transform after a delay and settles a promise with it.
///
/// A pipeline instance runs once; see [`DelayedPipeline::run`].
#[derive(Debug)]
pub struct DelayedPipeline {
    scheduler: Scheduler,
    console: Console,
    config: PipelineConfig,
    outcome: Option<Promise>,
}

impl DelayedPipeline {
    /// Creates a pipeline scheduling on `scheduler` and logging to `console`.
    pub fn new(scheduler: Scheduler, console: Console) -> Self {
        Self {
            scheduler,
            console,
            config: PipelineConfig::default(),
            outcome: None,
        }
    }

    /// Replace the default delays
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// The outcome of the run, once `run` has been called.
    pub fn outcome(&self) -> Option<&Promise> {
        self.outcome.as_ref()
    }

    /// Starts the pipeline and returns its pending outcome immediately.
    ///
    /// After `settle_delay` the input is doubled. The outcome fulfills with
    /// the doubled array, or rejects with [`NULL_RESULT_MESSAGE`] when the
    /// transform fails. The same timer callback then schedules the
    /// [`WAITING_MESSAGE`] line `log_delay` later, so the line always follows
    /// settlement.
    ///
    /// Calling `run` again returns the first outcome and schedules nothing.
    pub fn run(&mut self, input: Value) -> Promise {
        if let Some(outcome) = &self.outcome {
            warn!("pipeline already ran; returning existing outcome");
            return outcome.clone();
        }

        let outcome = self.scheduler.new_promise();
        self.outcome = Some(outcome.clone());

        let settle = outcome.clone();
        let scheduler = self.scheduler.clone();
        let console = self.console.clone();
        let log_delay = self.config.log_delay;

        self.scheduler.set_timeout(
            self.config.settle_delay,
            Task::labeled("pipeline-settle", move || {
                match callback_transform(&input) {
                    Some(doubled) => {
                        debug!(len = doubled.len(), "transform succeeded");
                        settle.resolve(Value::Array(doubled));
                    }
                    None => {
                        info!("transform returned no result; rejecting");
                        settle.reject(JsError::error(NULL_RESULT_MESSAGE));
                    }
                }

                scheduler.set_timeout(
                    log_delay,
                    Task::labeled("pipeline-waiting", move || {
                        console.log_str(WAITING_MESSAGE);
                        Ok(Value::Undefined)
                    }),
                );
                Ok(Value::Undefined)
            }),
        );

        outcome
    }

    /// Runs the pipeline and logs its outcome.
    ///
    /// The doubled array or the rejection message is written to the console
    /// as soon as the outcome settles.
    pub fn run_and_report(&mut self, input: Value) -> Promise {
        let outcome = self.run(input);

        let on_value = self.console.clone();
        let on_error = self.console.clone();
        outcome
            .then(
                Some(FulfillHandler::new(move |value| {
                    on_value.log(&value);
                    Ok(Value::Undefined)
                })),
                None,
            )
            .catch(RejectHandler::new(move |error| {
                on_error.log_str(&error.message);
                Ok(Value::Undefined)
            }));

        outcome
    }
}
