//! Runtime orchestration
//!
//! The Runtime owns the event loop and console and drives one pipeline or
//! lookup chain to completion.

use crate::error::CliResult;
use async_runtime::{EventLoop, ManualClock, Promise};
use core_types::Value;
use pipeline::{Console, DelayedPipeline, DirectoryLookup, LookupChain, PipelineConfig};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Drives pipelines on a private event loop
pub struct Runtime {
    /// Event loop for timers and promise reactions
    event_loop: EventLoop,
    /// Output channel for results and the Waiting line
    console: Console,
    /// Delays applied to pipelines and lookups
    config: PipelineConfig,
}

impl Runtime {
    /// Create a new runtime instance
    ///
    /// # Arguments
    /// * `virtual_time` - Jump over delays instead of sleeping through them
    ///
    /// # Example
    /// ```
    /// use pipeline_cli::Runtime;
    ///
    /// let runtime = Runtime::new(true);
    /// ```
    pub fn new(virtual_time: bool) -> Self {
        let event_loop = if virtual_time {
            EventLoop::with_clock(Arc::new(ManualClock::new()))
        } else {
            EventLoop::new()
        };
        Self {
            event_loop,
            console: Console::stdout(),
            config: PipelineConfig::default(),
        }
    }

    /// Write output somewhere other than stdout
    pub fn with_console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    /// Override the default delays
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Time elapsed on the runtime's clock
    pub fn now(&self) -> Duration {
        self.event_loop.now()
    }

    /// Run the doubling pipeline over `input` and wait for it to finish
    ///
    /// # Returns
    /// The settled outcome promise
    ///
    /// # Errors
    /// Returns `CliError::Runtime` if a scheduled task fails
    ///
    /// # Example
    /// ```
    /// use core_types::Value;
    /// use pipeline::Console;
    /// use pipeline_cli::Runtime;
    ///
    /// let (console, lines) = Console::capture();
    /// let mut runtime = Runtime::new(true).with_console(console);
    /// let outcome = runtime.run_pipeline(Value::Array(vec![Value::Smi(1)])).unwrap();
    ///
    /// assert_eq!(outcome.result(), Some(Value::Array(vec![Value::Smi(2)])));
    /// assert_eq!(*lines.lock(), vec!["[ 2 ]", "Waiting"]);
    /// ```
    pub fn run_pipeline(&mut self, input: Value) -> CliResult<Promise> {
        info!(input = %input, "running pipeline");
        let outcome = DelayedPipeline::new(self.event_loop.scheduler(), self.console.clone())
            .with_config(self.config.clone())
            .run_and_report(input);

        self.event_loop.run_until_done()?;
        info!(elapsed = ?self.now(), state = ?outcome.state(), "pipeline finished");
        Ok(outcome)
    }

    /// Run the place lookup chain for `location` against the built-in
    /// directory and wait for it to finish
    pub fn run_chain(&mut self, location: &str) -> CliResult<Promise> {
        info!(location, "running lookup chain");
        let chain = LookupChain::new(self.directory(), self.console.clone());
        let done = chain.run(location);

        self.event_loop.run_until_done()?;
        Ok(done)
    }

    fn directory(&self) -> DirectoryLookup {
        DirectoryLookup::new(self.event_loop.scheduler())
            .with_delay(self.config.settle_delay)
            .with_place("downtown", "Main St Pharmacy")
            .with_place("uptown", "Hilltop Chemist")
            .with_place("harbor", "Dockside Drugs")
            .with_open("Main St Pharmacy", true)
            .with_open("Hilltop Chemist", false)
    }
}
