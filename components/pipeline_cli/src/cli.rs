//! Command-line arguments

use clap::Parser;
use core_types::Value;
use pipeline::PipelineConfig;
use std::time::Duration;

/// Run the delayed doubling pipeline or the lookup chain demo
#[derive(Debug, Parser)]
#[command(name = "delayed-pipeline", version, about)]
pub struct Cli {
    /// Numbers to double (defaults to 1 2 3)
    #[arg(value_name = "VALUES", allow_negative_numbers = true)]
    pub values: Vec<f64>,

    /// Pass a raw string instead of a number sequence
    #[arg(long, value_name = "STRING", conflicts_with = "values")]
    pub raw: Option<String>,

    /// Delay before the transform runs, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 2000)]
    pub settle_delay_ms: u64,

    /// Delay between settlement and the Waiting line, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 2000)]
    pub log_delay_ms: u64,

    /// Use virtual time instead of sleeping
    #[arg(long)]
    pub virtual_time: bool,

    /// Run the place lookup chain for LOCATION instead
    #[arg(long, value_name = "LOCATION", conflicts_with_all = ["values", "raw"])]
    pub chain: Option<String>,

    /// Increase diagnostic output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The pipeline input described by the arguments.
    pub fn input(&self) -> Value {
        if let Some(raw) = &self.raw {
            return Value::String(raw.clone());
        }
        let values = if self.values.is_empty() {
            vec![1.0, 2.0, 3.0]
        } else {
            self.values.clone()
        };
        Value::Array(values.into_iter().map(Value::from_number).collect())
    }

    /// Pipeline delays from the arguments.
    pub fn config(&self) -> PipelineConfig {
        PipelineConfig::default()
            .with_settle_delay(Duration::from_millis(self.settle_delay_ms))
            .with_log_delay(Duration::from_millis(self.log_delay_ms))
    }
}
