//! Error types for the CLI

use core_types::JsError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// A task or microtask failed while the event loop ran
    #[error("runtime error: {0}")]
    Runtime(#[from] JsError),

    /// Logging could not be initialised
    #[error("logging error: {0}")]
    Logging(String),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
