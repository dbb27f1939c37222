//! Delayed Pipeline CLI Library
//!
//! Provides the Runtime struct and supporting modules for the
//! `delayed-pipeline` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod error;
pub mod logging;
pub mod runtime;

pub use cli::Cli;
pub use error::{CliError, CliResult};
pub use runtime::Runtime;
