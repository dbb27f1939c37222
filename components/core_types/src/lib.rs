//! Core value types and error handling shared by the runtime crates.
//!
//! # Overview
//!
//! - [`Value`] - Tagged representation of the values flowing through promises
//!   and tasks
//! - [`JsError`] - Errors carried by rejected promises and failing tasks
//! - [`ErrorKind`] - Types of errors
//!
//! # Examples
//!
//! ```
//! use core_types::{Value, JsError, ErrorKind};
//!
//! let num = Value::Smi(42);
//! assert!(num.is_truthy());
//! assert_eq!(num.type_of(), "number");
//!
//! let error = JsError::type_error("undefined is not an array");
//! assert!(matches!(error.kind, ErrorKind::TypeError));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod value;

pub use error::{ErrorKind, JsError};
pub use value::Value;
