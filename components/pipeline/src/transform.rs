//! The element-wise doubling transform.

use core_types::{JsError, Value};
use tracing::debug;

/// Doubles every element of an array, preserving order.
///
/// # Errors
///
/// `TypeError` when `input` is not an array or an element is not a number.
///
/// # Examples
///
/// ```
/// use core_types::Value;
/// use pipeline::double_all;
///
/// let doubled = double_all(&Value::Array(vec![Value::Smi(1), Value::Double(1.5)])).unwrap();
/// assert_eq!(doubled, vec![Value::Smi(2), Value::Double(3.0)]);
///
/// assert!(double_all(&Value::Null).is_err());
/// ```
pub fn double_all(input: &Value) -> Result<Vec<Value>, JsError> {
    let Value::Array(items) = input else {
        return Err(JsError::type_error(format!(
            "{} is not an array",
            describe(input)
        )));
    };
    items.iter().map(double).collect()
}

/// Runs [`double_all`], collapsing any failure into `None`.
pub fn callback_transform(input: &Value) -> Option<Vec<Value>> {
    match double_all(input) {
        Ok(doubled) => Some(doubled),
        Err(error) => {
            debug!(%error, "transform failed");
            None
        }
    }
}

fn double(value: &Value) -> Result<Value, JsError> {
    match value {
        Value::Smi(n) => Ok(n
            .checked_mul(2)
            .map_or_else(|| Value::Double(f64::from(*n) * 2.0), Value::Smi)),
        Value::Double(n) => Ok(Value::Double(n * 2.0)),
        other => Err(JsError::type_error(format!(
            "cannot double {}",
            describe(other)
        ))),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", s),
        Value::Undefined | Value::Null => value.to_string(),
        other => other.type_of().to_string(),
    }
}
