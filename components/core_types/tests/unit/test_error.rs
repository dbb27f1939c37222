//! Unit tests for JsError and ErrorKind

use core_types::{ErrorKind, JsError};

#[cfg(test)]
mod error_kind_tests {
    use super::*;

    #[test]
    fn test_error_kinds_are_distinct() {
        assert_ne!(ErrorKind::Error, ErrorKind::TypeError);
        assert_ne!(ErrorKind::TypeError, ErrorKind::RangeError);
        assert_ne!(ErrorKind::RangeError, ErrorKind::InternalError);
    }
}

#[cfg(test)]
mod js_error_tests {
    use super::*;

    #[test]
    fn test_constructors_set_kind() {
        assert!(matches!(JsError::error("e").kind, ErrorKind::Error));
        assert!(matches!(JsError::type_error("e").kind, ErrorKind::TypeError));
        assert!(matches!(JsError::range_error("e").kind, ErrorKind::RangeError));
        assert!(matches!(JsError::internal("e").kind, ErrorKind::InternalError));
    }

    #[test]
    fn test_message_is_kept_verbatim() {
        let error = JsError::error("Callback Function Returned Null");
        assert_eq!(error.message, "Callback Function Returned Null");
    }

    #[test]
    fn test_display_prefixes_kind() {
        let error = JsError::type_error("string is not an array");
        assert_eq!(format!("{}", error), "TypeError: string is not an array");
    }

    #[test]
    fn test_is_std_error() {
        let error: Box<dyn std::error::Error> = Box::new(JsError::internal("boom"));
        assert_eq!(error.to_string(), "InternalError: boom");
    }

    #[test]
    fn test_clone_and_eq() {
        let error = JsError::range_error("too big");
        assert_eq!(error.clone(), error);
    }
}
