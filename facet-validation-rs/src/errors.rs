//! Error handling for the facet validation library
//!
//! Only malformed input is an error. Schema deviations inside a well-formed
//! object are repaired and reported through the coercion log instead.

use serde_json::Value;
use thiserror::Error;

/// Result type for facet operations
pub type FacetResult<T> = Result<T, FacetError>;

/// Fatal input errors
#[derive(Error, Debug)]
pub enum FacetError {
    /// Input text is not syntactically valid JSON
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Input is valid JSON but the top-level value is not an object
    #[error("Invalid JSON: expected an object, got {0}")]
    NotAnObject(&'static str),
}

impl FacetError {
    /// Build a `NotAnObject` error describing the offending value
    pub fn not_an_object(value: &Value) -> Self {
        FacetError::NotAnObject(json_type_name(value))
    }
}

/// Human-readable JSON type name, used in diagnostics
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_an_object_message() {
        let err = FacetError::not_an_object(&json!([1, 2]));
        assert!(matches!(err, FacetError::NotAnObject("array")));
        assert_eq!(err.to_string(), "Invalid JSON: expected an object, got array");
    }

    #[test]
    fn test_invalid_json_wraps_serde_error() {
        let serde_err = serde_json::from_str::<Value>("{\"outcome\":").unwrap_err();
        let err: FacetError = serde_err.into();
        assert!(err.to_string().starts_with("Invalid JSON: "));
    }
}
