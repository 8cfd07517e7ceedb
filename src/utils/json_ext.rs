//! JSON inspection helpers for decode diagnostics.
//!
//! Payload validation reports what it *found* when a shape check fails, so
//! error messages read "expected object, found string" instead of a bare
//! rejection. [`json_type_name`] is the single source of those names.

use serde_json::Value;

/// Human-readable type name of a JSON value, as used in decode errors.
///
/// # Examples
///
/// ```rust
/// use mirrorgraph::utils::json_ext::json_type_name;
/// use serde_json::json;
///
/// assert_eq!(json_type_name(&json!({"a": 1})), "object");
/// assert_eq!(json_type_name(&json!("hi")), "string");
/// assert_eq!(json_type_name(&json!(null)), "null");
/// ```
#[must_use]
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
