//! Whitespace normalization for values coming from the grid widget.

use crate::database::value::Value;

/// Strips leading and trailing whitespace from text; other values pass through unchanged.
pub fn trim(value: &Value) -> Value {
    match value {
        Value::Text(text) => Value::Text(text.trim().to_owned()),
        other => other.clone(),
    }
}

/// Applies [`trim`] to every element, keeping order and length.
pub fn trim_all(values: &[Value]) -> Vec<Value> {
    values.iter().map(trim).collect()
}
