//! Cell edit records as reported by the grid widget.

use crate::database::value::Value;
use thiserror::Error;

/// Errors raised for malformed change tuples.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Malformed change {contents}: expected 4 elements [row, col, old, new], found {len}")]
    WrongArity { contents: String, len: usize },

    #[error("Malformed change {contents}: {position} '{value}' is not a non-negative integer")]
    InvalidIndex { contents: String, position: &'static str, value: String },

    #[error("{message}: {error}")]
    WithContext { message: String, error: Box<ValidationError> },
}

impl ValidationError {
    pub(crate) fn with_prefix(self, message: &str) -> Self {
        ValidationError::WithContext {
            message: message.to_owned(),
            error: Box::new(self),
        }
    }
}

/// A single cell edit: the value the client saw at `(row, col)` and its replacement.
#[derive(Clone, Debug, PartialEq)]
pub struct Change {
    /// Row index (0-based)
    pub row: usize,
    /// Column index (0-based)
    pub col: usize,
    /// Value the client believes the cell currently holds
    pub old: Value,
    /// Replacement value
    pub new: Value,
}

impl Change {
    pub fn new(row: usize, col: usize, old: impl Into<Value>, new: impl Into<Value>) -> Self {
        Self {
            row,
            col,
            old: old.into(),
            new: new.into(),
        }
    }
}

impl TryFrom<&[Value]> for Change {
    type Error = ValidationError;

    /// Parses a raw `[row, col, old, new]` tuple.
    fn try_from(tuple: &[Value]) -> Result<Self, Self::Error> {
        let [row, col, old, new] = tuple else {
            return Err(ValidationError::WrongArity {
                contents: describe(tuple),
                len: tuple.len(),
            });
        };
        Ok(Change {
            row: to_index(row, "row", tuple)?,
            col: to_index(col, "col", tuple)?,
            old: old.clone(),
            new: new.clone(),
        })
    }
}

/// Reads a 0-based index from a loosely typed value.
fn to_index(value: &Value, position: &'static str, tuple: &[Value]) -> Result<usize, ValidationError> {
    let index = match value {
        Value::Integer(index) => usize::try_from(*index).ok(),
        Value::Real(index) if index.fract() == 0.0 && *index >= 0.0 && *index <= u32::MAX as f64 => {
            Some(*index as usize)
        }
        Value::Text(text) => text.trim().parse::<usize>().ok(),
        _ => None,
    };
    index.ok_or_else(|| ValidationError::InvalidIndex {
        contents: describe(tuple),
        position,
        value: match value {
            Value::Missing => "null".to_owned(),
            other => other.to_string(),
        },
    })
}

/// Renders a tuple for diagnostics, quoting text and spelling missing values as null.
pub(crate) fn describe(tuple: &[Value]) -> String {
    let items: Vec<String> = tuple
        .iter()
        .map(|value| match value {
            Value::Missing => "null".to_owned(),
            Value::Text(text) => format!("{:?}", text),
            Value::Date(_) => format!("{:?}", value.to_string()),
            other => other.to_string(),
        })
        .collect();
    format!("[{}]", items.join(", "))
}
