use crate::database::column::ColumnType;
use crate::database::value::{CoercionError, Value};
use std::fmt::Display;

/// Non-fatal problems found while applying a cell edit. The edit is applied regardless.
#[derive(Clone, Debug, PartialEq)]
pub enum EditWarning {
    /// The client's old value does not match what the table holds
    StaleValue {
        row: usize,
        col: usize,
        expected: Value,
        found: Value,
    },
    /// The new value could not be converted to the column type and was stored as is
    Coercion {
        row: usize,
        col: usize,
        value: Value,
        target: ColumnType,
        reason: CoercionError,
    },
}

impl EditWarning {
    pub fn position(&self) -> (usize, usize) {
        match self {
            EditWarning::StaleValue { row, col, .. } | EditWarning::Coercion { row, col, .. } => (*row, *col),
        }
    }

    pub fn is_stale_value(&self) -> bool {
        matches!(self, EditWarning::StaleValue { .. })
    }

    pub fn is_coercion(&self) -> bool {
        matches!(self, EditWarning::Coercion { .. })
    }
}

/// Formats a value for messages, keeping missing values distinguishable from empty text.
fn quoted(value: &Value) -> String {
    match value {
        Value::Missing => "null".to_owned(),
        other => format!("'{}'", other),
    }
}

impl Display for EditWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditWarning::StaleValue { row, col, expected, found } => write!(
                f,
                "Stale value at ({row}, {col}): client expected {} but table holds {}",
                quoted(expected),
                quoted(found)
            ),
            EditWarning::Coercion { row, col, value, target, reason } => write!(
                f,
                "Value {} at ({row}, {col}) kept as {}: column is {}, {}",
                quoted(value),
                value.type_name(),
                target.as_str(),
                reason
            ),
        }
    }
}
