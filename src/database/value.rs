use crate::database::column::ColumnType;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::TimeDelta;
use std::fmt::Display;
use thiserror::Error;

/// Errors raised when a value cannot be converted to a column type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionError {
    #[error("parse '{value}' to {target} failed")]
    ParseError { value: String, target: &'static str },

    #[error("{value} is out of range for {target}")]
    OutOfRange { value: String, target: &'static str },

    #[error("cannot convert {from} to {target}")]
    Unsupported { from: &'static str, target: &'static str },
}

/// Date formats accepted when text is written into a date column.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// A single cell value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Missing value (NA)
    #[default]
    Missing,
    /// Boolean values (true/false)
    Boolean(bool),
    /// 64-bit signed integers
    Integer(i64),
    /// Double-precision floating point numbers
    Real(f64),
    /// Variable-length strings
    Text(String),
    /// Calendar date without time component
    Date(NaiveDate),
}

impl Value {
    /// Returns the column type this value naturally belongs to, None for missing values.
    pub fn kind(&self) -> Option<ColumnType> {
        match self {
            Value::Missing => None,
            Value::Boolean(_) => Some(ColumnType::Boolean),
            Value::Integer(_) => Some(ColumnType::Integer),
            Value::Real(_) => Some(ColumnType::Real),
            Value::Text(_) => Some(ColumnType::Text),
            Value::Date(_) => Some(ColumnType::Date),
        }
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Returns a name for the value's type, used in diagnostics.
    pub(crate) fn type_name(&self) -> &'static str {
        self.kind().map(|kind| kind.as_str()).unwrap_or("missing")
    }

    /// Converts the value to the given column type.
    ///
    /// Missing values stay missing and `Other` accepts anything as is.
    pub fn coerce(&self, target: ColumnType) -> Result<Value, CoercionError> {
        if self.is_missing() || self.kind() == Some(target) {
            return Ok(self.clone());
        }
        match target {
            ColumnType::Other => Ok(self.clone()),
            ColumnType::Boolean => self.to_boolean().map(Value::Boolean),
            ColumnType::Integer => self.to_integer().map(Value::Integer),
            ColumnType::Real => self.to_real().map(Value::Real),
            ColumnType::Text => Ok(Value::Text(self.to_string())),
            ColumnType::Date => self.to_date().map(Value::Date),
        }
    }

    fn unsupported(&self, target: ColumnType) -> CoercionError {
        CoercionError::Unsupported {
            from: self.type_name(),
            target: target.as_str(),
        }
    }

    fn parse_error(value: &str, target: ColumnType) -> CoercionError {
        CoercionError::ParseError {
            value: value.to_owned(),
            target: target.as_str(),
        }
    }

    /// Converts the value to a boolean.
    /// Text accepts the usual spellings of true and false as well as 1 and 0.
    fn to_boolean(&self) -> Result<bool, CoercionError> {
        match self {
            Value::Boolean(value) => Ok(*value),
            Value::Integer(value) => Ok(*value != 0),
            Value::Real(value) if value.is_nan() => Err(Self::parse_error("NaN", ColumnType::Boolean)),
            Value::Real(value) => Ok(*value != 0.0),
            Value::Text(text) => match text.as_str() {
                "T" | "TRUE" | "true" | "True" | "1" => Ok(true),
                "F" | "FALSE" | "false" | "False" | "0" => Ok(false),
                _ => Err(Self::parse_error(text, ColumnType::Boolean)),
            },
            _ => Err(self.unsupported(ColumnType::Boolean)),
        }
    }

    /// Converts the value to a 64-bit integer.
    /// Reals and numeric text are accepted only when they carry no fractional part.
    fn to_integer(&self) -> Result<i64, CoercionError> {
        match self {
            Value::Integer(value) => Ok(*value),
            Value::Boolean(value) => Ok(*value as i64),
            Value::Real(value) => real_to_integer(*value),
            Value::Text(text) => text.parse::<i64>().or_else(|_| {
                text.parse::<f64>()
                    .map_err(|_| Self::parse_error(text, ColumnType::Integer))
                    .and_then(real_to_integer)
            }),
            Value::Date(date) => Ok(epoch_days(date)),
            Value::Missing => Err(self.unsupported(ColumnType::Integer)),
        }
    }

    /// Converts the value to a double-precision float.
    fn to_real(&self) -> Result<f64, CoercionError> {
        match self {
            Value::Real(value) => Ok(*value),
            Value::Integer(value) => Ok(*value as f64),
            Value::Boolean(value) => Ok(if *value { 1.0 } else { 0.0 }),
            Value::Text(text) => text
                .parse::<f64>()
                .map_err(|_| Self::parse_error(text, ColumnType::Real)),
            Value::Date(date) => Ok(epoch_days(date) as f64),
            Value::Missing => Err(self.unsupported(ColumnType::Real)),
        }
    }

    /// Converts the value to a date.
    /// Integers count days since 1970-01-01.
    fn to_date(&self) -> Result<NaiveDate, CoercionError> {
        match self {
            Value::Date(date) => Ok(*date),
            Value::Integer(days) => TimeDelta::try_days(*days)
                .and_then(|delta| unix_epoch().checked_add_signed(delta))
                .ok_or_else(|| CoercionError::OutOfRange {
                    value: days.to_string(),
                    target: ColumnType::Date.as_str(),
                }),
            Value::Text(text) => DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .ok_or_else(|| Self::parse_error(text, ColumnType::Date)),
            _ => Err(self.unsupported(ColumnType::Date)),
        }
    }
}

/// 1970-01-01, the origin for integer day counts.
fn unix_epoch() -> NaiveDate {
    DateTime::UNIX_EPOCH.date_naive()
}

fn epoch_days(date: &NaiveDate) -> i64 {
    date.signed_duration_since(unix_epoch()).num_days()
}

fn real_to_integer(value: f64) -> Result<i64, CoercionError> {
    if value.fract() != 0.0 || value.is_nan() {
        Err(CoercionError::ParseError {
            value: value.to_string(),
            target: ColumnType::Integer.as_str(),
        })
    } else if value < i64::MIN as f64 || value >= i64::MAX as f64 {
        Err(CoercionError::OutOfRange {
            value: value.to_string(),
            target: ColumnType::Integer.as_str(),
        })
    } else {
        Ok(value as i64)
    }
}

impl Display for Value {
    /// Missing values render as an empty string, never as "NA".
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Missing => Ok(()),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Integer(value) => write!(f, "{}", value),
            Value::Real(value) => write!(f, "{}", value),
            Value::Text(value) => write!(f, "{}", value),
            Value::Date(value) => write!(f, "{}", value.format("%Y-%m-%d")),
        }
    }
}

impl From<&serde_json::Value> for Value {
    /// Maps loosely typed JSON scalars coming from the grid widget.
    fn from(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Missing,
            serde_json::Value::Bool(value) => Value::Boolean(*value),
            serde_json::Value::Number(number) => number
                .as_i64()
                .map(Value::Integer)
                .or_else(|| number.as_f64().map(Value::Real))
                .unwrap_or(Value::Missing),
            serde_json::Value::String(text) => Value::Text(text.to_owned()),
            other => Value::Text(other.to_string()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Missing)
    }
}
