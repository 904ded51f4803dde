use crate::database::value::Value;
use crate::error::TableEditorError;
use std::collections::TryReserveError;
use thiserror::Error;

/// Errors related to column type parsing and validation.
#[derive(Error, Debug)]
pub enum ColumnError {
    #[error("Invalid column type '{0}'")]
    TypeError(String),
}

/// Supported column data types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Boolean values (true/false)
    Boolean,
    /// 64-bit signed integers
    Integer,
    /// Double-precision floating point numbers
    Real,
    /// Variable-length strings
    Text,
    /// Date without time component
    Date,
    /// No declared type, accepts any value
    Other,
}

/// A named column holding one value per table row.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    /// Column name (unique within its table)
    pub name: String,
    /// Declared column type
    pub kind: ColumnType,
    /// Cell values, one per row
    pub values: Vec<Value>,
}

impl ColumnType {
    /// Returns the string representation of the column type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Boolean => "boolean",
            ColumnType::Integer => "integer",
            ColumnType::Real => "real",
            ColumnType::Text => "text",
            ColumnType::Date => "date",
            ColumnType::Other => "other",
        }
    }

    /// Parses a column type from a string representation.
    /// Supports various aliases for each type.
    pub fn parse(name: &str) -> Result<Self, TableEditorError> {
        match name.to_ascii_uppercase().as_str() {
            "BOOL" | "BOOLEAN" | "LOGICAL" => Ok(Self::Boolean),
            "INT" | "INTEGER" | "BIGINT" => Ok(Self::Integer),
            "REAL" | "DOUBLE" | "FLOAT" | "NUMERIC" => Ok(Self::Real),
            "TEXT" | "STRING" | "VARCHAR" | "CHARACTER" => Ok(Self::Text),
            "DATE" => Ok(Self::Date),
            "OTHER" | "ANY" => Ok(Self::Other),
            _ => Err(ColumnError::TypeError(name.to_string()))?,
        }
    }

    /// Returns true if the column has no declared type yet.
    #[inline]
    pub fn is_other(&self) -> bool {
        matches!(self, ColumnType::Other)
    }

    /// Returns true if this column type holds text values.
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, ColumnType::Text)
    }
}

impl Column {
    pub fn new(name: &str, kind: ColumnType, values: Vec<Value>) -> Self {
        Self {
            name: name.to_owned(),
            kind,
            values,
        }
    }

    /// Creates an untyped column of `len` missing values.
    /// Fails instead of aborting when `len` values cannot be allocated.
    pub(crate) fn missing(name: String, len: usize) -> Result<Self, TryReserveError> {
        let mut values = Vec::new();
        values.try_reserve_exact(len)?;
        values.resize(len, Value::Missing);
        Ok(Self {
            name,
            kind: ColumnType::Other,
            values,
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
