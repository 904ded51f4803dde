use crate::database::column::{Column, ColumnType};
use crate::database::range::{Axis, IndexError, Range};
use crate::database::value::Value;
use crate::error::TableEditorError;
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised while assembling a table from columns.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Column '{name}' has {found} value(s), expected {expected}")]
    UnequalLength { name: String, expected: usize, found: usize },

    #[error("Duplicate column name '{0}'")]
    DuplicateColumn(String),
}

/// An in-memory table of named, typed columns of equal length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    /// Column definitions and values
    columns: Vec<Column>,
    /// Number of rows, kept separately so a table without columns can still have rows
    rows: usize,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from columns, which must share one length and have distinct names.
    pub fn with_columns(columns: Vec<Column>) -> Result<Self, TableEditorError> {
        let rows = columns.first().map(Column::len).unwrap_or(0);
        let mut names = HashSet::new();
        for column in &columns {
            if column.len() != rows {
                Err(TableError::UnequalLength {
                    name: column.name.to_owned(),
                    expected: rows,
                    found: column.len(),
                })?;
            }
            if !names.insert(column.name.as_str()) {
                Err(TableError::DuplicateColumn(column.name.to_owned()))?;
            }
        }
        Ok(Self { columns, rows })
    }

    /// Builds an empty table from `(name, type name)` pairs.
    pub fn from_schema<'a, I>(schema: I) -> Result<Self, TableEditorError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let columns = schema
            .into_iter()
            .map(|(name, kind)| -> Result<Column, TableEditorError> {
                Ok(Column::new(name, ColumnType::parse(kind)?, Vec::new()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::with_columns(columns)
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn col_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, col: usize) -> Option<&Column> {
        self.columns.get(col)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.name.as_str()).collect()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        self.columns.get(col)?.values.get(row)
    }

    /// Returns a copy of one row's values, in column order.
    pub fn row(&self, row: usize) -> Option<Vec<Value>> {
        if row >= self.rows {
            return None;
        }
        Some(self.columns.iter().map(|column| column.values[row].clone()).collect())
    }

    /// Checks `(row, col)` addresses an existing cell.
    pub(crate) fn check_cell(&self, row: usize, col: usize) -> Result<(), IndexError> {
        if row < self.rows && col < self.columns.len() {
            Ok(())
        } else {
            Err(IndexError::CellOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.columns.len(),
            })
        }
    }

    /// Returns the column holding cell `(row, col)`, checking the cell exists.
    pub(crate) fn cell_column_mut(&mut self, row: usize, col: usize) -> Result<&mut Column, IndexError> {
        self.check_cell(row, col)?;
        Ok(&mut self.columns[col])
    }

    /// Inserts `count` rows of missing values so that they start at `index`.
    pub fn insert_rows(&mut self, index: usize, count: usize) -> Result<(), IndexError> {
        let range = Range::new(Axis::Row, index, count);
        let len = self.rows;
        range.check_insert(len)?;
        // Reserve everything up front so a failed allocation leaves every column as it was
        for column in &mut self.columns {
            column
                .values
                .try_reserve(count)
                .map_err(|_| range.capacity_exceeded(len))?;
        }
        for column in &mut self.columns {
            column
                .values
                .splice(index..index, std::iter::repeat(Value::Missing).take(count));
        }
        self.rows += count;
        Ok(())
    }

    /// Removes the rows `[index, index + count)`.
    pub fn remove_rows(&mut self, index: usize, count: usize) -> Result<(), IndexError> {
        let range = Range::new(Axis::Row, index, count);
        range.check_remove(self.rows)?;
        for column in &mut self.columns {
            column.values.drain(range.span());
        }
        self.rows -= count;
        Ok(())
    }

    /// Inserts `count` untyped columns of missing values so that they start at `index`.
    /// Names are `prefix` followed by the 1-based position, bumped until unique.
    pub fn insert_columns(&mut self, index: usize, count: usize, prefix: &str) -> Result<(), IndexError> {
        let range = Range::new(Axis::Column, index, count);
        let len = self.columns.len();
        range.check_insert(len)?;
        let mut inserted = Vec::new();
        inserted
            .try_reserve_exact(count)
            .and_then(|_| self.columns.try_reserve(count))
            .map_err(|_| range.capacity_exceeded(len))?;

        let mut names: HashSet<String> = self.columns.iter().map(|column| column.name.to_owned()).collect();
        let mut number = index + 1;
        for _ in 0..count {
            let name = loop {
                let name = format!("{prefix}{number}");
                number += 1;
                if !names.contains(&name) {
                    break name;
                }
            };
            names.insert(name.to_owned());
            inserted.push(Column::missing(name, self.rows).map_err(|_| range.capacity_exceeded(len))?);
        }
        self.columns.splice(index..index, inserted);
        Ok(())
    }

    /// Removes the columns `[index, index + count)`.
    pub fn remove_columns(&mut self, index: usize, count: usize) -> Result<(), IndexError> {
        let range = Range::new(Axis::Column, index, count);
        range.check_remove(self.columns.len())?;
        self.columns.drain(range.span());
        Ok(())
    }
}
