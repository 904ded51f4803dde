use thiserror::Error;

/// Errors raised when a position or count falls outside the table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("Cannot insert {count} {axis}(s) at {index}: only {len} {axis}(s) present")]
    InsertOutOfBounds { axis: Axis, index: usize, count: usize, len: usize },

    #[error("Cannot remove {count} {axis}(s) at {index}: only {len} {axis}(s) present")]
    RemoveOutOfBounds { axis: Axis, index: usize, count: usize, len: usize },

    #[error("Cell ({row}, {col}) is outside a table of {rows} row(s) and {cols} column(s)")]
    CellOutOfBounds { row: usize, col: usize, rows: usize, cols: usize },

    #[error("Cannot make room for {count} more {axis}(s) beside {len}")]
    CapacityExceeded { axis: Axis, count: usize, len: usize },
}

/// Table dimension a structural edit applies to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// A run of `count` consecutive rows or columns starting at 0-based `index`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Range {
    pub axis: Axis,
    pub index: usize,
    pub count: usize,
}

impl Range {
    pub fn new(axis: Axis, index: usize, count: usize) -> Self {
        Range { axis, index, count }
    }

    /// Exclusive end of the run, None on overflow.
    pub fn end(&self) -> Option<usize> {
        self.index.checked_add(self.count)
    }

    /// Checks the run can be inserted into a dimension of length `len`.
    /// The insertion point may equal `len`, which appends. The grown length must fit a `usize`.
    pub fn check_insert(&self, len: usize) -> Result<(), IndexError> {
        if self.index > len || self.end().is_none() || len.checked_add(self.count).is_none() {
            Err(IndexError::InsertOutOfBounds {
                axis: self.axis,
                index: self.index,
                count: self.count,
                len,
            })
        } else {
            Ok(())
        }
    }

    /// Checks the run lies fully inside a dimension of length `len`.
    pub fn check_remove(&self, len: usize) -> Result<(), IndexError> {
        match self.end() {
            Some(end) if end <= len => Ok(()),
            _ => Err(IndexError::RemoveOutOfBounds {
                axis: self.axis,
                index: self.index,
                count: self.count,
                len,
            }),
        }
    }

    /// Error for an insertion the allocator cannot hold.
    pub(crate) fn capacity_exceeded(&self, len: usize) -> IndexError {
        IndexError::CapacityExceeded {
            axis: self.axis,
            count: self.count,
            len,
        }
    }

    /// Returns the run as a `std::ops::Range`, assuming it was checked.
    pub(crate) fn span(&self) -> std::ops::Range<usize> {
        self.index..self.index + self.count
    }
}
