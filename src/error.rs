use thiserror::Error;

/// Main error type for the table editor.
/// Aggregates errors from the database and editor modules and from JSON decoding.
#[derive(Error, Debug)]
pub enum TableEditorError {
    #[error("{0}")]
    WithContextError(String),

    // Third-party library errors
    #[error("{0}")]
    JsonError(#[from] serde_json::Error),

    // Database module errors
    #[error("{0}")]
    ColumnError(#[from] crate::database::column::ColumnError),

    #[error("{0}")]
    TableError(#[from] crate::database::table::TableError),

    #[error("{0}")]
    IndexError(#[from] crate::database::range::IndexError),

    // Editor module errors
    #[error("{0}")]
    ValidationError(#[from] crate::editor::change::ValidationError),
}

impl TableEditorError {
    /// Returns true for malformed change tuples.
    pub fn is_validation(&self) -> bool {
        matches!(self, TableEditorError::ValidationError(_))
    }

    /// Returns true for positions or counts outside the table.
    pub fn is_index(&self) -> bool {
        matches!(self, TableEditorError::IndexError(_))
    }
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, TableEditorError> {
    /// Prefixes the message while keeping validation and index errors recognizable.
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| match e {
            TableEditorError::ValidationError(error) => {
                TableEditorError::ValidationError(error.with_prefix(message))
            }
            TableEditorError::IndexError(_) => e,
            other => TableEditorError::WithContextError(format!("{}: {}", message, other)),
        })
    }
}
