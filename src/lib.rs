//! # Table Editor
//!
//! Reconciles edits made in an interactive grid widget with an in-memory table of
//! named, typed columns.
//!
//! ## Features
//!
//! - **Typed columns**: Boolean, Integer, Real, Text, Date, and untyped columns
//! - **Cell edits**: Each new value is coerced to its column type; values that cannot be
//!   converted are stored as is and reported
//! - **Stale value detection**: The value the client saw is checked against the table
//! - **Structural edits**: Insert and remove rows and columns
//! - **Whitespace normalization**: Optional trimming of text edits
//! - **Widget events**: Apply JSON events straight from the grid widget
//!
//! Fatal problems (malformed change tuples, positions outside the table) are returned
//! as [`TableEditorError`]. Everything else is reported as an [`EditWarning`], returned
//! to the caller and logged through `tracing`.
//!
//! ```
//! use table_editor::{Column, ColumnType, Table, TableEditor, Value};
//!
//! let mut table = Table::with_columns(vec![
//!     Column::new("name", ColumnType::Text, vec![Value::from("Ann")]),
//!     Column::new("age", ColumnType::Integer, vec![Value::Integer(30)]),
//! ])?;
//! let editor = TableEditor::default();
//! let change = [Value::Integer(0), Value::Integer(1), Value::from("30"), Value::from("31")];
//! let warnings = editor.apply_change(&mut table, &change)?;
//! assert!(warnings.is_empty());
//! assert_eq!(table.get(0, 1), Some(&Value::Integer(31)));
//! # Ok::<(), table_editor::TableEditorError>(())
//! ```

mod database;
mod editor;
mod error;
mod helpers;

pub use crate::database::column::{Column, ColumnError, ColumnType};
pub use crate::database::range::{Axis, IndexError, Range};
pub use crate::database::table::{Table, TableError};
pub use crate::database::value::{CoercionError, Value};
pub use crate::editor::change::{Change, ValidationError};
pub use crate::editor::config::EditorConfig;
pub use crate::editor::event::GridEvent;
pub use crate::editor::warning::EditWarning;
pub use crate::editor::TableEditor;
pub use crate::error::TableEditorError;
pub use crate::helpers::string::{trim, trim_all};
