//! Widget callbacks and the JSON feed entry point.

use crate::database::table::Table;
use crate::database::value::Value;
use crate::editor::warning::EditWarning;
use crate::editor::TableEditor;
use crate::error::TableEditorError;
use anyhow::{Context, Result};
use serde::Deserialize;

/// One event reported by the grid widget, tagged by the callback that produced it.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "event")]
pub enum GridEvent {
    /// Cell edits, each `[row, col, old, new]`; null when nothing changed
    #[serde(rename = "afterChange")]
    AfterChange { changes: Option<Vec<Vec<serde_json::Value>>> },

    #[serde(rename = "afterCreateRow")]
    AfterCreateRow {
        ind: usize,
        #[serde(default = "default_count")]
        ct: usize,
    },

    #[serde(rename = "afterRemoveRow")]
    AfterRemoveRow {
        ind: usize,
        #[serde(default = "default_count")]
        ct: usize,
    },

    #[serde(rename = "afterCreateCol")]
    AfterCreateCol {
        ind: usize,
        #[serde(default = "default_count")]
        ct: usize,
    },

    #[serde(rename = "afterRemoveCol")]
    AfterRemoveCol {
        ind: usize,
        #[serde(default = "default_count")]
        ct: usize,
    },
}

/// The widget omits the count when a single row or column is affected.
fn default_count() -> usize {
    1
}

impl GridEvent {
    /// Returns the widget callback name.
    pub const fn name(&self) -> &'static str {
        match self {
            GridEvent::AfterChange { .. } => "afterChange",
            GridEvent::AfterCreateRow { .. } => "afterCreateRow",
            GridEvent::AfterRemoveRow { .. } => "afterRemoveRow",
            GridEvent::AfterCreateCol { .. } => "afterCreateCol",
            GridEvent::AfterRemoveCol { .. } => "afterRemoveCol",
        }
    }

    pub fn parse(json: &str) -> Result<Self, TableEditorError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl TableEditor {
    /// Dispatches a widget event to the matching table operation.
    ///
    /// Structural events never produce warnings.
    pub fn apply_event(&self, table: &mut Table, event: &GridEvent) -> Result<Vec<EditWarning>, TableEditorError> {
        match event {
            GridEvent::AfterChange { changes } => {
                let changes: Option<Vec<Vec<Value>>> = changes.as_ref().map(|changes| {
                    changes
                        .iter()
                        .map(|tuple| tuple.iter().map(Value::from).collect())
                        .collect()
                });
                self.apply_changes(table, changes.as_deref())
            }
            GridEvent::AfterCreateRow { ind, ct } => self.add_row(table, *ind, *ct).map(|_| Vec::new()),
            GridEvent::AfterRemoveRow { ind, ct } => self.del_row(table, *ind, *ct).map(|_| Vec::new()),
            GridEvent::AfterCreateCol { ind, ct } => self.add_col(table, *ind, *ct).map(|_| Vec::new()),
            GridEvent::AfterRemoveCol { ind, ct } => self.del_col(table, *ind, *ct).map(|_| Vec::new()),
        }
    }

    /// Parses one widget event from JSON and applies it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not a known event or if the event cannot be applied.
    pub fn apply_feed(&self, table: &mut Table, json: &str) -> Result<Vec<EditWarning>> {
        let event = GridEvent::parse(json).context("Failed to parse grid event")?;
        self.apply_event(table, &event)
            .with_context(|| format!("Failed to apply {} event", event.name()))
    }
}
