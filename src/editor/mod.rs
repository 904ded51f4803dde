//! # Table Editor
//!
//! Applies edits reported by the grid widget to the authoritative table:
//! cell changes with per-column type coercion and stale-value detection, and
//! structural row and column insertion or removal.
use crate::database::column::ColumnType;
use crate::database::table::Table;
use crate::database::value::{CoercionError, Value};
use crate::error::{ResultMessage, TableEditorError};
use crate::helpers::string::trim;
use tracing::{debug, warn};

pub mod change;
pub mod config;
pub mod event;
pub mod warning;

use change::Change;
use config::EditorConfig;
use warning::EditWarning;

/// Applies widget edits to tables according to an [`EditorConfig`].
///
/// The editor holds no table state. Every operation takes exclusive access to the
/// caller's table and returns once the edit is complete. Fatal errors are detected
/// before the table is touched, so a failed call leaves the table as it was.
#[derive(Clone, Debug, Default)]
pub struct TableEditor {
    config: EditorConfig,
}

impl TableEditor {
    pub fn new(config: EditorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Applies a batch of raw `[row, col, old, new]` tuples in order.
    ///
    /// `None` or an empty batch leaves the table untouched. Every tuple is validated
    /// and bounds-checked first; the first bad tuple aborts the whole batch.
    ///
    /// # Returns
    ///
    /// * `Result<Vec<EditWarning>, TableEditorError>` - Warnings collected over the batch
    ///
    /// # Errors
    ///
    /// * `ValidationError` if a tuple does not have 4 elements or has a bad index
    /// * `IndexError` if a tuple addresses a cell outside the table
    pub fn apply_changes<C>(&self, table: &mut Table, changes: Option<&[C]>) -> Result<Vec<EditWarning>, TableEditorError>
    where
        C: AsRef<[Value]>,
    {
        let Some(changes) = changes.filter(|changes| !changes.is_empty()) else {
            return Ok(Vec::new());
        };
        let changes = changes
            .iter()
            .enumerate()
            .map(|(index, tuple)| {
                let result: Result<Change, TableEditorError> = Change::try_from(tuple.as_ref())
                    .map_err(TableEditorError::from)
                    .and_then(|change| {
                        table.check_cell(change.row, change.col)?;
                        Ok(change)
                    });
                result.with_prefix(&format!("Change #{}", index))
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = changes.len(), "Applying change batch");
        let mut warnings = Vec::new();
        for change in changes {
            self.apply(table, change, &mut warnings)?;
        }
        Ok(warnings)
    }

    /// Applies one raw `[row, col, old, new]` tuple.
    ///
    /// # Errors
    ///
    /// * `ValidationError` if the tuple does not have exactly 4 elements or has a bad index
    /// * `IndexError` if the cell is outside the table
    pub fn apply_change(&self, table: &mut Table, change: &[Value]) -> Result<Vec<EditWarning>, TableEditorError> {
        let change = Change::try_from(change)?;
        self.apply_cell(table, change)
    }

    /// Applies one already parsed change.
    pub fn apply_cell(&self, table: &mut Table, change: Change) -> Result<Vec<EditWarning>, TableEditorError> {
        let mut warnings = Vec::new();
        self.apply(table, change, &mut warnings)?;
        Ok(warnings)
    }

    /// Inserts `ct` empty rows so that the first `ind` rows are kept as a prefix.
    pub fn add_row(&self, table: &mut Table, ind: usize, ct: usize) -> Result<(), TableEditorError> {
        table.insert_rows(ind, ct)?;
        debug!(ind, ct, rows = table.row_count(), "Inserted rows");
        Ok(())
    }

    /// Removes rows `[ind, ind + ct)`.
    pub fn del_row(&self, table: &mut Table, ind: usize, ct: usize) -> Result<(), TableEditorError> {
        table.remove_rows(ind, ct)?;
        debug!(ind, ct, rows = table.row_count(), "Removed rows");
        Ok(())
    }

    /// Inserts `ct` empty, untyped columns so that the first `ind` columns are kept as a prefix.
    pub fn add_col(&self, table: &mut Table, ind: usize, ct: usize) -> Result<(), TableEditorError> {
        table.insert_columns(ind, ct, &self.config.column_prefix)?;
        debug!(ind, ct, cols = table.col_count(), "Inserted columns");
        Ok(())
    }

    /// Removes columns `[ind, ind + ct)`.
    pub fn del_col(&self, table: &mut Table, ind: usize, ct: usize) -> Result<(), TableEditorError> {
        table.remove_columns(ind, ct)?;
        debug!(ind, ct, cols = table.col_count(), "Removed columns");
        Ok(())
    }

    /// Writes one change into the table. The cell is checked before anything is written.
    fn apply(&self, table: &mut Table, change: Change, warnings: &mut Vec<EditWarning>) -> Result<(), TableEditorError> {
        let Change { row, col, old, new } = change;
        let (old, new) = if self.config.trim {
            (trim(&old), trim(&new))
        } else {
            (old, new)
        };

        let column = table.cell_column_mut(row, col)?;
        let kind = column.kind;
        let current = &column.values[row];

        if !self.matches_current(current, &old) {
            self.emit(
                warnings,
                EditWarning::StaleValue {
                    row,
                    col,
                    expected: old,
                    found: current.clone(),
                },
            );
        }

        let value = match self.convert(new, kind) {
            Ok(value) => value,
            Err((value, reason)) => {
                self.emit(
                    warnings,
                    EditWarning::Coercion {
                        row,
                        col,
                        value: value.clone(),
                        target: kind,
                        reason,
                    },
                );
                value
            }
        };

        // The first typed value written into an untyped column declares its type
        if kind.is_other() {
            if let Some(declared) = value.kind() {
                column.kind = declared;
            }
        }
        column.values[row] = value;
        Ok(())
    }

    /// Converts a new value to the column type.
    /// On failure the raw value is handed back with the reason.
    fn convert(&self, value: Value, kind: ColumnType) -> Result<Value, (Value, CoercionError)> {
        match value {
            Value::Text(ref text) if text.is_empty() && self.config.empty_as_missing && !kind.is_text() => {
                Ok(Value::Missing)
            }
            _ if kind.is_other() => Ok(value),
            _ => value.coerce(kind).map_err(|reason| (value, reason)),
        }
    }

    /// Checks the client's old value against the current cell.
    /// Missing only matches missing; other values are compared in the current value's type,
    /// then by their text, so a real NaN matches "NaN".
    fn matches_current(&self, current: &Value, old: &Value) -> bool {
        match (current, old) {
            (Value::Missing, Value::Missing) => true,
            (Value::Missing, Value::Text(text)) => text.is_empty() && self.config.empty_as_missing,
            (Value::Missing, _) | (_, Value::Missing) => false,
            _ => match current.kind().and_then(|kind| old.coerce(kind).ok()) {
                Some(typed) if typed == *current => true,
                _ => old.to_string() == current.to_string(),
            },
        }
    }

    fn emit(&self, warnings: &mut Vec<EditWarning>, warning: EditWarning) {
        if self.config.log_warnings {
            let (row, col) = warning.position();
            warn!(row, col, "{}", warning);
        }
        warnings.push(warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::column::Column;

    fn people() -> Table {
        Table::with_columns(vec![
            Column::new("name", ColumnType::Text, vec![Value::from("Ann")]),
            Column::new("age", ColumnType::Integer, vec![Value::Integer(30)]),
        ])
        .unwrap()
    }

    fn tuple(row: i64, col: i64, old: impl Into<Value>, new: impl Into<Value>) -> Vec<Value> {
        vec![Value::Integer(row), Value::Integer(col), old.into(), new.into()]
    }

    #[test]
    fn no_changes_is_identity() {
        let editor = TableEditor::default();
        let mut table = people();
        let warnings = editor.apply_changes::<Vec<Value>>(&mut table, None).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(table, people());

        let warnings = editor.apply_changes::<Vec<Value>>(&mut table, Some(&[][..])).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(table, people());
    }

    #[test]
    fn change_is_coerced_to_column_type() {
        let editor = TableEditor::default();
        let mut table = people();
        let warnings = editor.apply_change(&mut table, &tuple(0, 1, "30", "31")).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(table.row(0), Some(vec![Value::from("Ann"), Value::Integer(31)]));
    }

    #[test]
    fn stale_old_value_warns_but_applies() {
        let editor = TableEditor::default();
        let mut table = people();
        let warnings = editor.apply_change(&mut table, &tuple(0, 1, "99", "31")).unwrap();
        assert_eq!(
            warnings,
            vec![EditWarning::StaleValue {
                row: 0,
                col: 1,
                expected: Value::from("99"),
                found: Value::Integer(30),
            }]
        );
        assert_eq!(table.get(0, 1), Some(&Value::Integer(31)));
    }

    #[test]
    fn missing_old_value_against_present_cell_is_stale() {
        let editor = TableEditor::default();
        let mut table = people();
        let warnings = editor.apply_change(&mut table, &tuple(0, 0, Value::Missing, "Bob")).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].is_stale_value());

        table.cell_column_mut(0, 0).unwrap().values[0] = Value::Missing;
        let warnings = editor.apply_change(&mut table, &tuple(0, 0, "Bob", "Cy")).unwrap();
        assert!(warnings[0].is_stale_value());
        let warnings = editor.apply_change(&mut table, &tuple(0, 0, "Cy", "Dee")).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn not_a_number_matches_itself() {
        let editor = TableEditor::default();
        let mut table = Table::with_columns(vec![Column::new("x", ColumnType::Real, vec![Value::Real(0.5)])]).unwrap();
        let warnings = editor.apply_change(&mut table, &tuple(0, 0, 0.5, "NaN")).unwrap();
        assert!(warnings.is_empty());
        assert!(matches!(table.get(0, 0), Some(Value::Real(x)) if x.is_nan()));

        let warnings = editor.apply_change(&mut table, &tuple(0, 0, "NaN", "1")).unwrap();
        assert!(warnings.is_empty());
        let warnings = editor.apply_change(&mut table, &tuple(0, 0, f64::NAN, "2")).unwrap();
        assert!(warnings[0].is_stale_value());
        assert_eq!(table.get(0, 0), Some(&Value::Real(2.0)));
    }

    #[test]
    fn unchecked_change_outside_table_is_an_error() {
        let editor = TableEditor::default();
        let mut table = people();
        let mut warnings = Vec::new();
        let error = editor
            .apply(&mut table, Change::new(3, 0, Value::Missing, Value::from("Bob")), &mut warnings)
            .unwrap_err();
        assert!(error.is_index());
        assert!(warnings.is_empty());
        assert_eq!(table, people());

        let error = editor.apply_cell(&mut table, Change::new(0, 2, Value::Missing, Value::Integer(1))).unwrap_err();
        assert!(error.is_index());
    }

    #[test]
    fn failed_coercion_stores_raw_value() {
        let editor = TableEditor::default();
        let mut table = people();
        let warnings = editor.apply_change(&mut table, &tuple(0, 1, "30", "thirty")).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].is_coercion());
        assert_eq!(table.get(0, 1), Some(&Value::from("thirty")));
        assert_eq!(table.column(1).unwrap().kind, ColumnType::Integer);
    }

    #[test]
    fn whitespace_is_trimmed() {
        let editor = TableEditor::default();
        let mut table = people();
        let warnings = editor.apply_change(&mut table, &tuple(0, 0, " Ann ", "  Bob\t")).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(table.get(0, 0), Some(&Value::from("Bob")));
    }

    #[test]
    fn trimming_can_be_disabled() {
        let editor = TableEditor::new(EditorConfig::default().with_trim(false));
        let mut table = people();
        let warnings = editor.apply_change(&mut table, &tuple(0, 0, " Ann", " Bob ")).unwrap();
        assert!(warnings[0].is_stale_value());
        assert_eq!(table.get(0, 0), Some(&Value::from(" Bob ")));
    }

    #[test]
    fn cleared_cell_becomes_missing() {
        let editor = TableEditor::default();
        let mut table = people();
        let warnings = editor.apply_change(&mut table, &tuple(0, 1, 30i64, "")).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(table.get(0, 1), Some(&Value::Missing));

        let warnings = editor.apply_change(&mut table, &tuple(0, 0, "Ann", "")).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(table.get(0, 0), Some(&Value::from("")));
    }

    #[test]
    fn untyped_column_takes_first_value_type() {
        let editor = TableEditor::default();
        let mut table = people();
        editor.add_col(&mut table, 2, 1).unwrap();
        let warnings = editor.apply_change(&mut table, &tuple(0, 2, Value::Missing, 2.5)).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(table.column(2).unwrap().kind, ColumnType::Real);

        editor.add_row(&mut table, 1, 1).unwrap();
        editor.apply_change(&mut table, &tuple(1, 2, Value::Missing, "4")).unwrap();
        assert_eq!(table.get(1, 2), Some(&Value::Real(4.0)));
    }

    #[test]
    fn only_target_cell_changes() {
        let editor = TableEditor::default();
        let mut table = Table::with_columns(vec![
            Column::new("a", ColumnType::Integer, vec![Value::Integer(1), Value::Integer(2)]),
            Column::new("b", ColumnType::Integer, vec![Value::Integer(3), Value::Integer(4)]),
        ])
        .unwrap();
        let before = table.clone();
        editor.apply_change(&mut table, &tuple(1, 0, 2i64, 20i64)).unwrap();
        for row in 0..2 {
            for col in 0..2 {
                if (row, col) != (1, 0) {
                    assert_eq!(table.get(row, col), before.get(row, col));
                }
            }
        }
        assert_eq!(table.get(1, 0), Some(&Value::Integer(20)));
    }

    #[test]
    fn malformed_change_aborts_batch() {
        let editor = TableEditor::default();
        let mut table = people();
        let changes = vec![tuple(0, 1, "30", "31"), vec![Value::Integer(0), Value::Integer(1)]];
        let error = editor.apply_changes(&mut table, Some(changes.as_slice())).unwrap_err();
        assert!(error.is_validation());
        assert!(error.to_string().starts_with("Change #1: Malformed change [0, 1]"));
        assert_eq!(table, people());
    }

    #[test]
    fn out_of_bounds_change_aborts_batch() {
        let editor = TableEditor::default();
        let mut table = people();
        let changes = vec![tuple(0, 1, "30", "31"), tuple(1, 0, Value::Missing, "Bob")];
        let error = editor.apply_changes(&mut table, Some(changes.as_slice())).unwrap_err();
        assert!(error.is_index());
        assert_eq!(table, people());
    }

    #[test]
    fn batch_applies_in_order() {
        let editor = TableEditor::default();
        let mut table = people();
        let changes = vec![tuple(0, 1, "30", "31"), tuple(0, 1, "31", "32"), tuple(0, 1, "30", "33")];
        let warnings = editor.apply_changes(&mut table, Some(changes.as_slice())).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].position(), (0, 1));
        assert_eq!(table.get(0, 1), Some(&Value::Integer(33)));
    }

    #[test]
    fn row_round_trip() {
        let editor = TableEditor::default();
        for ind in 0..=1 {
            for ct in 0..3 {
                let mut table = people();
                editor.add_row(&mut table, ind, ct).unwrap();
                assert_eq!(table.row_count(), 1 + ct);
                editor.del_row(&mut table, ind, ct).unwrap();
                assert_eq!(table, people());
            }
        }
    }

    #[test]
    fn col_round_trip() {
        let editor = TableEditor::default();
        for ind in 0..=2 {
            for ct in 0..3 {
                let mut table = people();
                editor.add_col(&mut table, ind, ct).unwrap();
                assert_eq!(table.col_count(), 2 + ct);
                editor.del_col(&mut table, ind, ct).unwrap();
                assert_eq!(table, people());
            }
        }
    }

    #[test]
    fn add_col_names_are_distinct() {
        let editor = TableEditor::default();
        let mut table = people();
        editor.add_col(&mut table, 1, 1).unwrap();
        assert_eq!(table.col_count(), 3);
        let added = table.column(1).unwrap();
        assert_eq!(added.name, "V2");
        assert!(added.values.iter().all(Value::is_missing));
        assert_eq!(table.column_names(), vec!["name", "V2", "age"]);
    }

    #[test]
    fn del_row_out_of_bounds() {
        let editor = TableEditor::default();
        let mut table = people();
        editor.add_row(&mut table, 1, 2).unwrap();
        let error = editor.del_row(&mut table, 2, 5).unwrap_err();
        assert!(error.is_index());
        assert_eq!(table.row_count(), 3);
    }
}
