//! Validation types and logic
//!
//! Problems the user can fix are reported as a `TableDefError` value with
//! one `ColumnError` per column slot, so the editor can show each message
//! next to the field it belongs to.

use dx_core::{FieldType, PRIMARY_KEY, TableDef};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use super::{SchemaAction, SchemaActionMap};

pub const TABLE_NAME_EMPTY: &str = "Table name cannot be empty";
pub const COLUMN_NAME_EMPTY: &str = "Column name cannot be empty";
pub const COLUMN_TYPE_EMPTY: &str = "Column type cannot be empty";
pub const COLUMN_NAME_DUPLICATE: &str = "Duplicate column name";
pub const TEXT_DEFAULT_NOT_EXPR: &str = "Text column can only default to an expression";
pub const AUTO_INCREMENT_DEFAULT: &str = "Auto increment column cannot have a default value";
pub const AUTO_INCREMENT_NULLABLE: &str = "Auto increment column cannot be nullable";
pub const AUTO_INCREMENT_NOT_PRIMARY: &str = "Auto increment column must be the primary key";

/// Errors attached to one column slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnError {
    pub name_error: Option<String>,
    pub field_type_error: Option<String>,
    pub default_value_error: Option<String>,
    pub nullable_error: Option<String>,
}

impl ColumnError {
    pub fn is_empty(&self) -> bool {
        self.name_error.is_none()
            && self.field_type_error.is_none()
            && self.default_value_error.is_none()
            && self.nullable_error.is_none()
    }

    fn messages(&self) -> impl Iterator<Item = &str> {
        [
            &self.name_error,
            &self.field_type_error,
            &self.default_value_error,
            &self.nullable_error,
        ]
        .into_iter()
        .flatten()
        .map(String::as_str)
    }
}

/// Validation result for a whole table draft
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDefError {
    pub name_error: Option<String>,
    /// Indexed like the draft's column slots
    pub columns_error: Vec<ColumnError>,
}

impl TableDefError {
    pub fn is_empty(&self) -> bool {
        self.name_error.is_none() && self.columns_error.iter().all(ColumnError::is_empty)
    }

    pub fn column(&self, index: usize) -> Option<&ColumnError> {
        self.columns_error.get(index)
    }
}

impl fmt::Display for TableDefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut messages = Vec::new();
        if let Some(name_error) = &self.name_error {
            messages.push(name_error.clone());
        }
        for (i, column) in self.columns_error.iter().enumerate() {
            for message in column.messages() {
                messages.push(format!("column {}: {}", i + 1, message));
            }
        }
        write!(f, "{}", messages.join("; "))
    }
}

/// Validate a table that does not exist yet, as if every slot were live
pub fn validate(table: &TableDef) -> Option<TableDefError> {
    validate_new_table(table, &SchemaActionMap::default())
}

/// Validate an edit of an existing table. Slots marked deleted or
/// discarded are left clean; they will not exist after saving.
///
/// The backend column rules only apply to slots added in this draft.
/// Existing columns cannot change those properties, so a table created
/// elsewhere that breaks them can still be renamed or extended.
pub fn validate_with_marks(table: &TableDef, marks: &SchemaActionMap) -> Option<TableDefError> {
    validate_slots(table, marks, |index| marks.get(index) == Some(SchemaAction::Add))
}

/// Validate a draft of a new table; every live slot gets every rule
pub fn validate_new_table(table: &TableDef, marks: &SchemaActionMap) -> Option<TableDefError> {
    validate_slots(table, marks, |_| true)
}

fn validate_slots(
    table: &TableDef,
    marks: &SchemaActionMap,
    is_new: impl Fn(usize) -> bool,
) -> Option<TableDefError> {
    let mut error = TableDefError {
        name_error: None,
        columns_error: vec![ColumnError::default(); table.columns.len()],
    };

    if table.name().is_none_or(|name| name.trim().is_empty()) {
        error.name_error = Some(TABLE_NAME_EMPTY.to_string());
    }

    let mut seen = HashSet::new();
    for (index, column) in table.columns.iter().enumerate() {
        if !marks.is_live(index) {
            continue;
        }
        let column_error = &mut error.columns_error[index];

        let name = column.name.trim();
        if name.is_empty() {
            column_error.name_error = Some(COLUMN_NAME_EMPTY.to_string());
        } else if !seen.insert(name.to_lowercase()) {
            column_error.name_error = Some(COLUMN_NAME_DUPLICATE.to_string());
        }

        if column.field_type == FieldType::NotDefined {
            column_error.field_type_error = Some(COLUMN_TYPE_EMPTY.to_string());
            continue;
        }
        if !is_new(index) {
            continue;
        }

        match column.field_type {
            FieldType::Text if column.default_value.is_literal() => {
                column_error.default_value_error = Some(TEXT_DEFAULT_NOT_EXPR.to_string());
            }
            FieldType::Int64AutoIncrement => {
                if column.default_value.is_defined() {
                    column_error.default_value_error = Some(AUTO_INCREMENT_DEFAULT.to_string());
                }
                if column.is_nullable {
                    column_error.nullable_error = Some(AUTO_INCREMENT_NULLABLE.to_string());
                }
                if !name.is_empty() && name != PRIMARY_KEY {
                    column_error.field_type_error = Some(AUTO_INCREMENT_NOT_PRIMARY.to_string());
                }
            }
            _ => {}
        }
    }

    if error.is_empty() { None } else { Some(error) }
}
