//! Row draft model

use dx_core::{ColumnDef, Datum, DxError, EditorMode, FieldType, PRIMARY_KEY, Result};

use super::{ColumnAction, ColumnValue, PatchValue, Row, RowColumnActionMap, RowPatch};

/// Draft state of the row editor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowDraft {
    column_actions: RowColumnActionMap,
    mode: EditorMode,
    original_row: Row,
}

impl RowDraft {
    /// An uninitialized draft (mode `None`)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn column_actions(&self) -> &RowColumnActionMap {
        &self.column_actions
    }

    pub fn original_row(&self) -> &Row {
        &self.original_row
    }

    pub fn is_initialized(&self) -> bool {
        self.mode != EditorMode::None
    }

    /// Start drafting a new row
    pub fn init_from_empty(&mut self) {
        *self = Self {
            mode: EditorMode::Create,
            ..Self::default()
        };
    }

    /// Start editing a fetched row
    pub fn init_from_row(&mut self, row: Row) {
        *self = Self {
            mode: EditorMode::Update,
            original_row: row,
            ..Self::default()
        };
    }

    pub fn discard(&mut self) {
        *self = Self::default();
    }

    /// Record an edit for `column`, replacing any earlier edit.
    ///
    /// System fields and auto-increment columns are filled in by the
    /// backend and cannot be edited.
    pub fn set_column_action(&mut self, column: &ColumnDef, action: ColumnAction) -> Result<()> {
        if !self.is_initialized() {
            return Err(DxError::EditorNotInitialized);
        }
        if column.is_system_field() || column.field_type == FieldType::Int64AutoIncrement {
            return Err(DxError::ReadOnlyColumn(column.name.clone()));
        }

        let invalid = |reason: &str| DxError::InvalidColumnAction {
            column: column.name.clone(),
            reason: reason.to_string(),
        };
        match &action {
            ColumnAction::SetNull if !column.is_nullable => {
                return Err(invalid("column is not nullable"));
            }
            ColumnAction::SetDefault if !column.default_value.is_defined() => {
                return Err(invalid("column has no default value"));
            }
            ColumnAction::SetRegular(Datum::Null) => {
                return Err(invalid("use SetNull to store NULL"));
            }
            ColumnAction::SetRegular(datum) if !datum.matches(column.field_type) => {
                return Err(DxError::TypeMismatch {
                    expected: column.field_type,
                    actual: datum
                        .field_type()
                        .map_or_else(|| "NULL".to_string(), |t| t.to_string()),
                });
            }
            _ => {}
        }

        tracing::trace!(column = %column.name, ?action, "set column action");
        self.column_actions.insert(column.name.clone(), action);
        Ok(())
    }

    /// Forget the edit for a column, reverting it to the baseline
    pub fn clear_column_action(&mut self, column_name: &str) {
        self.column_actions.remove(column_name);
    }

    /// Whether the user has touched any column
    pub fn has_pending_changes(&self) -> bool {
        !self.column_actions.is_empty()
    }

    /// The value the editor should show for a column
    pub fn resolve_value(&self, column_name: &str) -> ColumnValue {
        if !self.is_initialized() {
            return ColumnValue::NotDefined;
        }

        match self.column_actions.get(column_name) {
            Some(ColumnAction::SetNull) => ColumnValue::Null,
            Some(ColumnAction::SetDefault) => ColumnValue::Default,
            Some(ColumnAction::SetRegular(datum)) => ColumnValue::Value(datum.clone()),
            None if self.mode == EditorMode::Update => match self.original_row.get(column_name) {
                Some(Datum::Null) => ColumnValue::Null,
                Some(datum) => ColumnValue::Value(datum.clone()),
                None => ColumnValue::NotDefined,
            },
            None => ColumnValue::NotDefined,
        }
    }

    /// The full row to insert: the baseline overlaid with every edit.
    /// Columns left to their default are omitted so the backend fills them.
    pub fn insert_row(&self) -> Row {
        let mut row = self.original_row.clone();
        for (name, action) in &self.column_actions {
            match action {
                ColumnAction::SetNull => {
                    row.insert(name.clone(), Datum::Null);
                }
                ColumnAction::SetRegular(datum) => {
                    row.insert(name.clone(), datum.clone());
                }
                ColumnAction::SetDefault => {
                    row.remove(name);
                }
            }
        }
        row
    }

    /// The sparse update: only touched columns
    pub fn update_row(&self) -> RowPatch {
        self.column_actions
            .iter()
            .map(|(name, action)| {
                let value = match action {
                    ColumnAction::SetNull => PatchValue::Null,
                    ColumnAction::SetDefault => PatchValue::Default,
                    ColumnAction::SetRegular(datum) => PatchValue::Value(datum.clone()),
                };
                (name.clone(), value)
            })
            .collect()
    }

    /// Primary key of the row being updated
    pub fn row_id(&self) -> Result<i64> {
        match self.mode {
            EditorMode::None => Err(DxError::EditorNotInitialized),
            _ => self
                .original_row
                .get(PRIMARY_KEY)
                .and_then(Datum::as_i64)
                .ok_or_else(|| DxError::ColumnNotFound(PRIMARY_KEY.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dx_core::DefaultValue;
    use pretty_assertions::assert_eq;

    fn name() -> ColumnDef {
        ColumnDef::named("name", FieldType::Varchar255).not_null()
    }

    fn bio() -> ColumnDef {
        ColumnDef::named("bio", FieldType::Text)
    }

    fn status() -> ColumnDef {
        ColumnDef::named("status", FieldType::Varchar255)
            .not_null()
            .with_default(DefaultValue::Varchar("active".to_string()))
    }

    fn fetched() -> Row {
        Row::from([
            ("id".to_string(), Datum::Int64(7)),
            ("name".to_string(), Datum::Varchar("ada".to_string())),
            ("bio".to_string(), Datum::Null),
            ("status".to_string(), Datum::Varchar("away".to_string())),
        ])
    }

    #[test]
    fn test_uninitialized_draft() {
        let mut draft = RowDraft::new();
        assert_eq!(draft.resolve_value("name"), ColumnValue::NotDefined);
        assert!(matches!(
            draft.set_column_action(&name(), ColumnAction::SetNull),
            Err(DxError::EditorNotInitialized)
        ));
        assert!(matches!(draft.row_id(), Err(DxError::EditorNotInitialized)));
    }

    #[test]
    fn test_resolve_value_in_create_mode() {
        let mut draft = RowDraft::new();
        draft.init_from_empty();
        assert_eq!(draft.resolve_value("name"), ColumnValue::NotDefined);

        draft
            .set_column_action(&status(), ColumnAction::SetDefault)
            .unwrap();
        assert_eq!(draft.resolve_value("status"), ColumnValue::Default);
    }

    #[test]
    fn test_resolve_value_in_update_mode() {
        let mut draft = RowDraft::new();
        draft.init_from_row(fetched());
        assert_eq!(
            draft.resolve_value("name"),
            ColumnValue::Value(Datum::Varchar("ada".to_string()))
        );
        assert_eq!(draft.resolve_value("bio"), ColumnValue::Null);
        assert_eq!(draft.resolve_value("missing"), ColumnValue::NotDefined);

        draft
            .set_column_action(&name(), ColumnAction::SetRegular(Datum::Varchar("grace".to_string())))
            .unwrap();
        assert_eq!(
            draft.resolve_value("name"),
            ColumnValue::Value(Datum::Varchar("grace".to_string()))
        );
    }

    #[test]
    fn test_last_write_wins() {
        let mut draft = RowDraft::new();
        draft.init_from_empty();
        draft.set_column_action(&bio(), ColumnAction::SetNull).unwrap();
        draft
            .set_column_action(&bio(), ColumnAction::SetRegular(Datum::Text("hi".to_string())))
            .unwrap();
        assert_eq!(draft.column_actions().len(), 1);
        assert_eq!(
            draft.resolve_value("bio"),
            ColumnValue::Value(Datum::Text("hi".to_string()))
        );

        draft.clear_column_action("bio");
        assert!(!draft.has_pending_changes());
    }

    #[test]
    fn test_insert_row_omits_defaults() {
        let mut draft = RowDraft::new();
        draft.init_from_empty();
        draft
            .set_column_action(&name(), ColumnAction::SetRegular(Datum::Varchar("ada".to_string())))
            .unwrap();
        draft.set_column_action(&bio(), ColumnAction::SetNull).unwrap();
        draft
            .set_column_action(&status(), ColumnAction::SetDefault)
            .unwrap();

        assert_eq!(
            draft.insert_row(),
            Row::from([
                ("bio".to_string(), Datum::Null),
                ("name".to_string(), Datum::Varchar("ada".to_string())),
            ])
        );
    }

    #[test]
    fn test_insert_row_overlays_baseline() {
        let mut draft = RowDraft::new();
        draft.init_from_row(fetched());
        draft
            .set_column_action(&status(), ColumnAction::SetDefault)
            .unwrap();

        let row = draft.insert_row();
        assert!(!row.contains_key("status"));
        assert_eq!(row.get("name"), Some(&Datum::Varchar("ada".to_string())));
    }

    #[test]
    fn test_update_row_is_sparse() {
        let mut draft = RowDraft::new();
        draft.init_from_row(fetched());
        assert!(draft.update_row().is_empty());

        draft.set_column_action(&bio(), ColumnAction::SetNull).unwrap();
        draft
            .set_column_action(&status(), ColumnAction::SetDefault)
            .unwrap();

        assert_eq!(
            draft.update_row(),
            RowPatch::from([
                ("bio".to_string(), PatchValue::Null),
                ("status".to_string(), PatchValue::Default),
            ])
        );
        assert_eq!(draft.row_id().unwrap(), 7);
    }

    #[test]
    fn test_read_only_columns() {
        let mut draft = RowDraft::new();
        draft.init_from_empty();

        let created_at = ColumnDef::named("created_at", FieldType::Datetime).not_null();
        assert!(matches!(
            draft.set_column_action(&created_at, ColumnAction::SetDefault),
            Err(DxError::ReadOnlyColumn(name)) if name == "created_at"
        ));

        let seq = ColumnDef::named("seq", FieldType::Int64AutoIncrement).not_null();
        assert!(matches!(
            draft.set_column_action(&seq, ColumnAction::SetRegular(Datum::Int64(1))),
            Err(DxError::ReadOnlyColumn(_))
        ));
    }

    #[test]
    fn test_rejected_actions() {
        let mut draft = RowDraft::new();
        draft.init_from_empty();

        assert!(matches!(
            draft.set_column_action(&name(), ColumnAction::SetNull),
            Err(DxError::InvalidColumnAction { .. })
        ));
        assert!(matches!(
            draft.set_column_action(&name(), ColumnAction::SetDefault),
            Err(DxError::InvalidColumnAction { .. })
        ));
        assert!(matches!(
            draft.set_column_action(&bio(), ColumnAction::SetRegular(Datum::Null)),
            Err(DxError::InvalidColumnAction { .. })
        ));
        assert!(matches!(
            draft.set_column_action(&name(), ColumnAction::SetRegular(Datum::Int64(3))),
            Err(DxError::TypeMismatch { expected: FieldType::Varchar255, .. })
        ));
        assert!(!draft.has_pending_changes());
    }

    #[test]
    fn test_row_id_requires_baseline_id() {
        let mut draft = RowDraft::new();
        draft.init_from_empty();
        assert!(matches!(draft.row_id(), Err(DxError::ColumnNotFound(_))));
    }
}
