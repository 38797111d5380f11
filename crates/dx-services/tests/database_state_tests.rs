//! Tests for the DatabaseState reducer
//!
//! Drives the editing state the way the dashboard does, one action at a time.

mod common;

use dx_core::{ColumnDef, Datum, DxError, EditorMode, FieldType};
use dx_row_editor::{ColumnAction, ColumnValue, Row};
use dx_services::{DatabaseAction, DatabaseState, NavDef, reduce};
use dx_table_designer::{SchemaAction, TableDefError};
use pretty_assertions::assert_eq;

use common::sample_schema;

fn loaded_state() -> DatabaseState {
    reduce(
        DatabaseState::new(),
        DatabaseAction::LoadSchema(sample_schema()),
    )
    .expect("should load")
}

#[test]
fn schema_editing_flow() {
    let mut state = loaded_state();

    state
        .apply(DatabaseAction::InitDraftFromTable("users".to_string()))
        .unwrap();
    assert_eq!(state.schema_draft.editor_mode(), EditorMode::Update);

    state
        .apply(DatabaseAction::SchemaAddColumn(ColumnDef::named(
            "email",
            FieldType::Varchar255,
        )))
        .unwrap();
    state.apply(DatabaseAction::SchemaDelColumn(5)).unwrap();
    state.apply(DatabaseAction::SchemaDelColumn(4)).unwrap();

    let marks = state.schema_draft.schema_actions();
    assert_eq!(marks.get(5), Some(SchemaAction::None));
    assert_eq!(marks.get(4), Some(SchemaAction::Del));
    assert_eq!(state.schema_draft.draft_table().columns.len(), 6);
}

#[test]
fn set_table_name_clears_name_error() {
    let mut state = loaded_state();
    state.apply(DatabaseAction::InitDraftFromTemplate).unwrap();

    let error = state.schema_draft.validate();
    assert!(error.is_some());
    state.apply(DatabaseAction::SetDraftError(error)).unwrap();
    assert!(state.schema_draft.draft_error().is_some_and(|e| e.name_error.is_some()));

    state
        .apply(DatabaseAction::SetTableName("orders".to_string()))
        .unwrap();
    assert_eq!(
        state.schema_draft.draft_error(),
        Some(&TableDefError {
            name_error: None,
            columns_error: vec![Default::default(); 3],
        })
    );
}

#[test]
fn system_fields_are_read_only() {
    let mut state = loaded_state();
    state
        .apply(DatabaseAction::InitDraftFromTable("users".to_string()))
        .unwrap();

    let result = state.apply(DatabaseAction::SchemaDelColumn(1));
    assert!(matches!(result, Err(DxError::ReadOnlyColumn(name)) if name == "created_at"));

    let result = state.apply(DatabaseAction::SchemaUpdateColumn {
        index: 0,
        column: ColumnDef::named("key", FieldType::Int64AutoIncrement),
    });
    assert!(matches!(result, Err(DxError::ReadOnlyColumn(_))));
    assert!(state.schema_draft.schema_actions().is_empty());
}

#[test]
fn load_schema_discards_schema_draft() {
    let mut state = loaded_state();
    state.apply(DatabaseAction::InitDraftFromTemplate).unwrap();
    state.apply(DatabaseAction::LoadSchema(sample_schema())).unwrap();

    assert_eq!(state.schema_draft.editor_mode(), EditorMode::None);
    assert_eq!(state.schema.len(), 2);

    state.apply(DatabaseAction::InitDraftFromTemplate).unwrap();
    state.apply(DatabaseAction::DeleteScratchTable).unwrap();
    assert!(!state.schema_draft.is_initialized());
}

#[test]
fn unknown_table_is_rejected() {
    let mut state = loaded_state();

    assert!(matches!(
        state.apply(DatabaseAction::InitDraftFromTable("ghosts".to_string())),
        Err(DxError::TableNotFound(_))
    ));
    assert!(matches!(
        state.apply(DatabaseAction::SetNav(NavDef::Table("ghosts".to_string()))),
        Err(DxError::TableNotFound(_))
    ));
    assert_eq!(state.nav, NavDef::Schema);
}

#[test]
fn row_editing_flow() {
    let mut state = loaded_state();
    state
        .apply(DatabaseAction::SetNav(NavDef::Table("posts".to_string())))
        .unwrap();
    assert_eq!(state.current_table().and_then(|t| t.name()), Some("posts"));

    state
        .apply(DatabaseAction::InitRowEditorFromRow(Row::from([
            ("id".to_string(), Datum::Int64(7)),
            ("title".to_string(), Datum::Varchar("Draft".to_string())),
        ])))
        .unwrap();
    state
        .apply(DatabaseAction::SetColumnAction {
            column: "title".to_string(),
            action: ColumnAction::SetRegular(Datum::Varchar("Final".to_string())),
        })
        .unwrap();

    assert_eq!(
        state.row_draft.resolve_value("title"),
        ColumnValue::Value(Datum::Varchar("Final".to_string()))
    );

    let result = state.apply(DatabaseAction::SetColumnAction {
        column: "title".to_string(),
        action: ColumnAction::SetNull,
    });
    assert!(matches!(result, Err(DxError::InvalidColumnAction { .. })));

    let result = state.apply(DatabaseAction::SetColumnAction {
        column: "missing".to_string(),
        action: ColumnAction::SetNull,
    });
    assert!(matches!(result, Err(DxError::ColumnNotFound(_))));

    state.apply(DatabaseAction::DeleteRowEditor).unwrap();
    assert_eq!(state.row_draft.resolve_value("title"), ColumnValue::NotDefined);
}

#[test]
fn set_column_action_needs_a_table() {
    let mut state = loaded_state();
    state.apply(DatabaseAction::InitRowEditorFromEmpty).unwrap();

    let result = state.apply(DatabaseAction::SetColumnAction {
        column: "title".to_string(),
        action: ColumnAction::SetNull,
    });
    assert!(matches!(result, Err(DxError::Internal(_))));
}
