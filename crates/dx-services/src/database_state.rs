//! Dashboard database state
//!
//! One owned value holding the schema snapshot, the current navigation and
//! both editor drafts. Every change goes through a [`DatabaseAction`];
//! transitions are synchronous and either apply fully or return an error
//! leaving the state untouched.

use dx_core::{ColumnDef, DxError, Result, SchemaDef, TableDef};
use dx_row_editor::{ColumnAction, Row, RowDraft};
use dx_table_designer::{SchemaDraft, TableDefError};

/// What the dashboard is looking at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NavDef {
    #[default]
    Schema,
    Table(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseAction {
    /// Replace the schema snapshot; drops any schema draft
    LoadSchema(SchemaDef),
    SetNav(NavDef),
    InitDraftFromTable(String),
    InitDraftFromTemplate,
    SetDraftError(Option<TableDefError>),
    /// Discard the schema draft
    DeleteScratchTable,
    SetTableName(String),
    SchemaAddColumn(ColumnDef),
    SchemaDelColumn(usize),
    SchemaUpdateColumn { index: usize, column: ColumnDef },
    InitRowEditorFromEmpty,
    InitRowEditorFromRow(Row),
    DeleteRowEditor,
    /// Edit a column of the row draft; the column is looked up in the
    /// table currently navigated to
    SetColumnAction { column: String, action: ColumnAction },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatabaseState {
    pub schema: SchemaDef,
    pub nav: NavDef,
    pub schema_draft: SchemaDraft,
    pub row_draft: RowDraft,
}

impl DatabaseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The table currently navigated to
    pub fn current_table(&self) -> Option<&TableDef> {
        match &self.nav {
            NavDef::Table(name) => self.schema.get(name),
            NavDef::Schema => None,
        }
    }

    pub fn apply(&mut self, action: DatabaseAction) -> Result<()> {
        tracing::trace!(action = ?action, "Applying database action");

        match action {
            DatabaseAction::LoadSchema(schema) => {
                self.schema = schema;
                self.schema_draft.discard();
            }
            DatabaseAction::SetNav(nav) => {
                if let NavDef::Table(name) = &nav {
                    if !self.schema.contains_key(name) {
                        return Err(DxError::TableNotFound(name.clone()));
                    }
                }
                self.nav = nav;
            }
            DatabaseAction::InitDraftFromTable(table_name) => {
                self.schema_draft.init_from_table(&self.schema, &table_name)?;
            }
            DatabaseAction::InitDraftFromTemplate => self.schema_draft.init_from_template(),
            DatabaseAction::SetDraftError(error) => self.schema_draft.set_draft_error(error),
            DatabaseAction::DeleteScratchTable => self.schema_draft.discard(),
            DatabaseAction::SetTableName(name) => self.schema_draft.set_table_name(name)?,
            DatabaseAction::SchemaAddColumn(column) => {
                self.schema_draft.add_column(column)?;
            }
            DatabaseAction::SchemaDelColumn(index) => self.schema_draft.delete_column(index)?,
            DatabaseAction::SchemaUpdateColumn { index, column } => {
                self.schema_draft.update_column(index, column)?
            }
            DatabaseAction::InitRowEditorFromEmpty => self.row_draft.init_from_empty(),
            DatabaseAction::InitRowEditorFromRow(row) => self.row_draft.init_from_row(row),
            DatabaseAction::DeleteRowEditor => self.row_draft.discard(),
            DatabaseAction::SetColumnAction { column, action } => {
                let table = match &self.nav {
                    NavDef::Table(name) => self
                        .schema
                        .get(name)
                        .ok_or_else(|| DxError::TableNotFound(name.clone()))?,
                    NavDef::Schema => {
                        return Err(DxError::Internal(
                            "row editor used without a table selected".to_string(),
                        ));
                    }
                };
                let column_def = table
                    .column(&column)
                    .ok_or_else(|| DxError::ColumnNotFound(column.clone()))?;
                self.row_draft.set_column_action(column_def, action)?;
            }
        }
        Ok(())
    }
}

/// Apply an action to an owned state and hand it back
pub fn reduce(mut state: DatabaseState, action: DatabaseAction) -> Result<DatabaseState> {
    state.apply(action)?;
    Ok(state)
}
