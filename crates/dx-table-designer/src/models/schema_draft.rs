//! Schema draft model
//!
//! The editable copy of a table plus the marks that record how each column
//! slot has changed. Every mutation goes through a method here so the
//! column mutability rules hold no matter which surface drives the editor.

use dx_core::wire::DdlRequest;
use dx_core::{ColumnDef, DxError, EditorMode, Result, SchemaDef, TableDef};

use super::{
    SchemaAction, SchemaActionMap, TableDefError, validate_new_table, validate_with_marks,
};
use crate::DesignerError;
use crate::service::DdlGenerator;

/// Draft state of the schema editor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaDraft {
    draft_table: TableDef,
    schema_actions: SchemaActionMap,
    editor_mode: EditorMode,
    original_table_name: Option<String>,
    draft_error: Option<TableDefError>,
}

impl SchemaDraft {
    /// An uninitialized draft (mode `None`)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft_table(&self) -> &TableDef {
        &self.draft_table
    }

    pub fn schema_actions(&self) -> &SchemaActionMap {
        &self.schema_actions
    }

    pub fn editor_mode(&self) -> EditorMode {
        self.editor_mode
    }

    /// Name of the table being edited, as it is stored in the backend
    pub fn original_table_name(&self) -> Option<&str> {
        self.original_table_name.as_deref()
    }

    pub fn draft_error(&self) -> Option<&TableDefError> {
        self.draft_error.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.editor_mode != EditorMode::None
    }

    /// Start drafting a brand new table from the system-field template
    pub fn init_from_template(&mut self) {
        *self = Self {
            draft_table: TableDef::template(),
            editor_mode: EditorMode::Create,
            ..Self::default()
        };
    }

    /// Start editing an existing table
    pub fn init_from_table(&mut self, schema: &SchemaDef, table_name: &str) -> Result<()> {
        let table = schema
            .get(table_name)
            .ok_or_else(|| DxError::TableNotFound(table_name.to_string()))?;

        *self = Self {
            draft_table: table.clone(),
            editor_mode: EditorMode::Update,
            original_table_name: Some(table_name.to_string()),
            ..Self::default()
        };
        Ok(())
    }

    /// Drop the draft and go back to mode `None`
    pub fn discard(&mut self) {
        *self = Self::default();
    }

    pub fn set_table_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.ensure_initialized()?;
        self.draft_table.name = Some(name.into());
        if let Some(error) = &mut self.draft_error {
            error.name_error = None;
        }
        Ok(())
    }

    /// Append a column and return its slot index
    pub fn add_column(&mut self, column: ColumnDef) -> Result<usize> {
        self.ensure_initialized()?;
        let index = self.draft_table.columns.len();
        self.draft_table.columns.push(column);
        self.schema_actions.mark_add(index);
        if let Some(error) = &mut self.draft_error {
            error.columns_error.push(Default::default());
        }
        Ok(index)
    }

    /// Mark a column deleted. The slot stays in place.
    pub fn delete_column(&mut self, index: usize) -> Result<()> {
        self.ensure_initialized()?;
        let column = self.column_slot(index)?;
        if self.schema_actions.get(index) != Some(SchemaAction::Add) && column.is_system_field() {
            return Err(DxError::ReadOnlyColumn(column.name.clone()));
        }

        self.schema_actions.mark_delete(index);
        self.clear_column_error(index);
        Ok(())
    }

    /// Replace the column in a slot.
    ///
    /// Columns added in this draft may change freely. Existing columns may
    /// only be renamed, and system fields not at all.
    pub fn update_column(&mut self, index: usize, column: ColumnDef) -> Result<()> {
        self.ensure_initialized()?;
        let current = self.column_slot(index)?;

        match self.schema_actions.get(index) {
            Some(SchemaAction::Del) | Some(SchemaAction::None) => {
                return Err(DxError::ColumnDeleted(index));
            }
            Some(SchemaAction::Add) => {}
            Some(SchemaAction::Update) | None => {
                if current.is_system_field() {
                    return Err(DxError::ReadOnlyColumn(current.name.clone()));
                }
                if let Some(property) = current.changed_property(&column) {
                    return Err(DxError::ImmutableColumnProperty {
                        column: current.name.clone(),
                        property,
                    });
                }
            }
        }

        self.draft_table.columns[index] = column;
        self.schema_actions.mark_update(index);
        self.clear_column_error(index);
        Ok(())
    }

    pub fn set_draft_error(&mut self, error: Option<TableDefError>) {
        self.draft_error = error;
    }

    /// Validate the draft, ignoring deleted slots
    pub fn validate(&self) -> Option<TableDefError> {
        match self.editor_mode {
            EditorMode::Update => validate_with_marks(&self.draft_table, &self.schema_actions),
            EditorMode::Create | EditorMode::None => {
                validate_new_table(&self.draft_table, &self.schema_actions)
            }
        }
    }

    /// Whether saving would send anything
    pub fn has_changes(&self, schema: &SchemaDef) -> bool {
        match self.editor_mode {
            EditorMode::Create => DdlGenerator::table_changed(
                &TableDef::template(),
                &self.draft_table,
                &self.schema_actions,
            ),
            EditorMode::Update => self
                .original_table(schema)
                .map(|original| {
                    DdlGenerator::table_changed(original, &self.draft_table, &self.schema_actions)
                })
                .unwrap_or(false),
            EditorMode::None => false,
        }
    }

    /// Validate and compile the draft into the requests that persist it.
    ///
    /// `schema` must be the snapshot the draft was initialized from. An
    /// update draft with no changes compiles to no requests.
    pub fn compile(
        &self,
        schema: &SchemaDef,
    ) -> std::result::Result<Vec<DdlRequest>, DesignerError> {
        self.ensure_initialized()?;
        if let Some(error) = self.validate() {
            return Err(DesignerError::Validation(error));
        }

        let requests: Vec<DdlRequest> = match self.editor_mode {
            EditorMode::Create => {
                let request =
                    DdlGenerator::generate_create_table(&self.draft_table, &self.schema_actions)?;
                vec![request.into()]
            }
            EditorMode::Update => {
                let original = self.original_table(schema)?;
                DdlGenerator::generate_table_edit(original, &self.draft_table, &self.schema_actions)?
                    .into_iter()
                    .map(DdlRequest::from)
                    .collect()
            }
            EditorMode::None => return Err(DxError::EditorNotInitialized.into()),
        };

        tracing::debug!(
            table = ?self.draft_table.name(),
            mode = ?self.editor_mode,
            count = requests.len(),
            "compiled schema draft"
        );
        Ok(requests)
    }

    fn original_table<'a>(&self, schema: &'a SchemaDef) -> Result<&'a TableDef> {
        let name = self
            .original_table_name
            .as_deref()
            .ok_or(DxError::EditorNotInitialized)?;
        schema
            .get(name)
            .ok_or_else(|| DxError::TableNotFound(name.to_string()))
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(DxError::EditorNotInitialized)
        }
    }

    fn column_slot(&self, index: usize) -> Result<&ColumnDef> {
        self.draft_table
            .columns
            .get(index)
            .ok_or(DxError::ColumnIndexOutOfRange(index))
    }

    fn clear_column_error(&mut self, index: usize) {
        if let Some(column_error) = self
            .draft_error
            .as_mut()
            .and_then(|error| error.columns_error.get_mut(index))
        {
            *column_error = Default::default();
        }
    }
}
