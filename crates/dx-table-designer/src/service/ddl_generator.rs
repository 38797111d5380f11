//! DDL request generation for schema drafts
//!
//! Turns a validated draft into the requests the data-plane `ddl` endpoint
//! accepts. Nothing here talks to the network; the caller sends the
//! requests in the order they are returned.

use dx_core::wire::{
    AddColumn, CreateTable, CreateTableRequest, DropColumn, DropTable, DropTableRequest,
    RenameColumn, RenameTable, TableEditRequest, WireColumn, WireDefaultValue,
};
use dx_core::{ColumnDef, DxError, Result, TableDef};

use crate::models::{SchemaAction, SchemaActionMap};

/// DDL generator for creating data-plane requests from table drafts
///
/// This is a stateless utility; all methods are associated functions
/// that take the draft data as input.
pub struct DdlGenerator;

impl DdlGenerator {
    /// Flatten a column for the DDL API
    pub fn column_to_wire(column: &ColumnDef) -> Result<WireColumn> {
        Ok(WireColumn {
            name: column.name.clone(),
            field_type: column.field_type.wire_name()?.to_string(),
            is_nullable: column.is_nullable,
            default_value: WireDefaultValue {
                typ: column.default_value.wire_tag().to_string(),
                value: column.default_value.wire_value(),
            },
        })
    }

    /// Generate the request creating a new table.
    ///
    /// Columns that were added and then discarded are left out.
    pub fn generate_create_table(
        table: &TableDef,
        marks: &SchemaActionMap,
    ) -> Result<CreateTableRequest> {
        let columns = table
            .columns
            .iter()
            .enumerate()
            .filter(|(index, _)| marks.is_live(*index))
            .map(|(_, column)| Self::column_to_wire(column))
            .collect::<Result<Vec<_>>>()?;

        Ok(CreateTableRequest {
            create_table: CreateTable {
                table_name: table.require_name()?.to_string(),
                columns,
            },
        })
    }

    /// Generate the requests altering an existing table.
    ///
    /// A table rename comes first; then at most one request per column
    /// slot, in ascending slot order. Later requests address the table by
    /// its new name.
    pub fn generate_table_edit(
        original: &TableDef,
        draft: &TableDef,
        marks: &SchemaActionMap,
    ) -> Result<Vec<TableEditRequest>> {
        if draft.columns.len() < original.columns.len() {
            return Err(DxError::Internal(format!(
                "draft has {} columns but the original table has {}",
                draft.columns.len(),
                original.columns.len()
            )));
        }

        let old_table_name = original.require_name()?;
        let table_name = draft.require_name()?;
        let mut requests = Vec::new();

        if old_table_name != table_name {
            requests.push(TableEditRequest::RenameTable(RenameTable {
                old_table_name: old_table_name.to_string(),
                new_table_name: table_name.to_string(),
            }));
        }

        for (index, column) in draft.columns.iter().enumerate() {
            match marks.get(index) {
                Some(SchemaAction::Add) => {
                    requests.push(TableEditRequest::AddColumn(AddColumn {
                        table_name: table_name.to_string(),
                        column: Self::column_to_wire(column)?,
                    }));
                }
                Some(SchemaAction::Update) => {
                    let old = original.columns.get(index).ok_or_else(|| {
                        DxError::Internal(format!("updated column {} has no original", index))
                    })?;
                    if old.name != column.name {
                        requests.push(TableEditRequest::RenameColumn(RenameColumn {
                            table_name: table_name.to_string(),
                            old_column_name: old.name.clone(),
                            new_column_name: column.name.clone(),
                        }));
                    }
                }
                Some(SchemaAction::Del) => {
                    // A renamed column is still stored under its old name
                    let column_name = original
                        .columns
                        .get(index)
                        .map_or(&column.name, |old| &old.name);
                    requests.push(TableEditRequest::DropColumn(DropColumn {
                        table_name: table_name.to_string(),
                        column_name: column_name.clone(),
                    }));
                }
                Some(SchemaAction::None) | None => {}
            }
        }

        Ok(requests)
    }

    /// Generate the request dropping a table
    pub fn generate_drop_table(table_name: &str) -> DropTableRequest {
        DropTableRequest {
            drop_table: DropTable {
                table_name: table_name.to_string(),
            },
        }
    }

    /// Whether saving the draft would change anything
    pub fn table_changed(original: &TableDef, draft: &TableDef, marks: &SchemaActionMap) -> bool {
        original.name != draft.name || marks.has_changes()
    }
}
