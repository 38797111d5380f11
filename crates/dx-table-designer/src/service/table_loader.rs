//! Table loader for building the schema snapshot
//!
//! Converts the data-plane `listTable` response, which speaks MySQL
//! `information_schema`, into `SchemaDef`.

use dx_core::wire::{ListTableResponse, WireTable, WireTableColumn};
use dx_core::{
    ColumnDef, DefaultValue, DxError, ExtraColumnOption, FieldType, Result, SchemaDef, TableDef,
    primitive_to_default_value,
};

/// Table loader for converting wire tables to `TableDef`
///
/// This is a stateless utility for loading existing tables.
pub struct TableLoader;

impl TableLoader {
    /// Map a MySQL column type onto a field type.
    ///
    /// `bigint` is auto-increment when the column's `extra` is exactly
    /// `auto_increment`. Length and modifiers (`varchar(255)`,
    /// `bigint unsigned`) are ignored.
    pub fn mysql_to_field_type(wire_type: &str, extra: &str) -> Result<FieldType> {
        let normalized = wire_type.trim().to_ascii_lowercase();
        let base = normalized
            .split(['(', ' '])
            .next()
            .unwrap_or(normalized.as_str());

        match base {
            "bigint" if extra.trim().eq_ignore_ascii_case("AUTO_INCREMENT") => {
                Ok(FieldType::Int64AutoIncrement)
            }
            "bigint" => Ok(FieldType::Int64),
            "tinyint" => Ok(FieldType::Bool),
            "double" => Ok(FieldType::Float64),
            "datetime" => Ok(FieldType::Datetime),
            "varchar" => Ok(FieldType::Varchar255),
            "text" => Ok(FieldType::Text),
            _ => Err(DxError::UnsupportedType(wire_type.to_string())),
        }
    }

    /// Convert one wire column
    pub fn column_from_wire(column: &WireTableColumn) -> Result<ColumnDef> {
        let field_type = Self::mysql_to_field_type(&column.field_type, &column.extra)?;
        let is_nullable = column.is_nullable();

        // information_schema reports NULL for "no default" as well
        let default_value = match primitive_to_default_value(&column.default_value, field_type)? {
            DefaultValue::Null if !is_nullable => DefaultValue::NotDefined,
            other => other,
        };

        Ok(ColumnDef {
            name: column.column_name.clone(),
            field_type,
            default_value,
            is_nullable,
            extra: ExtraColumnOption::from_extra(&column.extra),
        })
    }

    /// Convert one wire table
    pub fn table_from_wire(table: &WireTable) -> Result<TableDef> {
        let columns = table
            .columns
            .iter()
            .map(Self::column_from_wire)
            .collect::<Result<Vec<_>>>()?;

        Ok(TableDef {
            name: Some(table.table_name.clone()),
            columns,
        })
    }

    /// Build the schema snapshot, keeping the backend's table order
    pub fn schema_from_response(response: ListTableResponse) -> Result<SchemaDef> {
        let mut schema = SchemaDef::with_capacity(response.len());
        for table in &response {
            let def = Self::table_from_wire(table)?;
            tracing::trace!(table = %table.table_name, columns = def.columns.len(), "loaded table");
            schema.insert(table.table_name.clone(), def);
        }
        Ok(schema)
    }
}
