//! SQL preview for compiled DDL requests
//!
//! Renders MySQL statements equivalent to each request so the user can
//! review a save before it happens. The output is for display only; the
//! data-plane receives the structured requests.

use dx_core::wire::{DdlRequest, TableEditRequest, WireColumn, WireDefaultValue};

pub struct SqlPreview;

impl SqlPreview {
    /// Render every request, one statement per line
    pub fn render_all(requests: &[DdlRequest]) -> String {
        requests
            .iter()
            .map(Self::render)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render a single request
    pub fn render(request: &DdlRequest) -> String {
        match request {
            DdlRequest::CreateTable(req) => {
                let table = &req.create_table;
                let mut lines: Vec<String> = table
                    .columns
                    .iter()
                    .map(|column| format!("  {}", Self::column_definition(column)))
                    .collect();
                if let Some(pk) = table.columns.iter().find(|c| c.field_type == "int64Identity") {
                    lines.push(format!("  PRIMARY KEY ({})", Self::quote_ident(&pk.name)));
                }
                format!(
                    "CREATE TABLE {} (\n{}\n);",
                    Self::quote_ident(&table.table_name),
                    lines.join(",\n")
                )
            }
            DdlRequest::DropTable(req) => {
                format!("DROP TABLE {};", Self::quote_ident(&req.drop_table.table_name))
            }
            DdlRequest::TableEdit(edit) => Self::render_edit(edit),
        }
    }

    fn render_edit(edit: &TableEditRequest) -> String {
        match edit {
            TableEditRequest::RenameTable(r) => format!(
                "ALTER TABLE {} RENAME TO {};",
                Self::quote_ident(&r.old_table_name),
                Self::quote_ident(&r.new_table_name)
            ),
            TableEditRequest::AddColumn(a) => format!(
                "ALTER TABLE {} ADD COLUMN {};",
                Self::quote_ident(&a.table_name),
                Self::column_definition(&a.column)
            ),
            TableEditRequest::RenameColumn(r) => format!(
                "ALTER TABLE {} RENAME COLUMN {} TO {};",
                Self::quote_ident(&r.table_name),
                Self::quote_ident(&r.old_column_name),
                Self::quote_ident(&r.new_column_name)
            ),
            TableEditRequest::DropColumn(d) => format!(
                "ALTER TABLE {} DROP COLUMN {};",
                Self::quote_ident(&d.table_name),
                Self::quote_ident(&d.column_name)
            ),
        }
    }

    fn quote_ident(name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    fn quote_literal(value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    fn sql_type(field_type: &str) -> String {
        match field_type {
            "int64" | "int64Identity" => "BIGINT".to_string(),
            "float64" => "DOUBLE".to_string(),
            "bool" => "TINYINT(1)".to_string(),
            "datetime" => "DATETIME(3)".to_string(),
            "varchar(255)" => "VARCHAR(255)".to_string(),
            "text" => "TEXT".to_string(),
            other => other.to_ascii_uppercase(),
        }
    }

    fn default_clause(default: &WireDefaultValue) -> Option<String> {
        let value = &default.value;
        match default.typ.as_str() {
            "NotDefined" => None,
            "NULL" => Some("NULL".to_string()),
            "expr" => {
                let upper = value.to_ascii_uppercase();
                if value.starts_with('(') || upper.starts_with("CURRENT_TIMESTAMP") {
                    Some(value.clone())
                } else {
                    Some(format!("({})", value))
                }
            }
            "int64" | "float64" => Some(value.clone()),
            "bool" => Some(value.to_ascii_uppercase()),
            _ => Some(Self::quote_literal(value)),
        }
    }

    fn column_definition(column: &WireColumn) -> String {
        let mut def = format!(
            "{} {}",
            Self::quote_ident(&column.name),
            Self::sql_type(&column.field_type)
        );

        if !column.is_nullable {
            def.push_str(" NOT NULL");
        }

        if column.field_type == "int64Identity" {
            def.push_str(" AUTO_INCREMENT");
        }

        if let Some(default) = Self::default_clause(&column.default_value) {
            def.push_str(&format!(" DEFAULT {}", default));
        }

        def
    }
}
