//! Schema types
//!
//! In-memory description of the project's tables, as loaded from the
//! data-plane service or as drafted in the schema editor.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{DefaultValue, DxError, FieldType, Result};

/// Columns every table carries. The backend populates them; editors
/// must treat them as read-only.
pub const SYSTEM_FIELDS: [&str; 3] = ["id", "created_at", "updated_at"];

/// Name of the primary key column
pub const PRIMARY_KEY: &str = "id";

/// Whether a column name is one of the reserved system fields
pub fn is_system_field(column_name: &str) -> bool {
    SYSTEM_FIELDS.contains(&column_name)
}

/// Extra column behaviour reported by, or requested from, the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtraColumnOption {
    #[serde(rename = "AUTO_INCREMENT")]
    AutoIncrement,
    #[serde(rename = "ON UPDATE CURRENT_TIMESTAMP(3)")]
    OnUpdateCurrentTimestamp,
}

impl ExtraColumnOption {
    /// Parse the backend's `extra` column string
    pub fn from_extra(extra: &str) -> Option<Self> {
        let upper = extra.trim().to_ascii_uppercase();
        if upper == "AUTO_INCREMENT" {
            Some(ExtraColumnOption::AutoIncrement)
        } else if upper.contains("ON UPDATE CURRENT_TIMESTAMP") {
            Some(ExtraColumnOption::OnUpdateCurrentTimestamp)
        } else {
            None
        }
    }
}

/// A column definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub name: String,
    pub field_type: FieldType,
    pub default_value: DefaultValue,
    pub is_nullable: bool,
    pub extra: Option<ExtraColumnOption>,
}

impl Default for ColumnDef {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnDef {
    /// A fresh column as the editor's "add column" row creates it
    pub fn new() -> Self {
        Self {
            name: String::new(),
            field_type: FieldType::NotDefined,
            default_value: DefaultValue::NotDefined,
            is_nullable: true,
            extra: None,
        }
    }

    /// Create a nullable column with a name and type
    pub fn named(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            ..Self::new()
        }
    }

    /// Builder: set as not null
    pub fn not_null(mut self) -> Self {
        self.is_nullable = false;
        self
    }

    /// Builder: set default value
    pub fn with_default(mut self, value: DefaultValue) -> Self {
        self.default_value = value;
        self
    }

    /// Builder: set extra option
    pub fn extra(mut self, extra: ExtraColumnOption) -> Self {
        self.extra = Some(extra);
        self
    }

    pub fn is_system_field(&self) -> bool {
        is_system_field(&self.name)
    }

    /// Name of the first property, other than the name, that differs
    /// from `other`. Existing columns may only be renamed.
    pub fn changed_property(&self, other: &ColumnDef) -> Option<&'static str> {
        if self.field_type != other.field_type {
            Some("field type")
        } else if self.is_nullable != other.is_nullable {
            Some("nullability")
        } else if self.default_value != other.default_value {
            Some("default value")
        } else if self.extra != other.extra {
            Some("extra options")
        } else {
            None
        }
    }
}

/// A table definition. Column order mirrors the backend's ordinal position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableDef {
    /// `None` for a table that has not been created yet
    pub name: Option<String>,
    pub columns: Vec<ColumnDef>,
}

impl TableDef {
    /// Create a named table with no columns
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            columns: Vec::new(),
        }
    }

    /// The starting point for a new table: the system fields only
    pub fn template() -> Self {
        Self {
            name: None,
            columns: vec![
                ColumnDef::named("id", FieldType::Int64AutoIncrement)
                    .not_null()
                    .extra(ExtraColumnOption::AutoIncrement),
                ColumnDef::named("created_at", FieldType::Datetime)
                    .not_null()
                    .with_default(DefaultValue::Expr("CURRENT_TIMESTAMP(3)".to_string())),
                ColumnDef::named("updated_at", FieldType::Datetime)
                    .not_null()
                    .with_default(DefaultValue::Expr("CURRENT_TIMESTAMP(3)".to_string()))
                    .extra(ExtraColumnOption::OnUpdateCurrentTimestamp),
            ],
        }
    }

    /// Builder: append a column
    pub fn with_column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name of a table that must already exist
    pub fn require_name(&self) -> Result<&str> {
        self.name()
            .ok_or_else(|| DxError::Internal("table has no name".to_string()))
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Every table of a project, keyed by table name, in backend order
pub type SchemaDef = IndexMap<String, TableDef>;

/// Mode of an editor (schema or row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EditorMode {
    Create,
    Update,
    #[default]
    None,
}
