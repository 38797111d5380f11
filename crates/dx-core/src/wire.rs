//! Wire shapes exchanged with the data-plane service
//!
//! Field names follow the service's camelCase JSON. Nothing here carries
//! typed values; conversion to and from `Datum`/`DefaultValue` lives next
//! to the editors that need it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::Primitive;

/// A row as the data-plane sends and receives it
pub type ApiRow = BTreeMap<String, Primitive>;

/// Response of the `listTable` schema call
pub type ListTableResponse = Vec<WireTable>;

/// One table of a `listTable` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTable {
    pub table_name: String,
    pub columns: Vec<WireTableColumn>,
    #[serde(default)]
    pub primary_key: Vec<String>,
}

/// One column of a `listTable` response, in MySQL `information_schema` terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTableColumn {
    pub column_name: String,
    /// MySQL type name, e.g. `bigint`, `varchar`
    pub field_type: String,
    /// `"YES"` or `"NO"`
    pub nullable: String,
    #[serde(default)]
    pub default_value: Primitive,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub extra: String,
}

impl WireTableColumn {
    pub fn is_nullable(&self) -> bool {
        self.nullable.eq_ignore_ascii_case("YES")
    }
}

/// Column default flattened for the DDL API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireDefaultValue {
    pub typ: String,
    pub value: String,
}

/// Column definition as the DDL API expects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireColumn {
    pub name: String,
    pub field_type: String,
    pub is_nullable: bool,
    pub default_value: WireDefaultValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTable {
    pub table_name: String,
    pub columns: Vec<WireColumn>,
}

/// `{"createTable": {...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableRequest {
    pub create_table: CreateTable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropTable {
    pub table_name: String,
}

/// `{"dropTable": {...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropTableRequest {
    pub drop_table: DropTable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameTable {
    pub old_table_name: String,
    pub new_table_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddColumn {
    pub table_name: String,
    pub column: WireColumn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameColumn {
    pub table_name: String,
    pub old_column_name: String,
    pub new_column_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropColumn {
    pub table_name: String,
    pub column_name: String,
}

/// A single alteration of an existing table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TableEditRequest {
    RenameTable(RenameTable),
    AddColumn(AddColumn),
    RenameColumn(RenameColumn),
    DropColumn(DropColumn),
}

/// Anything the `ddl` endpoint accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DdlRequest {
    CreateTable(CreateTableRequest),
    DropTable(DropTableRequest),
    TableEdit(TableEditRequest),
}

impl From<CreateTableRequest> for DdlRequest {
    fn from(req: CreateTableRequest) -> Self {
        DdlRequest::CreateTable(req)
    }
}

impl From<DropTableRequest> for DdlRequest {
    fn from(req: DropTableRequest) -> Self {
        DdlRequest::DropTable(req)
    }
}

impl From<TableEditRequest> for DdlRequest {
    fn from(req: TableEditRequest) -> Self {
        DdlRequest::TableEdit(req)
    }
}

/// Keyset pagination over a table, newest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginateTableRequest {
    pub table_name: String,
    pub prev_created_at: Option<String>,
    pub prev_ids: Option<Vec<i64>>,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertRowRequest {
    pub table_name: String,
    pub values: ApiRow,
}

/// Marker asking the backend to reset a column to its default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseDefault {
    pub use_default: bool,
}

/// A value in an update patch: a concrete primitive or "use default"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UpdateValue {
    Value(Primitive),
    Default(UseDefault),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRowRequest {
    pub table_name: String,
    pub id: i64,
    pub values: BTreeMap<String, UpdateValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRowsRequest {
    pub table_name: String,
    pub ids: Vec<i64>,
}
