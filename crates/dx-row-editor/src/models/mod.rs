//! Models for row editing

mod row_draft;

pub use row_draft::RowDraft;

use dx_core::Datum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A row keyed by column name
pub type Row = BTreeMap<String, Datum>;

/// An edit the user made to one column of the row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnAction {
    SetNull,
    /// Let the backend fill in the column's configured default
    SetDefault,
    SetRegular(Datum),
}

/// Edits keyed by column name. Absent means untouched.
pub type RowColumnActionMap = BTreeMap<String, ColumnAction>;

/// What the editor shows for a column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    /// Nothing entered and no baseline value
    NotDefined,
    Null,
    Default,
    Value(Datum),
}

/// One entry of a sparse update
#[derive(Debug, Clone, PartialEq)]
pub enum PatchValue {
    Null,
    Default,
    Value(Datum),
}

/// Sparse update: touched columns only
pub type RowPatch = BTreeMap<String, PatchValue>;
