//! Error types for dx

use thiserror::Error;

use crate::FieldType;

/// Core error type for dx operations.
///
/// Every variant signals a broken precondition somewhere in the caller
/// (an internal-consistency error). User-facing validation problems are
/// reported as values, never through this type.
#[derive(Error, Debug)]
pub enum DxError {
    #[error("internal error: field type is not defined")]
    FieldTypeNotDefined,

    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: FieldType,
        actual: String,
    },

    #[error("Invalid value for {field_type}: {value:?}")]
    InvalidValue { field_type: FieldType, value: String },

    #[error("Unsupported column type: {0}")]
    UnsupportedType(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Column index out of range: {0}")]
    ColumnIndexOutOfRange(usize),

    #[error("Column '{0}' is read-only")]
    ReadOnlyColumn(String),

    #[error("Column at index {0} has been deleted")]
    ColumnDeleted(usize),

    #[error("Cannot change {property} of existing column '{column}'")]
    ImmutableColumnProperty {
        column: String,
        property: &'static str,
    },

    #[error("Invalid column action for '{column}': {reason}")]
    InvalidColumnAction { column: String, reason: String },

    #[error("Editor is not initialized")]
    EditorNotInitialized,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for dx operations
pub type Result<T> = std::result::Result<T, DxError>;
