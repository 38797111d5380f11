//! Models for table design
//!
//! The schema draft, its per-column action marks and the validator.

mod schema_action;
mod schema_draft;
mod validation;

pub use schema_action::{SchemaAction, SchemaActionMap};
pub use schema_draft::SchemaDraft;
pub use validation::{
    ColumnError, TableDefError, validate, validate_new_table, validate_with_marks,
};

/// User-facing validation messages
pub mod messages {
    pub use super::validation::{
        AUTO_INCREMENT_DEFAULT, AUTO_INCREMENT_NOT_PRIMARY, AUTO_INCREMENT_NULLABLE,
        COLUMN_NAME_DUPLICATE, COLUMN_NAME_EMPTY, COLUMN_TYPE_EMPTY, TABLE_NAME_EMPTY,
        TEXT_DEFAULT_NOT_EXPR,
    };
}
