//! Table designer for dx
//!
//! The schema half of the dashboard's editing core: a draft table plus a
//! per-column action map, the validator that gates saving, and the pure
//! compiler that turns a draft into the ordered DDL requests the
//! data-plane service understands.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dx_table_designer::SchemaDraft;
//!
//! let mut draft = SchemaDraft::new();
//! draft.init_from_table(&schema, "users")?;
//! draft.set_table_name("accounts")?;
//! let requests = draft.compile(&schema)?;
//! ```

mod error;
pub mod models;
pub mod service;

pub use error::DesignerError;
pub use models::{
    ColumnError, SchemaAction, SchemaActionMap, SchemaDraft, TableDefError, validate,
    validate_new_table, validate_with_marks,
};
pub use service::{DdlGenerator, SqlPreview, TableLoader};
