//! dx core - value model and schema types for the dx dashboard
//!
//! This crate provides the fundamental types that all other dx crates
//! depend on. It defines:
//!
//! - `FieldType`, `Datum`, `DefaultValue` - the typed value model and its
//!   conversions from and to loosely typed backend primitives
//! - `ColumnDef`, `TableDef`, `SchemaDef` - the in-memory schema
//! - The wire shapes exchanged with the data-plane service

mod error;
mod schema;
mod types;
pub mod wire;

pub use error::*;
pub use schema::*;
pub use types::*;
