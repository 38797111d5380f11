//! Service layer for table designer
//!
//! Provides DDL request generation, schema loading and SQL preview.

mod ddl_generator;
mod sql_preview;
mod table_loader;

pub use ddl_generator::DdlGenerator;
pub use sql_preview::SqlPreview;
pub use table_loader::TableLoader;
