//! Schema loading service with caching
//!
//! The dashboard works against one snapshot of the project's schema at a
//! time. The snapshot is replaced wholesale on reload, never patched.

use dx_core::{SchemaDef, TableDef};
use dx_table_designer::TableLoader;
use parking_lot::RwLock;

use crate::data_plane::DataPlane;
use crate::error::ServiceResult;

/// Service for loading the project schema
///
/// Keeps the last loaded snapshot so views can read it without another
/// round-trip. Callers invalidate after a save; the next `schema` call
/// reloads.
pub struct SchemaService {
    cache: RwLock<Option<SchemaDef>>,
}

impl SchemaService {
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(None),
        }
    }

    /// Fetch the schema from the data plane and replace the cached snapshot
    #[tracing::instrument(skip(self, data_plane))]
    pub async fn load_schema(&self, data_plane: &dyn DataPlane) -> ServiceResult<SchemaDef> {
        let response = data_plane.list_tables().await?;
        let schema = TableLoader::schema_from_response(response)?;

        tracing::info!(tables = schema.len(), "Schema loaded");
        *self.cache.write() = Some(schema.clone());
        Ok(schema)
    }

    /// Cached snapshot, loading it first if there is none
    pub async fn schema(&self, data_plane: &dyn DataPlane) -> ServiceResult<SchemaDef> {
        if let Some(schema) = self.cached_schema() {
            tracing::debug!("Schema cache hit");
            return Ok(schema);
        }
        self.load_schema(data_plane).await
    }

    pub fn cached_schema(&self) -> Option<SchemaDef> {
        self.cache.read().clone()
    }

    /// A table from the cached snapshot
    pub fn cached_table(&self, table_name: &str) -> Option<TableDef> {
        self.cache
            .read()
            .as_ref()
            .and_then(|schema| schema.get(table_name).cloned())
    }

    pub fn invalidate(&self) {
        tracing::debug!("Schema cache invalidated");
        *self.cache.write() = None;
    }
}

impl Default for SchemaService {
    fn default() -> Self {
        Self::new()
    }
}
