//! Table design service
//!
//! Compiles schema drafts and sends the resulting DDL requests to the data
//! plane. The data plane has no transactional DDL batch, so requests go
//! one at a time in compiled order and the first failure stops the save.

use dx_core::wire::DdlRequest;
use dx_core::SchemaDef;
use dx_table_designer::{DdlGenerator, SchemaDraft, SqlPreview};

use crate::data_plane::DataPlane;
use crate::error::{ServiceError, ServiceResult};

/// Service for table structure changes
pub struct TableDesignService;

impl TableDesignService {
    pub fn new() -> Self {
        Self
    }

    /// Compile a draft without sending it
    pub fn compile(&self, draft: &SchemaDraft, schema: &SchemaDef) -> ServiceResult<Vec<DdlRequest>> {
        Ok(draft.compile(schema)?)
    }

    /// SQL text of what saving the draft would run, for display only
    pub fn preview(&self, draft: &SchemaDraft, schema: &SchemaDef) -> ServiceResult<String> {
        let requests = self.compile(draft, schema)?;
        Ok(SqlPreview::render_all(&requests))
    }

    /// Validate, compile and send a draft.
    ///
    /// Returns the number of requests applied. A draft that fails
    /// validation sends nothing. `schema` must be the snapshot the draft
    /// was initialized from; reload it after a save, successful or not.
    #[tracing::instrument(skip(self, data_plane, draft, schema), fields(mode = ?draft.editor_mode()))]
    pub async fn save_draft(
        &self,
        data_plane: &dyn DataPlane,
        draft: &SchemaDraft,
        schema: &SchemaDef,
    ) -> ServiceResult<usize> {
        let requests = self.compile(draft, schema)?;
        if requests.is_empty() {
            tracing::debug!("Draft has no changes, nothing to send");
            return Ok(0);
        }

        let applied = self.send_all(data_plane, &requests).await?;
        tracing::info!(
            table_name = draft.draft_table().name().unwrap_or_default(),
            applied,
            "Schema changes saved"
        );
        Ok(applied)
    }

    /// Drop a table
    #[tracing::instrument(skip(self, data_plane))]
    pub async fn drop_table(&self, data_plane: &dyn DataPlane, table_name: &str) -> ServiceResult<()> {
        let request = DdlRequest::from(DdlGenerator::generate_drop_table(table_name));
        data_plane.ddl(&request).await.map_err(|e| {
            tracing::warn!(table_name = %table_name, error = %e, "Failed to drop table");
            e
        })?;

        tracing::info!(table_name = %table_name, "Table dropped successfully");
        Ok(())
    }

    /// Send requests in order, each awaited before the next.
    ///
    /// The first failure becomes `PartiallyApplied`; requests already
    /// applied are not rolled back.
    pub async fn send_all(
        &self,
        data_plane: &dyn DataPlane,
        requests: &[DdlRequest],
    ) -> ServiceResult<usize> {
        let total = requests.len();
        for (applied, request) in requests.iter().enumerate() {
            tracing::debug!(
                step = applied + 1,
                total,
                "Sending DDL: {}",
                SqlPreview::render(request)
            );

            if let Err(e) = data_plane.ddl(request).await {
                tracing::warn!(applied, total, error = %e, "Schema change failed");
                return Err(ServiceError::PartiallyApplied {
                    applied,
                    total,
                    source: Box::new(e),
                });
            }
        }
        Ok(total)
    }
}

impl Default for TableDesignService {
    fn default() -> Self {
        Self::new()
    }
}
