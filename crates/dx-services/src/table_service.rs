//! Table data service
//!
//! Provides row browsing with keyset pagination and row writes built from
//! row drafts.

use dx_core::{EditorMode, TableDef};
use dx_row_editor::{PageCursor, Row, RowDraft, RowPayload, rows_from_api};

use crate::data_plane::DataPlane;
use crate::error::{ServiceError, ServiceResult};

/// One page of typed rows
#[derive(Debug, Clone, PartialEq)]
pub struct RowPage {
    pub rows: Vec<Row>,
    /// Cursor for the next page; `None` once a short page came back
    pub next: Option<PageCursor>,
}

/// Service for table-level row operations
pub struct TableService {
    page_size: u32,
}

impl TableService {
    /// Create a new table service
    ///
    /// # Arguments
    ///
    /// * `page_size` - Rows requested per page
    pub fn new(page_size: u32) -> Self {
        Self { page_size }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fetch the page after `cursor`, newest rows first
    #[tracing::instrument(skip(self, data_plane, table, cursor), fields(table_name = ?table.name()))]
    pub async fn paginate(
        &self,
        data_plane: &dyn DataPlane,
        table: &TableDef,
        cursor: &PageCursor,
    ) -> ServiceResult<RowPage> {
        let table_name = table.require_name()?;
        let request = RowPayload::paginate_request(table_name, cursor, self.page_size);
        let api_rows = data_plane.paginate_table(&request).await?;
        let rows = rows_from_api(&api_rows, table)?;

        let next = if rows.len() < self.page_size as usize {
            None
        } else {
            PageCursor::after(&rows)
        };

        tracing::debug!(rows = rows.len(), has_next = next.is_some(), "Page fetched");
        Ok(RowPage { rows, next })
    }

    #[tracing::instrument(skip(self, data_plane, draft))]
    pub async fn insert_row(
        &self,
        data_plane: &dyn DataPlane,
        table_name: &str,
        draft: &RowDraft,
    ) -> ServiceResult<()> {
        let request = RowPayload::insert_request(table_name, draft)?;
        data_plane.insert_row(&request).await?;

        tracing::info!(table_name = %table_name, "Row inserted");
        Ok(())
    }

    /// Send the draft's edits for the row it was initialized from.
    ///
    /// Does nothing when no column was touched.
    #[tracing::instrument(skip(self, data_plane, draft))]
    pub async fn update_row(
        &self,
        data_plane: &dyn DataPlane,
        table_name: &str,
        draft: &RowDraft,
    ) -> ServiceResult<()> {
        let request = RowPayload::update_request(table_name, draft)?;
        if request.values.is_empty() {
            tracing::debug!(row_id = request.id, "No column changes, skipping update");
            return Ok(());
        }
        data_plane.update_row(&request).await?;

        tracing::info!(table_name = %table_name, row_id = request.id, "Row updated");
        Ok(())
    }

    /// Insert or update depending on the draft's mode
    pub async fn save_row(
        &self,
        data_plane: &dyn DataPlane,
        table_name: &str,
        draft: &RowDraft,
    ) -> ServiceResult<()> {
        match draft.mode() {
            EditorMode::Create => self.insert_row(data_plane, table_name, draft).await,
            EditorMode::Update => self.update_row(data_plane, table_name, draft).await,
            EditorMode::None => Err(ServiceError::Core(dx_core::DxError::EditorNotInitialized)),
        }
    }

    #[tracing::instrument(skip(self, data_plane))]
    pub async fn delete_rows(
        &self,
        data_plane: &dyn DataPlane,
        table_name: &str,
        ids: Vec<i64>,
    ) -> ServiceResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let count = ids.len();
        data_plane
            .delete_rows(&RowPayload::delete_request(table_name, ids))
            .await?;

        tracing::info!(table_name = %table_name, count, "Rows deleted");
        Ok(())
    }
}

impl Default for TableService {
    fn default() -> Self {
        Self::new(100)
    }
}
