use dx_core::Datum;

use crate::models::Row;

const CREATED_AT: &str = "created_at";

/// Keyset position for paging a table newest-first.
///
/// Rows are ordered by `created_at` then `id`; the cursor carries the last
/// timestamp seen plus the ids already returned with that timestamp, so
/// rows created in the same instant are neither skipped nor repeated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageCursor {
    pub prev_created_at: Option<String>,
    pub prev_ids: Option<Vec<i64>>,
}

impl PageCursor {
    /// Cursor for the first page
    pub fn first() -> Self {
        Self::default()
    }

    pub fn is_first(&self) -> bool {
        self.prev_created_at.is_none()
    }

    /// Cursor for the page following `rows`; `None` when `rows` is empty
    /// or its last row has no `created_at`.
    pub fn after(rows: &[Row]) -> Option<Self> {
        let created_at = rows.last()?.get(CREATED_AT).and_then(Datum::as_str)?;

        let mut prev_ids: Vec<i64> = rows
            .iter()
            .rev()
            .take_while(|row| row.get(CREATED_AT).and_then(Datum::as_str) == Some(created_at))
            .filter_map(|row| row.get("id").and_then(Datum::as_i64))
            .collect();
        prev_ids.reverse();

        Some(Self {
            prev_created_at: Some(created_at.to_string()),
            prev_ids: Some(prev_ids),
        })
    }
}
