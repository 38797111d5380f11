//! Row editor for dx
//!
//! Tracks per-column edits of a single row against an empty baseline
//! (insert) or a fetched row (update), and compiles them into the insert
//! and update payloads of the data-plane table API.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dx_row_editor::{ColumnAction, RowDraft, RowPayload};
//!
//! let mut draft = RowDraft::new();
//! draft.init_from_row(row);
//! draft.set_column_action(table.column("status").unwrap(), ColumnAction::SetDefault)?;
//! let request = RowPayload::update_request("users", &draft)?;
//! ```

pub mod models;
pub mod service;

pub use models::{
    ColumnAction, ColumnValue, PatchValue, Row, RowColumnActionMap, RowDraft, RowPatch,
};
pub use service::{PageCursor, RowPayload, api_row_to_row, row_to_api_row, rows_from_api};
