//! Service layer for row editor
//!
//! Converts between wire rows and typed rows and builds the requests of
//! the data-plane table API.

mod convert;
mod page_cursor;
mod row_payload;

pub use convert::{api_row_to_row, row_to_api_row, rows_from_api};
pub use page_cursor::PageCursor;
pub use row_payload::RowPayload;
