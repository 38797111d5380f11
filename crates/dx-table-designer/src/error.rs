use dx_core::DxError;
use thiserror::Error;

use crate::models::TableDefError;

/// Why a schema draft could not be compiled
#[derive(Error, Debug)]
pub enum DesignerError {
    /// The draft failed validation; the error belongs on the draft
    #[error("Table definition is invalid: {0}")]
    Validation(TableDefError),

    #[error(transparent)]
    Core(#[from] DxError),
}
