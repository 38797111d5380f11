use dx_core::DxError;
use dx_table_designer::{DesignerError, TableDefError};
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level errors with user-friendly messages
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Could not reach the data plane: {0}")]
    Transport(String),

    #[error("Data plane returned {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("Unexpected response from the data plane: {0}")]
    Decode(String),

    /// A multi-request save stopped part way. The requests before the
    /// failing one are already applied and are not rolled back.
    #[error("Applied {applied} of {total} schema changes: {source}")]
    PartiallyApplied {
        applied: usize,
        total: usize,
        #[source]
        source: Box<ServiceError>,
    },

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Table definition is invalid: {0}")]
    Validation(TableDefError),

    #[error(transparent)]
    Core(#[from] DxError),
}

impl From<DesignerError> for ServiceError {
    fn from(err: DesignerError) -> Self {
        match err {
            DesignerError::Validation(error) => ServiceError::Validation(error),
            DesignerError::Core(error) => ServiceError::Core(error),
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Decode(err.to_string())
    }
}
