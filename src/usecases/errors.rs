use axum::http::StatusCode;
use thiserror::Error;

/// Error taxonomy shared by every stream-facing operation. Remote failures
/// keep their cause attached for logs while callers only ever see the stable
/// kind and operation name.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("{0}")]
    Validation(String),

    #[error("operation not permitted: {0}")]
    PermissionDenied(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("error while performing operation: {operation}")]
    OperationFailed {
        operation: &'static str,
        #[source]
        cause: anyhow::Error,
    },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl StreamError {
    pub fn operation_failed(operation: &'static str, cause: anyhow::Error) -> Self {
        StreamError::OperationFailed { operation, cause }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            StreamError::Validation(_) => StatusCode::BAD_REQUEST,
            StreamError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            StreamError::NotFound(_) => StatusCode::NOT_FOUND,
            StreamError::OperationFailed { .. } => StatusCode::BAD_GATEWAY,
            StreamError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, StreamError>;
