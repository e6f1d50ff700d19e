use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::usecases::errors::StreamError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

impl IntoResponse for StreamError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // The cause stays in the logs; clients only see the stable kind.
        let message = match &self {
            StreamError::Internal(cause) => {
                error!(error = ?cause, "request failed with internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            code: status.as_u16(),
            message,
        });

        (status, body).into_response()
    }
}
