use crate::services::ProviderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failures of a single analyze-look invocation.
#[derive(Debug, Error)]
pub enum LookError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// The operator forgot the API key. Details stay in the logs.
    #[error("Server Configuration Error")]
    MissingApiKey,

    /// Read failure or body over the configured limit.
    #[error("Failed to read request body: {0}")]
    BodyRead(axum::Error),

    #[error("{0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for LookError {
    fn into_response(self) -> Response {
        match self {
            LookError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, self.to_string()).into_response()
            }
            // Upstream status codes are deliberately flattened to 500.
            LookError::MissingApiKey
            | LookError::BodyRead(_)
            | LookError::InvalidBody(_)
            | LookError::Provider(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: self.to_string(),
                }),
            )
                .into_response(),
        }
    }
}
