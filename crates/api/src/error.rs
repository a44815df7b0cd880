//! Error types for the msgvault HTTP API server.

use axum::response::IntoResponse;
use thiserror::Error;

/// Main error type for API operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Result alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<msgvault_store::StoreError> for ApiError {
    fn from(err: msgvault_store::StoreError) -> Self {
        ApiError::Database(err.to_string())
    }
}

impl ApiError {
    /// Convert to HTTP status code.
    pub fn status_code(&self) -> axum::http::StatusCode {
        match self {
            ApiError::Io(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Json(_) => axum::http::StatusCode::BAD_REQUEST,
            ApiError::Database(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidRequest(_) => axum::http::StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "error": self.to_string(),
            "code": status.as_u16(),
        });
        (status, axum::Json(body)).into_response()
    }
}
