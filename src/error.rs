//! Error types.
//!
//! Nothing here is fatal to the server: storage and metadata failures
//! degrade to empty or blank state, and only the HTTP layer turns an error
//! into a status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Failures of the local key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage backend error: {0}")]
    Backend(#[from] sled::Error),

    #[error("Cannot encode notes: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Failures of the remote metadata lookup.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("API key is missing")]
    MissingApiKey,

    #[error("Invalid metadata endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Upstream returned status {0}")]
    Status(u16),

    #[error("Video not found")]
    NotFound,

    #[error("Malformed metadata response")]
    Malformed,
}

/// Rejections of an uploaded note image.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ImageError {
    #[error("Image is empty")]
    Empty,

    #[error("Not an image: {0}")]
    NotAnImage(String),

    #[error("Image is {size} bytes, the limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },
}

/// Invalid environment configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// HTTP-level error, rendered as `{"error": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, axum::Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Internal(err.to_string())
    }
}
