//! Error handling module.
//!
//! Failures are typed internally but flattened at the HTTP boundary: every
//! error becomes a `500 Internal Server Error` with a `{"message": ...}` body.

pub mod validation;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::ErrorBody;

pub use validation::{FieldError, ValidationError};

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Document failed validation before reaching the store.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage backend error.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Request body or path could not be extracted.
    #[error("{0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Short label used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Storage(_) => "storage",
            Self::BadRequest(_) => "bad_request",
            Self::Internal(_) => "internal",
        }
    }

    /// Get the HTTP status code for this error.
    ///
    /// Client and server failures are not distinguished.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        tracing::error!(
            kind = self.kind(),
            status = %status,
            message = %message,
            "Request failed"
        );

        (status, Json(ErrorBody { message })).into_response()
    }
}

/// Storage-specific error type.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Identifier is not well-formed for the store.
    #[error(
        "Cast to DocumentId failed for value \"{value}\" (type string) at path \"_id\" for model \"{model}\""
    )]
    Cast {
        /// Raw identifier as received.
        value: String,
        /// Model the lookup targeted.
        model: &'static str,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Lock acquisition failed.
    #[error("Failed to acquire lock: {0}")]
    LockFailed(String),

    /// File I/O error.
    #[error("File I/O error: {0}")]
    FileIO(String),

    /// Backend not available.
    #[error("Storage backend unavailable")]
    Unavailable,

    /// Client was used after `close`.
    #[error("Storage client is closed")]
    Closed,
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::FileIO(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias using `StorageError`.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_is_500() {
        let errors = [
            AppError::Validation(ValidationError::for_model("Subject")),
            AppError::Storage(StorageError::Unavailable),
            AppError::BadRequest("bad".to_string()),
            AppError::Internal("boom".to_string()),
        ];
        for error in errors {
            assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_storage_message_is_transparent() {
        let error = AppError::from(StorageError::Cast {
            value: "abc".to_string(),
            model: "Subject",
        });
        assert_eq!(
            error.to_string(),
            "Cast to DocumentId failed for value \"abc\" (type string) at path \"_id\" for model \"Subject\""
        );
        assert_eq!(error.kind(), "storage");
    }

    #[tokio::test]
    async fn test_response_body() {
        let response = AppError::Storage(StorageError::Closed).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.message, "Storage client is closed");
    }
}
