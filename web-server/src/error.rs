//! Error handling

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use urlsentry_core::{BatchError, InferenceError};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    // Request errors
    #[error("{0}")]
    ValidationError(String),

    #[error("Invalid upload: {0}")]
    UploadError(String),

    // Batch errors
    #[error(transparent)]
    Batch(#[from] BatchError),

    // Model errors
    #[error(transparent)]
    Inference(#[from] InferenceError),

    // Generic errors
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::UploadError(_) => StatusCode::BAD_REQUEST,
            AppError::Batch(BatchError::Inference(_)) | AppError::Batch(BatchError::Io(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Batch(_) => StatusCode::BAD_REQUEST,
            AppError::Inference(_) | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the client
    pub fn public_message(&self) -> String {
        match self.status() {
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("Internal error: {}", self);
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = self.public_message();

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::UploadError(err.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError(format!("Background task failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_is_client_error() {
        let err = AppError::from(BatchError::MissingUrlColumn {
            found: vec!["link".to_string()],
        });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.public_message().contains("'url' column"));
    }

    #[test]
    fn test_inference_failure_is_hidden() {
        let err = AppError::from(InferenceError::Backend("session poisoned".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Internal server error");
    }
}
