use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::core::app_state::ConfigError;

/// Public application error type.
///
/// Handlers log the underlying cause; clients only see the code and message.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request ---
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("Upload failed. Please try again.")]
    UploadFailed,

    #[error("An error occurred while retrieving the response.")]
    RetrievalFailed,

    /// Status and code carried over from a lower layer.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR, // startup-only
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UploadFailed => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::RetrievalFailed => StatusCode::BAD_GATEWAY,
            AppError::Http { status, .. } => *status,
            AppError::Bind(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::UploadFailed => "UPLOAD_FAILED",
            AppError::RetrievalFailed => "RETRIEVAL_FAILED",
            AppError::Http { code, .. } => code,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.error_code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<axum::extract::rejection::FormRejection> for AppError {
    fn from(err: axum::extract::rejection::FormRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

impl From<axum::extract::multipart::MultipartRejection> for AppError {
    fn from(err: axum::extract::multipart::MultipartRejection) -> Self {
        AppError::Http {
            status: err.status(),
            code: "INVALID_MULTIPART",
            message: err.body_text(),
        }
    }
}

/// Keeps the multipart status (400 for malformed bodies, 413 over the body limit).
impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::Http {
            status: err.status(),
            code: "INVALID_MULTIPART",
            message: err.body_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_failures_use_generic_messages() {
        assert_eq!(
            AppError::UploadFailed.to_string(),
            "Upload failed. Please try again."
        );
        assert_eq!(
            AppError::UploadFailed.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::RetrievalFailed.to_string(),
            "An error occurred while retrieving the response."
        );
        assert_eq!(AppError::RetrievalFailed.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(AppError::RetrievalFailed.error_code(), "RETRIEVAL_FAILED");
    }
}
