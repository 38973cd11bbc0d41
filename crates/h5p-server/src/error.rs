//! Error handling for the API server

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use h5p_kit::H5pError;
use serde_json::json;
use thiserror::Error;

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Content not found: {0}")]
    ContentNotFound(String),

    #[error("Example not found: {0}")]
    ExampleNotFound(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Action not implemented: {0}")]
    NotImplemented(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Playback failed; the message is returned to the caller as-is
    #[error("{0}")]
    Render(String),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Editor error: {0}")]
    Editor(#[from] H5pError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::ContentNotFound(_) | ApiError::ExampleNotFound(_) => {
                StatusCode::NOT_FOUND.into_response()
            }
            ApiError::UnknownAction(_) => StatusCode::BAD_REQUEST.into_response(),
            ApiError::NotImplemented(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "NOT IMPLEMENTED").into_response()
            }
            ApiError::Render(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
            other => {
                let (status, error_message) = match &other {
                    ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, other.to_string()),
                    ApiError::PayloadTooLarge(_) => {
                        (StatusCode::PAYLOAD_TOO_LARGE, other.to_string())
                    }
                    ApiError::Editor(e) => match e {
                        e if e.is_not_found() => (StatusCode::NOT_FOUND, other.to_string()),
                        H5pError::InvalidContentId(_)
                        | H5pError::InvalidLibraryRef(_)
                        | H5pError::InvalidUpload(_) => {
                            (StatusCode::BAD_REQUEST, other.to_string())
                        }
                        H5pError::Unsupported(_) => {
                            (StatusCode::NOT_IMPLEMENTED, other.to_string())
                        }
                        _ => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
                    },
                    ApiError::Config(_) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Configuration error".to_string(),
                    ),
                    _ => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
                };

                let body = Json(json!({
                    "error": error_message,
                    "status": status.as_u16()
                }));

                (status, body).into_response()
            }
        }
    }
}

// Convenience functions for common errors
impl ApiError {
    pub fn bad_request(msg: &str) -> Self {
        Self::BadRequest(msg.to_string())
    }

    /// A rejected request body; oversized bodies keep their 413
    pub fn rejected(status: StatusCode, message: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(message)
        } else {
            Self::BadRequest(message)
        }
    }

    /// Playback failure carrying the underlying error's message
    pub fn render(err: impl std::fmt::Display) -> Self {
        Self::Render(err.to_string())
    }
}
