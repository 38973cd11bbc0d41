//! Error types for h5p-kit
//!
//! Errors are grouped by what failed: a lookup, a document on disk, or a
//! capability the chosen collaborator does not provide.

use thiserror::Error;

/// Main error type for editor, player and storage operations
#[derive(Error, Debug)]
pub enum H5pError {
    #[error("Content not found: {0}")]
    ContentNotFound(String),

    #[error("Library not found: {0}")]
    LibraryNotFound(String),

    #[error("Invalid content id: {0:?}")]
    InvalidContentId(String),

    #[error("Invalid library reference: {0:?}")]
    InvalidLibraryRef(String),

    #[error("Invalid document {path}: {reason}")]
    InvalidDocument { path: String, reason: String },

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Not supported: {0}")]
    Unsupported(String),

    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Shorthand result type for h5p-kit operations
pub type Result<T> = std::result::Result<T, H5pError>;

impl H5pError {
    pub fn invalid_document(path: impl std::fmt::Display, reason: impl ToString) -> Self {
        Self::InvalidDocument {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether the error means "nothing stored under that name"
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            H5pError::ContentNotFound(_) | H5pError::LibraryNotFound(_)
        )
    }
}
