//! Server configuration management

use crate::error::{ApiError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Root of the H5P directory tree (`content/`, `libraries/`, `editor/`, `core/`)
    pub h5p_root: PathBuf,

    /// Editor configuration document
    pub editor_config: PathBuf,

    /// Example registry document
    pub examples_config: PathBuf,

    /// Directory that downloaded examples are unpacked into
    pub examples_root: PathBuf,

    /// Script invoked to fetch an example package
    pub download_script: PathBuf,

    /// Maximum request body size, applies to uploads
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| defaults.port.to_string())
                .parse()
                .map_err(|_| ApiError::Config("Invalid PORT value".to_string()))?,
            h5p_root: env_path("H5P_ROOT").unwrap_or(defaults.h5p_root),
            editor_config: env_path("EDITOR_CONFIG").unwrap_or(defaults.editor_config),
            examples_config: env_path("EXAMPLES_CONFIG").unwrap_or(defaults.examples_config),
            examples_root: env_path("EXAMPLES_ROOT").unwrap_or(defaults.examples_root),
            download_script: env_path("DOWNLOAD_SCRIPT").unwrap_or(defaults.download_script),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| defaults.max_upload_bytes.to_string())
                .parse()
                .map_err(|_| ApiError::Config("Invalid MAX_UPLOAD_BYTES value".to_string()))?,
        })
    }

    pub fn content_root(&self) -> PathBuf {
        self.h5p_root.join("content")
    }

    pub fn libraries_root(&self) -> PathBuf {
        self.h5p_root.join("libraries")
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var).map(PathBuf::from)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            h5p_root: PathBuf::from("h5p"),
            editor_config: PathBuf::from("config.json"),
            examples_config: PathBuf::from("examples.json"),
            examples_root: PathBuf::from("examples-content"),
            download_script: PathBuf::from("download-example.sh"),
            max_upload_bytes: 50 * 1024 * 1024,
        }
    }
}
