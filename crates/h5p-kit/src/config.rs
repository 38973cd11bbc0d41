//! Editor configuration document

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use crate::error::{H5pError, Result};

/// Settings the editor and player need to build URLs and integration data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// URL prefix under which the H5P root is served
    pub base_url: String,

    /// Prefix of the editor's ajax endpoint; the action name is appended
    pub ajax_path: String,

    /// URL of the editor's own assets
    pub library_url: String,

    /// URL prefix of stored content files
    pub files_path: String,

    /// URL prefix of installed libraries
    pub libraries_url: String,

    pub content_type_cache_refresh_interval: u64,
    pub core_api_version: CoreApiVersion,
    pub platform_name: String,
    pub platform_version: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreApiVersion {
    pub major: u32,
    pub minor: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            base_url: "/h5p".to_string(),
            ajax_path: "/ajax?action=".to_string(),
            library_url: "/h5p/editor/".to_string(),
            files_path: "/h5p/content".to_string(),
            libraries_url: "/h5p/libraries".to_string(),
            content_type_cache_refresh_interval: 86_400_000,
            core_api_version: CoreApiVersion { major: 1, minor: 24 },
            platform_name: "H5P-Demo".to_string(),
            platform_version: crate::version().to_string(),
            extra: Map::new(),
        }
    }
}

impl EditorConfig {
    /// Load the configuration document; a missing file yields the defaults
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match tokio::fs::read(path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| H5pError::Config(format!("{}: {}", path.display(), e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No editor config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(H5pError::Io(e)),
        }
    }
}
