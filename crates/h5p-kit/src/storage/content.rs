use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::{read_json, write_json};
use crate::content::ContentId;
use crate::error::{H5pError, Result};
use crate::manifest::PackageManifest;

const MANIFEST_FILE: &str = "h5p.json";
const PARAMS_FILE: &str = "content.json";

/// Content packages stored as one directory per content id
#[derive(Debug, Clone)]
pub struct FileContentStorage {
    base_path: PathBuf,
}

impl FileContentStorage {
    /// Create a storage rooted at `base_path` (the content root)
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Directory of one content package
    pub fn content_dir(&self, id: &ContentId) -> Result<PathBuf> {
        id.validate()?;
        Ok(self.base_path.join(id.as_str()))
    }

    /// Names of all stored packages, in directory enumeration order
    pub async fn list_ids(&self) -> Result<Vec<ContentId>> {
        let mut ids = Vec::new();
        let mut entries = fs::read_dir(&self.base_path).await?;

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                ids.push(ContentId::new(name));
            }
        }

        Ok(ids)
    }

    /// Read the package manifest (`h5p.json`)
    pub async fn load_manifest(&self, id: &ContentId) -> Result<PackageManifest> {
        let path = self.content_dir(id)?.join(MANIFEST_FILE);
        read_json(&path)
            .await?
            .ok_or_else(|| H5pError::ContentNotFound(id.to_string()))
    }

    /// Read the authored parameters (`content.json`)
    pub async fn load_params(&self, id: &ContentId) -> Result<Value> {
        let path = self.content_dir(id)?.join(PARAMS_FILE);
        read_json(&path)
            .await?
            .ok_or_else(|| H5pError::ContentNotFound(id.to_string()))
    }

    pub async fn save_manifest(&self, id: &ContentId, manifest: &PackageManifest) -> Result<()> {
        write_json(&self.content_dir(id)?.join(MANIFEST_FILE), manifest).await
    }

    pub async fn save_params(&self, id: &ContentId, params: &Value) -> Result<()> {
        write_json(&self.content_dir(id)?.join(PARAMS_FILE), params).await
    }

    /// Store a file below the package directory, returning its absolute path
    pub async fn save_file(
        &self,
        id: &ContentId,
        relative: &str,
        bytes: &[u8],
    ) -> Result<PathBuf> {
        if relative.split('/').any(|part| part.is_empty() || part == "..")
            || relative.contains('\\')
        {
            return Err(H5pError::InvalidUpload(format!("invalid file path {relative:?}")));
        }

        let file_path = self.content_dir(id)?.join(relative);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&file_path, bytes).await?;

        Ok(file_path)
    }
}
