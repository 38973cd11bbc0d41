use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

use super::read_json;
use crate::error::{H5pError, Result};
use crate::library::{LibraryMetadata, LibraryRef};

/// Installed libraries, one directory per `<machineName>-<major>.<minor>`
#[derive(Debug, Clone)]
pub struct FileLibraryStorage {
    base_path: PathBuf,
}

impl FileLibraryStorage {
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn library_dir(&self, library: &LibraryRef) -> Result<PathBuf> {
        library.validate()?;
        Ok(self.base_path.join(library.dir_name()))
    }

    /// Metadata of every installed library that has a readable `library.json`
    pub async fn installed(&self) -> Result<Vec<LibraryMetadata>> {
        let mut libraries = Vec::new();
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(libraries),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path().join("library.json");
            match read_json::<LibraryMetadata>(&path).await {
                Ok(Some(metadata)) => libraries.push(metadata),
                Ok(None) => {}
                Err(e) => warn!("Skipping library {}: {}", entry.path().display(), e),
            }
        }

        libraries.sort_by(|a, b| {
            (&a.machine_name, a.major_version, a.minor_version)
                .cmp(&(&b.machine_name, b.major_version, b.minor_version))
        });
        Ok(libraries)
    }

    pub async fn metadata(&self, library: &LibraryRef) -> Result<LibraryMetadata> {
        read_json(&self.library_dir(library)?.join("library.json"))
            .await?
            .ok_or_else(|| H5pError::LibraryNotFound(library.to_string()))
    }

    /// Editor semantics (`semantics.json`), if the library ships them
    pub async fn semantics(&self, library: &LibraryRef) -> Result<Option<Value>> {
        read_json(&self.library_dir(library)?.join("semantics.json")).await
    }

    /// Translation strings (`language/<code>.json`), if present
    pub async fn language(&self, library: &LibraryRef, language: &str) -> Result<Option<Value>> {
        if language.contains(['/', '\\', '.']) {
            return Ok(None);
        }
        let path = self
            .library_dir(library)?
            .join("language")
            .join(format!("{language}.json"));
        read_json(&path).await
    }
}
