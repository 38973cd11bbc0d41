//! On-disk package and library storage

mod content;
mod library;

pub use content::FileContentStorage;
pub use library::FileLibraryStorage;

use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::fs;

use crate::error::{H5pError, Result};

/// Read and parse a JSON document, `Ok(None)` when the file does not exist
pub(crate) async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(H5pError::Io(e)),
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| H5pError::invalid_document(path.display(), e))
}

/// Serialize `value` as pretty JSON, creating parent directories
pub(crate) async fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_vec_pretty(value)?;
    fs::write(path, json).await?;
    Ok(())
}
