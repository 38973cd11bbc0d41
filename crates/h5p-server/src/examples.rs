//! Example packages fetched on first use
//!
//! The registry is read once at startup and never changes afterwards.
//! Each example is unpacked into `<examples_root>/<key>/` by the
//! download script; a package counts as present once its `h5p.json`
//! exists.

use async_trait::async_trait;
use h5p_kit::PackageManifest;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{ApiError, Result};

/// One downloadable example package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleEntry {
    /// Package reference handed to the download script
    pub h5p: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Static mapping from example key to package reference
#[derive(Debug, Clone, Default)]
pub struct ExampleRegistry {
    entries: BTreeMap<String, ExampleEntry>,
}

impl ExampleRegistry {
    pub fn from_entries(
        entries: impl IntoIterator<Item = (String, ExampleEntry)>,
    ) -> Result<Self> {
        let entries: BTreeMap<_, _> = entries.into_iter().collect();
        for key in entries.keys() {
            if !is_valid_key(key) {
                return Err(ApiError::Config(format!("invalid example key {key:?}")));
            }
        }
        Ok(Self { entries })
    }

    /// Load `{ "<key>": { "h5p": "<ref>" } }`; a missing file means no examples
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("No example registry at {}", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let entries: BTreeMap<String, ExampleEntry> = serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_entries(entries)
    }

    pub fn get(&self, key: &str) -> Option<&ExampleEntry> {
        self.entries.get(key)
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExampleEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Fetches an example package into a directory
#[async_trait]
pub trait ExampleDownloader: Send + Sync + 'static {
    async fn download(&self, example: &ExampleEntry, target: &Path) -> Result<()>;
}

/// Runs `sh <script> <package-ref> <target-dir>`
#[derive(Debug, Clone)]
pub struct ScriptDownloader {
    script: PathBuf,
}

impl ScriptDownloader {
    pub fn new(script: impl Into<PathBuf>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

#[async_trait]
impl ExampleDownloader for ScriptDownloader {
    async fn download(&self, example: &ExampleEntry, target: &Path) -> Result<()> {
        info!("Downloading example {} into {}", example.h5p, target.display());

        let output = Command::new("sh")
            .arg(&self.script)
            .arg(&example.h5p)
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                ApiError::Download(format!("failed to run {}: {}", self.script.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let exit_code = output.status.code().unwrap_or(-1);
            return Err(ApiError::Download(format!(
                "{} exited with code {} for {}: {}",
                self.script.display(),
                exit_code,
                example.h5p,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

/// Makes sure an example is on disk before it is played
///
/// Every registered key gets its own lock up front, so concurrent first
/// requests for one example share a single download.
pub struct ExampleFetcher {
    registry: ExampleRegistry,
    root: PathBuf,
    downloader: Arc<dyn ExampleDownloader>,
    locks: HashMap<String, Mutex<()>>,
}

impl ExampleFetcher {
    pub fn new(
        registry: ExampleRegistry,
        root: impl Into<PathBuf>,
        downloader: Arc<dyn ExampleDownloader>,
    ) -> Self {
        let locks = registry
            .keys()
            .map(|key| (key.to_string(), Mutex::new(())))
            .collect();

        Self {
            registry,
            root: root.into(),
            downloader,
            locks,
        }
    }

    pub fn registry(&self) -> &ExampleRegistry {
        &self.registry
    }

    /// Directory an example is (or will be) unpacked into
    pub fn example_dir(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    async fn is_present(dir: &Path) -> bool {
        tokio::fs::try_exists(dir.join("h5p.json"))
            .await
            .unwrap_or(false)
    }

    /// Download the example unless it is already present; returns its directory
    pub async fn ensure(&self, key: &str) -> Result<PathBuf> {
        let (entry, lock) = match (self.registry.get(key), self.locks.get(key)) {
            (Some(entry), Some(lock)) => (entry, lock),
            _ => return Err(ApiError::ExampleNotFound(key.to_string())),
        };

        let dir = self.example_dir(key);
        if Self::is_present(&dir).await {
            return Ok(dir);
        }

        let _guard = lock.lock().await;
        if Self::is_present(&dir).await {
            debug!("Example {} was fetched while waiting", key);
            return Ok(dir);
        }

        tokio::fs::create_dir_all(&dir).await?;
        self.downloader.download(entry, &dir).await?;

        if !Self::is_present(&dir).await {
            return Err(ApiError::Download(format!(
                "example {key} has no h5p.json after download"
            )));
        }

        info!("Example {} is ready", key);
        Ok(dir)
    }
}

/// Read the manifest and parameters of an unpacked example
pub async fn load_package(dir: &Path) -> Result<(PackageManifest, Value)> {
    let manifest_path = dir.join("h5p.json");
    let params_path = dir.join("content").join("content.json");

    let manifest = serde_json::from_slice(&tokio::fs::read(&manifest_path).await?)
        .map_err(|e| ApiError::render(format!("{}: {}", manifest_path.display(), e)))?;
    let params = serde_json::from_slice(&tokio::fs::read(&params_path).await?)
        .map_err(|e| ApiError::render(format!("{}: {}", params_path.display(), e)))?;

    Ok((manifest, params))
}
