//! Content identifiers and the documents stored per content package

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::{H5pError, Result};
use crate::manifest::PackageManifest;

/// Name of a stored content package (its directory under the content root)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(pub String);

impl ContentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh short identifier for new content
    pub fn generate() -> Self {
        let mut id = uuid::Uuid::new_v4().simple().to_string();
        id.truncate(10);
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check that the id can be used as a single directory name
    pub fn validate(&self) -> Result<()> {
        let id = self.0.as_str();
        if id.is_empty()
            || id == "."
            || id == ".."
            || id.contains(['/', '\\', '\0'])
        {
            return Err(H5pError::InvalidContentId(id.to_string()));
        }
        Ok(())
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ContentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Metadata the editor attaches to authored content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetadata {
    #[serde(default)]
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentMetadata {
    /// Metadata as recorded in a package manifest
    pub fn from_manifest(manifest: &PackageManifest) -> Self {
        Self {
            title: manifest.title.clone(),
            license: manifest.license.clone(),
            authors: manifest.authors.clone(),
            default_language: manifest.language.clone(),
            extra: Map::new(),
        }
    }
}

/// Authored parameters together with their metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentParams {
    pub params: Value,
    #[serde(default)]
    pub metadata: ContentMetadata,
}

/// Everything the editor knows about one stored package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredContent {
    pub h5p: PackageManifest,
    /// Main library as an uber name, e.g. `H5P.MultiChoice 1.16`
    pub library: String,
    pub params: ContentParams,
}
