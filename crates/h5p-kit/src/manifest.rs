use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::library::LibraryRef;

/// A library the package needs at runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub machine_name: String,
    pub major_version: u32,
    pub minor_version: u32,
}

impl From<&LibraryRef> for Dependency {
    fn from(library: &LibraryRef) -> Self {
        Self {
            machine_name: library.machine_name.clone(),
            major_version: library.major,
            minor_version: library.minor,
        }
    }
}

/// Package manifest (`h5p.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    pub main_library: String,

    #[serde(default = "default_embed_types")]
    pub embed_types: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<Value>,

    #[serde(default)]
    pub preloaded_dependencies: Vec<Dependency>,

    /// Keys this crate does not model, kept so rewrites are lossless
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_embed_types() -> Vec<String> {
    vec!["div".to_string()]
}

impl PackageManifest {
    /// Manifest for freshly authored content whose main library is `library`
    pub fn new(title: impl Into<String>, library: &LibraryRef) -> Self {
        Self {
            title: title.into(),
            language: None,
            main_library: library.machine_name.clone(),
            embed_types: default_embed_types(),
            license: None,
            authors: Vec::new(),
            preloaded_dependencies: vec![Dependency::from(library)],
            extra: Map::new(),
        }
    }

    /// The main library with the version listed among the dependencies
    pub fn main_library_ref(&self) -> Option<LibraryRef> {
        self.preloaded_dependencies
            .iter()
            .find(|dep| dep.machine_name == self.main_library)
            .map(|dep| LibraryRef::new(&dep.machine_name, dep.major_version, dep.minor_version))
    }
}
