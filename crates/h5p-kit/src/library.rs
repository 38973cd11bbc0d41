//! Library references and installed library metadata (`library.json`)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::H5pError;
use crate::manifest::Dependency;

/// Identifies one installed version of a library
///
/// Parses from an uber name (`H5P.MultiChoice 1.16`) or a directory name
/// (`H5P.MultiChoice-1.16`). The language only travels along with lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LibraryRef {
    pub machine_name: String,
    pub major: u32,
    pub minor: u32,
    pub language: Option<String>,
}

impl LibraryRef {
    pub fn new(machine_name: impl Into<String>, major: u32, minor: u32) -> Self {
        Self {
            machine_name: machine_name.into(),
            major,
            minor,
            language: None,
        }
    }

    /// Like [`LibraryRef::new`], but rejects machine names that are not a
    /// single path-safe segment
    pub fn try_new(machine_name: &str, major: u32, minor: u32) -> Result<Self, H5pError> {
        Self::check_machine_name(machine_name, machine_name)?;
        Ok(Self::new(machine_name, major, minor))
    }

    /// Fails unless the machine name can be used inside a directory name
    pub fn validate(&self) -> Result<(), H5pError> {
        Self::check_machine_name(&self.machine_name, &self.uber_name())
    }

    fn check_machine_name(machine_name: &str, input: &str) -> Result<(), H5pError> {
        if machine_name.is_empty()
            || machine_name == "."
            || machine_name == ".."
            || machine_name.contains(['/', '\\', ' ', '\0'])
        {
            return Err(H5pError::InvalidLibraryRef(input.to_string()));
        }
        Ok(())
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language.filter(|l| !l.is_empty());
        self
    }

    /// `H5P.MultiChoice 1.16`
    pub fn uber_name(&self) -> String {
        format!("{} {}.{}", self.machine_name, self.major, self.minor)
    }

    /// `H5P.MultiChoice-1.16`, the directory the library is installed in
    pub fn dir_name(&self) -> String {
        format!("{}-{}.{}", self.machine_name, self.major, self.minor)
    }

    /// Parse a directory name of the form `<machineName>-<major>.<minor>`
    pub fn from_dir_name(name: &str) -> Result<Self, H5pError> {
        let (machine_name, version) = name
            .rsplit_once('-')
            .ok_or_else(|| H5pError::InvalidLibraryRef(name.to_string()))?;
        Self::from_parts(machine_name, version, name)
    }

    fn from_parts(machine_name: &str, version: &str, input: &str) -> Result<Self, H5pError> {
        let invalid = || H5pError::InvalidLibraryRef(input.to_string());

        Self::check_machine_name(machine_name, input)?;
        let (major, minor) = version.split_once('.').ok_or_else(invalid)?;
        let major = major.parse().map_err(|_| invalid())?;
        let minor = minor.parse().map_err(|_| invalid())?;

        Ok(Self::new(machine_name, major, minor))
    }
}

impl FromStr for LibraryRef {
    type Err = H5pError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (machine_name, version) = s
            .split_once(' ')
            .ok_or_else(|| H5pError::InvalidLibraryRef(s.to_string()))?;
        Self::from_parts(machine_name, version.trim(), s)
    }
}

impl fmt::Display for LibraryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}.{}", self.machine_name, self.major, self.minor)
    }
}

impl From<&Dependency> for LibraryRef {
    fn from(dep: &Dependency) -> Self {
        Self::new(&dep.machine_name, dep.major_version, dep.minor_version)
    }
}

/// A file a library asks the page to load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryFile {
    pub path: String,
}

/// Installed library metadata (`library.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryMetadata {
    #[serde(default)]
    pub title: String,

    pub machine_name: String,
    pub major_version: u32,
    pub minor_version: u32,

    #[serde(default)]
    pub patch_version: u32,

    #[serde(default)]
    pub runnable: u8,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preloaded_js: Vec<LibraryFile>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preloaded_css: Vec<LibraryFile>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preloaded_dependencies: Vec<Dependency>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub editor_dependencies: Vec<Dependency>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LibraryMetadata {
    pub fn library_ref(&self) -> LibraryRef {
        LibraryRef::new(&self.machine_name, self.major_version, self.minor_version)
    }

    pub fn is_runnable(&self) -> bool {
        self.runnable != 0
    }
}
