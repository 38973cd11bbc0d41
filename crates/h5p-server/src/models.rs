//! Query and body types for the API routes

use h5p_kit::{ContentId, ContentParams, LibraryRef};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, Result};

/// `?contentId=` as used by the edit, params and play routes
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentQuery {
    pub content_id: Option<String>,
}

impl ContentQuery {
    /// The requested id, treating an empty parameter as absent
    pub fn content_id(&self) -> Option<ContentId> {
        self.content_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(ContentId::from)
    }
}

/// Query parameters of the ajax endpoint
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AjaxQuery {
    pub action: Option<String>,
    pub content_id: Option<String>,
    pub machine_name: Option<String>,
    pub major_version: Option<String>,
    pub minor_version: Option<String>,
    pub language: Option<String>,
    pub id: Option<String>,
}

impl AjaxQuery {
    pub fn content_id(&self) -> Option<ContentId> {
        self.content_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(ContentId::from)
    }

    /// Library named by `machineName`, `majorVersion`, `minorVersion` and `language`
    pub fn library_ref(&self) -> Result<LibraryRef> {
        let machine_name = self
            .machine_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ApiError::bad_request("machineName is required"))?;
        let major = parse_version(self.major_version.as_deref(), "majorVersion")?;
        let minor = parse_version(self.minor_version.as_deref(), "minorVersion")?;

        let library = LibraryRef::try_new(machine_name, major, minor)?;
        Ok(library.with_language(self.language.clone()))
    }
}

fn parse_version(value: Option<&str>, name: &str) -> Result<u32> {
    value
        .ok_or_else(|| ApiError::BadRequest(format!("{name} is required")))?
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("{name} must be a number")))
}

/// Body of `POST /edit`
#[derive(Debug, Deserialize)]
pub struct SaveContentRequest {
    pub params: ContentParams,
    /// Main library as an uber name
    pub library: String,
}

/// JSON variant of the library overview request
#[derive(Debug, Deserialize)]
pub struct LibrariesRequest {
    pub libraries: Vec<String>,
}

/// Envelope used by the install and upload actions
#[derive(Debug, Serialize)]
pub struct AjaxSuccess<T> {
    pub success: bool,
    pub data: T,
}

impl<T> AjaxSuccess<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Data returned after a package upload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedPackage {
    pub h5p: h5p_kit::PackageManifest,
    pub content: Value,
    pub content_types: Value,
}

/// Library names from a form body (`libraries[]=A 1.0&libraries[]=B 2.1`)
pub fn parse_library_form(body: &[u8]) -> Result<Vec<String>> {
    let body = std::str::from_utf8(body)
        .map_err(|_| ApiError::bad_request("form body is not valid UTF-8"))?;

    let mut libraries = Vec::new();
    for pair in body.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = form_decode(key)?;
        if key == "libraries" || key.starts_with("libraries[") {
            libraries.push(form_decode(value)?);
        }
    }

    Ok(libraries)
}

fn form_decode(text: &str) -> Result<String> {
    urlencoding::decode(&text.replace('+', " "))
        .map(|decoded| decoded.into_owned())
        .map_err(|_| ApiError::bad_request("invalid percent-encoding in form body"))
}
