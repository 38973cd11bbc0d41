//! Editor capability and the file-backed editor
//!
//! The [`Editor`] trait is everything the server asks of an authoring
//! system. [`FileEditor`] implements it directly on top of the on-disk
//! content and library layout; it has no hub access, so installing
//! libraries and importing packages are reported as unsupported.

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::config::EditorConfig;
use crate::content::{ContentId, ContentMetadata, ContentParams, StoredContent};
use crate::error::{H5pError, Result};
use crate::html;
use crate::library::LibraryRef;
use crate::manifest::{Dependency, PackageManifest};
use crate::storage::{FileContentStorage, FileLibraryStorage};

/// A file received through a multipart upload
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Authoring, persistence and library management for content packages
#[async_trait]
pub trait Editor: Send + Sync + 'static {
    /// Page hosting the editor for `id`
    async fn render(&self, id: &ContentId) -> Result<String>;

    /// Stored manifest, main library and parameters of `id`
    async fn load_content(&self, id: &ContentId) -> Result<StoredContent>;

    /// Content types available for new content
    async fn content_type_cache(&self) -> Result<Value>;

    /// Everything the editor needs to build a form for `library`
    async fn library_data(&self, library: &LibraryRef) -> Result<Value>;

    /// Summaries of the given libraries (uber names) that are installed
    async fn library_overview(&self, libraries: &[String]) -> Result<Value>;

    /// Persist authored parameters and metadata for `id`
    async fn save_content(
        &self,
        id: &ContentId,
        params: Value,
        metadata: ContentMetadata,
        library: &str,
    ) -> Result<()>;

    /// Store a file uploaded from an editor field, returning `{mime, path}`
    async fn save_content_file(
        &self,
        id: &ContentId,
        field: Value,
        file: UploadedFile,
    ) -> Result<Value>;

    /// Install a library from the content type hub
    async fn install_library(&self, id: &str) -> Result<()>;

    /// Import a packaged `.h5p` file as content `id`
    async fn upload_package(&self, id: &ContentId, package: Vec<u8>) -> Result<()>;
}

const EDITOR_SCRIPTS: &[&str] = &[
    "scripts/h5p-editor.js",
    "scripts/h5peditor-editor.js",
    "scripts/h5peditor-init.js",
];
const EDITOR_STYLES: &[&str] = &["styles/css/application.css"];

/// Editor working directly on the content and library directories
#[derive(Debug, Clone)]
pub struct FileEditor {
    config: EditorConfig,
    content: FileContentStorage,
    libraries: FileLibraryStorage,
}

impl FileEditor {
    pub fn new(
        config: EditorConfig,
        content: FileContentStorage,
        libraries: FileLibraryStorage,
    ) -> Self {
        Self {
            config,
            content,
            libraries,
        }
    }

    fn library_file_url(&self, library: &LibraryRef, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.libraries_url.trim_end_matches('/'),
            library.dir_name(),
            path
        )
    }
}

#[async_trait]
impl Editor for FileEditor {
    async fn render(&self, id: &ContentId) -> Result<String> {
        id.validate()?;
        let config = &self.config;
        let asset_url = |path: &&str| format!("{}{}", config.library_url, path);
        let scripts: Vec<String> = EDITOR_SCRIPTS.iter().map(asset_url).collect();
        let styles: Vec<String> = EDITOR_STYLES.iter().map(asset_url).collect();

        let integration = json!({
            "baseUrl": config.base_url,
            "url": config.base_url,
            "ajaxPath": config.ajax_path,
            "core": { "scripts": [], "styles": [] },
            "editor": {
                "filesPath": format!("{}/{}", config.files_path.trim_end_matches('/'), id),
                "libraryUrl": config.library_url,
                "ajaxPath": config.ajax_path,
                "contentId": id,
                "apiVersion": config.core_api_version,
                "assets": { "js": scripts, "css": styles },
            },
        });

        let mut head = format!(
            "<script>window.H5PIntegration = {};</script>\n",
            html::script_json(&integration)?
        );
        for style in &styles {
            head.push_str(&format!(
                "<link rel=\"stylesheet\" href=\"{}\">\n",
                html::escape(style)
            ));
        }
        for script in &scripts {
            head.push_str(&format!("<script src=\"{}\"></script>\n", html::escape(script)));
        }

        let body = format!(
            "<form method=\"post\" enctype=\"multipart/form-data\" id=\"h5p-content-form\">\n\
             <div class=\"h5p-create\" data-content-id=\"{}\"><div class=\"h5p-editor\"></div></div>\n\
             <input type=\"submit\" name=\"submit\" value=\"Save\" class=\"button button-primary button-large\">\n\
             </form>\n",
            html::escape(id.as_str())
        );

        Ok(html::page("H5P Editor", &head, &body))
    }

    async fn load_content(&self, id: &ContentId) -> Result<StoredContent> {
        let manifest = self.content.load_manifest(id).await?;
        let params = self.content.load_params(id).await?;
        let library = manifest.main_library_ref().ok_or_else(|| {
            H5pError::invalid_document(
                format!("{id}/h5p.json"),
                format!("main library {} is not a dependency", manifest.main_library),
            )
        })?;

        Ok(StoredContent {
            library: library.uber_name(),
            params: ContentParams {
                params,
                metadata: ContentMetadata::from_manifest(&manifest),
            },
            h5p: manifest,
        })
    }

    async fn content_type_cache(&self) -> Result<Value> {
        let libraries: Vec<Value> = self
            .libraries
            .installed()
            .await?
            .into_iter()
            .filter(|lib| lib.is_runnable())
            .map(|lib| {
                json!({
                    "id": lib.library_ref().dir_name(),
                    "machineName": lib.machine_name,
                    "majorVersion": lib.major_version,
                    "minorVersion": lib.minor_version,
                    "patchVersion": lib.patch_version,
                    "localMajorVersion": lib.major_version,
                    "localMinorVersion": lib.minor_version,
                    "localPatchVersion": lib.patch_version,
                    "title": lib.title,
                    "installed": true,
                    "isUpToDate": true,
                    "restricted": false,
                    "canInstall": false,
                })
            })
            .collect();

        Ok(json!({
            "outdated": false,
            "libraries": libraries,
            "recentlyUsed": [],
            "apiVersion": self.config.core_api_version,
        }))
    }

    async fn library_data(&self, library: &LibraryRef) -> Result<Value> {
        let metadata = self.libraries.metadata(library).await?;
        let semantics = self.libraries.semantics(library).await?;
        let language = match &library.language {
            Some(lang) => self.libraries.language(library, lang).await?,
            None => None,
        };

        let javascript: Vec<String> = metadata
            .preloaded_js
            .iter()
            .map(|file| self.library_file_url(library, &file.path))
            .collect();
        let css: Vec<String> = metadata
            .preloaded_css
            .iter()
            .map(|file| self.library_file_url(library, &file.path))
            .collect();

        Ok(json!({
            "name": metadata.machine_name,
            "version": { "major": metadata.major_version, "minor": metadata.minor_version },
            "title": metadata.title,
            "semantics": semantics.unwrap_or(Value::Null),
            "language": language,
            "defaultLanguage": Value::Null,
            "javascript": javascript,
            "css": css,
        }))
    }

    async fn library_overview(&self, libraries: &[String]) -> Result<Value> {
        let mut overview = Vec::new();

        for name in libraries {
            let library: LibraryRef = match name.parse() {
                Ok(library) => library,
                Err(e) => {
                    warn!("Ignoring library in overview request: {}", e);
                    continue;
                }
            };
            let metadata = match self.libraries.metadata(&library).await {
                Ok(metadata) => metadata,
                Err(e) if e.is_not_found() => continue,
                Err(e) => return Err(e),
            };

            let extra = |key: &str| metadata.extra.get(key).cloned().unwrap_or(Value::Null);

            overview.push(json!({
                "uberName": library.uber_name(),
                "name": metadata.machine_name,
                "majorVersion": metadata.major_version,
                "minorVersion": metadata.minor_version,
                "title": metadata.title,
                "runnable": metadata.is_runnable(),
                "restricted": false,
                "tutorialUrl": extra("tutorialUrl"),
                "metadataSettings": extra("metadataSettings"),
            }));
        }

        Ok(Value::Array(overview))
    }

    async fn save_content(
        &self,
        id: &ContentId,
        params: Value,
        metadata: ContentMetadata,
        library: &str,
    ) -> Result<()> {
        let library: LibraryRef = library.parse()?;
        debug!("Saving content {} with main library {}", id, library);

        let mut manifest = match self.content.load_manifest(id).await {
            Ok(manifest) => manifest,
            Err(e) if e.is_not_found() => PackageManifest::new(&metadata.title, &library),
            Err(e) => return Err(e),
        };

        manifest.title = metadata.title;
        manifest.license = metadata.license.or(manifest.license);
        manifest.authors = metadata.authors;
        manifest.language = metadata.default_language.or(manifest.language);
        manifest.main_library = library.machine_name.clone();
        manifest
            .preloaded_dependencies
            .retain(|dep| dep.machine_name != library.machine_name);
        manifest.preloaded_dependencies.insert(0, Dependency::from(&library));

        self.content.save_params(id, &params).await?;
        self.content.save_manifest(id, &manifest).await?;
        Ok(())
    }

    async fn save_content_file(
        &self,
        id: &ContentId,
        field: Value,
        file: UploadedFile,
    ) -> Result<Value> {
        let kind = match field.get("type").and_then(Value::as_str) {
            Some(kind @ ("image" | "video" | "audio" | "file")) => kind,
            Some(other) => {
                return Err(H5pError::InvalidUpload(format!("unknown field type {other:?}")));
            }
            None => "file",
        };

        let file_name = sanitize_file_name(&file.name);
        let mut prefix = uuid::Uuid::new_v4().simple().to_string();
        prefix.truncate(8);
        let relative = format!("{kind}s/{prefix}-{file_name}");

        self.content.save_file(id, &relative, &file.bytes).await?;
        debug!("Stored {} bytes as {}/{}", file.bytes.len(), id, relative);

        Ok(json!({
            "mime": file.content_type.unwrap_or_else(|| "application/octet-stream".to_string()),
            "path": relative,
        }))
    }

    async fn install_library(&self, id: &str) -> Result<()> {
        Err(H5pError::Unsupported(format!(
            "installing {id} requires access to the content type hub"
        )))
    }

    async fn upload_package(&self, id: &ContentId, _package: Vec<u8>) -> Result<()> {
        Err(H5pError::Unsupported(format!(
            "importing a package into {id} is not available for file storage"
        )))
    }
}

/// Keep only characters that are safe in a single path segment
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}
