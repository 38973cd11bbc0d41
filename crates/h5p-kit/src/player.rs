//! Player capability and the HTML player
//!
//! A player receives a package that has already been read from disk and
//! produces the page that displays it.

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::config::EditorConfig;
use crate::content::{ContentId, ContentMetadata};
use crate::error::{H5pError, Result};
use crate::html;
use crate::library::LibraryRef;
use crate::manifest::PackageManifest;
use crate::storage::FileLibraryStorage;

/// A stored package ready to be rendered
#[derive(Debug, Clone)]
pub struct PlayableContent {
    pub id: ContentId,
    pub manifest: PackageManifest,
    pub params: Value,
    /// URL under which the package's own files (images, videos, ...) are served
    pub files_url: String,
}

/// Renders stored packages into viewable pages
#[async_trait]
pub trait Player: Send + Sync + 'static {
    async fn render(&self, content: &PlayableContent) -> Result<String>;
}

const CORE_SCRIPTS: &[&str] = &["core/js/jquery.js", "core/js/h5p.js"];
const CORE_STYLES: &[&str] = &["core/styles/h5p.css"];

/// Player that emits a self-contained HTML shell with the integration data
///
/// Scripts and styles are collected from the main library and its
/// preloaded dependencies when they are installed; missing dependencies
/// are left for the client runtime to report.
#[derive(Debug, Clone)]
pub struct HtmlPlayer {
    config: EditorConfig,
    libraries: FileLibraryStorage,
}

impl HtmlPlayer {
    pub fn new(config: EditorConfig, libraries: FileLibraryStorage) -> Self {
        Self { config, libraries }
    }

    async fn library_assets(
        &self,
        manifest: &PackageManifest,
    ) -> Result<(Vec<String>, Vec<String>)> {
        let base = self.config.libraries_url.trim_end_matches('/');
        let mut scripts = Vec::new();
        let mut styles = Vec::new();

        for dep in &manifest.preloaded_dependencies {
            let library = LibraryRef::from(dep);
            let metadata = match self.libraries.metadata(&library).await {
                Ok(metadata) => metadata,
                Err(e) if e.is_not_found() => continue,
                Err(e) => return Err(e),
            };
            let dir = library.dir_name();
            scripts.extend(
                metadata
                    .preloaded_js
                    .iter()
                    .map(|file| format!("{base}/{dir}/{}", file.path)),
            );
            styles.extend(
                metadata
                    .preloaded_css
                    .iter()
                    .map(|file| format!("{base}/{dir}/{}", file.path)),
            );
        }

        Ok((scripts, styles))
    }
}

#[async_trait]
impl Player for HtmlPlayer {
    async fn render(&self, content: &PlayableContent) -> Result<String> {
        let manifest = &content.manifest;
        let main = manifest.main_library_ref().ok_or_else(|| {
            H5pError::Render(format!(
                "main library {} of {} has no version",
                manifest.main_library, content.id
            ))
        })?;

        let base_url = self.config.base_url.trim_end_matches('/');
        let core_scripts: Vec<String> = CORE_SCRIPTS
            .iter()
            .map(|s| format!("{base_url}/{s}"))
            .collect();
        let core_styles: Vec<String> = CORE_STYLES
            .iter()
            .map(|s| format!("{base_url}/{s}"))
            .collect();
        let (scripts, styles) = self.library_assets(manifest).await?;

        let json_content = serde_json::to_string(&content.params)?;
        let mut contents = serde_json::Map::new();
        contents.insert(
            format!("cid-{}", content.id),
            json!({
                "library": main.uber_name(),
                "jsonContent": json_content,
                "contentUrl": content.files_url,
                "metadata": ContentMetadata::from_manifest(manifest),
                "scripts": scripts,
                "styles": styles,
                "fullScreen": false,
                "displayOptions": { "frame": true, "export": false, "embed": false, "copyright": true, "icon": true },
            }),
        );
        let integration = json!({
            "baseUrl": self.config.base_url,
            "url": self.config.base_url,
            "core": { "scripts": core_scripts, "styles": core_styles },
            "contents": contents,
        });

        let mut head = format!(
            "<script>window.H5PIntegration = {};</script>\n",
            html::script_json(&integration)?
        );
        for style in core_styles.iter().chain(&styles) {
            head.push_str(&format!(
                "<link rel=\"stylesheet\" href=\"{}\">\n",
                html::escape(style)
            ));
        }
        for script in core_scripts.iter().chain(&scripts) {
            head.push_str(&format!(
                "<script src=\"{}\"></script>\n",
                html::escape(script)
            ));
        }

        let body = format!(
            "<div class=\"h5p-content\" data-content-id=\"{}\"></div>\n",
            html::escape(content.id.as_str())
        );

        Ok(html::page(&manifest.title, &head, &body))
    }
}
