//! h5p-kit holds the content package model and the two capabilities the
//! demo server delegates to: an [`Editor`] that authors and stores content,
//! and a [`Player`] that turns a stored package into a viewable page.
//!
//! File-backed implementations of both ([`FileEditor`], [`HtmlPlayer`]) are
//! included so the server can run without any external system.

pub mod config;
pub mod content;
pub mod editor;
pub mod error;
pub mod html;
pub mod library;
pub mod manifest;
pub mod player;
pub mod storage;

// Re-export core types
pub use config::EditorConfig;
pub use content::{ContentId, ContentMetadata, ContentParams, StoredContent};
pub use editor::{Editor, FileEditor, UploadedFile};
pub use error::{H5pError, Result};
pub use library::{LibraryMetadata, LibraryRef};
pub use manifest::{Dependency, PackageManifest};
pub use player::{HtmlPlayer, PlayableContent, Player};
pub use storage::{FileContentStorage, FileLibraryStorage};

/// Get the library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
