//! Content collaborator for sidebar entries.
//!
//! Normalization only checks path shape. A [`ContentSource`] answers whether
//! the document behind a [`ContentRef`] exists and returns its source;
//! [`verify_content`] runs that check over a whole sidebar.
//!
//! # Path Convention
//!
//! Content paths map to markdown files under the source directory:
//! - `/guide/intro.md` - `guide/intro.md`
//! - `/guide/intro` - `guide/intro.md`
//! - `/guide/` and `/` - `guide/README.md` and `README.md`

use std::path::PathBuf;

use docnav_config::ConfigError;

use crate::state::{ContentRef, NavState};

/// Landing document of a directory path.
const DIRECTORY_INDEX: &str = "README.md";

/// Error returned when reading content fails.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// No document for this path.
    #[error("Content not found: {0}")]
    NotFound(String),
    /// I/O error reading the document.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// Content path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Resolves content paths to documents.
pub trait ContentSource: Send + Sync {
    /// Whether a document exists for `path`.
    fn exists(&self, path: &ContentRef) -> bool;

    /// Read the markdown source for `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::NotFound`] if there is no document, or
    /// [`ContentError::Io`] if it cannot be read.
    fn read(&self, path: &ContentRef) -> Result<String, ContentError>;
}

/// Filesystem content rooted at the docs source directory.
#[derive(Debug, Clone)]
pub struct FsContent {
    root: PathBuf,
}

impl FsContent {
    /// Create a source reading from `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File a content path maps to.
    #[must_use]
    pub fn resolve(&self, path: &ContentRef) -> PathBuf {
        let relative = path.as_str().trim_start_matches('/');
        if relative.is_empty() || relative.ends_with('/') {
            return self.root.join(relative).join(DIRECTORY_INDEX);
        }

        let file = self.root.join(relative);
        if file.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("md")) {
            file
        } else {
            self.root.join(format!("{relative}.md"))
        }
    }
}

impl ContentSource for FsContent {
    fn exists(&self, path: &ContentRef) -> bool {
        self.resolve(path).is_file()
    }

    fn read(&self, path: &ContentRef) -> Result<String, ContentError> {
        std::fs::read_to_string(self.resolve(path)).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ContentError::NotFound(path.to_string()),
            _ => ContentError::Io {
                path: path.to_string(),
                source: e,
            },
        })
    }
}

/// Check that every sidebar entry resolves to a document.
///
/// # Errors
///
/// Returns [`ConfigError::ContentNotFound`] for the first missing document,
/// scanning sections and entries in display order.
pub fn verify_content(state: &NavState, source: &dyn ContentSource) -> Result<(), ConfigError> {
    for (section_index, section) in state.sidebar().iter().enumerate() {
        if let Some(missing) = section.paths().find(|path| !source.exists(path)) {
            tracing::warn!(path = %missing, section = %section.title, "Sidebar entry has no content");
            return Err(ConfigError::ContentNotFound {
                path: missing.to_string(),
                section_index,
            });
        }
    }
    Ok(())
}
