//! In-memory content source for testing.

use std::collections::HashMap;

use crate::content::{ContentError, ContentSource};
use crate::state::ContentRef;

/// Content source backed by a map of normalized paths to markdown.
///
/// # Example
///
/// ```ignore
/// use docnav_nav::{ContentRef, ContentSource, MockContent};
///
/// let source = MockContent::new().with_document("/guide.md", "# Guide");
/// assert!(source.exists(&ContentRef::parse("guide.md")?));
/// ```
#[derive(Debug, Default)]
pub struct MockContent {
    documents: HashMap<String, String>,
}

impl MockContent {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document. The path is stored as given, so pass a normalized one.
    #[must_use]
    pub fn with_document(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.documents.insert(path.into(), content.into());
        self
    }
}

impl ContentSource for MockContent {
    fn exists(&self, path: &ContentRef) -> bool {
        self.documents.contains_key(path.as_str())
    }

    fn read(&self, path: &ContentRef) -> Result<String, ContentError> {
        self.documents
            .get(path.as_str())
            .cloned()
            .ok_or_else(|| ContentError::NotFound(path.to_string()))
    }
}
