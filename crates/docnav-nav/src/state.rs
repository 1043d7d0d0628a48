//! Normalized navigation state.
//!
//! Everything here is built once by [`normalize`](crate::normalize) and never
//! mutated afterwards. Invariants (non-empty sections, unique section titles,
//! well-formed unique paths per section) hold for every value a caller can
//! observe, so renderers don't re-check them.

use std::fmt;

use docnav_config::{ConfigError, HeadTag, MarkdownOptions, NavLink};
use serde::Serialize;

use crate::path;

/// Normalized absolute path of one content document (e.g. `/guide/intro.md`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ContentRef(String);

impl ContentRef {
    /// Normalize and wrap an authored path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPath`] if the path cannot be normalized.
    pub fn parse(path: &str) -> Result<Self, ConfigError> {
        path::normalize_path(path).map(Self)
    }

    /// Path string, always starting with `/`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Rendered route relative to the site base (e.g. `/guide/intro.html`).
    #[must_use]
    pub fn route(&self) -> String {
        path::route_for(&self.0)
    }
}

impl AsRef<str> for ContentRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One sidebar link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarEntry {
    /// Target document.
    pub path: ContentRef,
    /// Label override; renderers fall back to the document title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Titled group of sidebar links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarSection {
    /// Section heading.
    pub title: String,
    /// Whether the section may be collapsed.
    pub collapsible: bool,
    /// Links in display order, never empty.
    pub entries: Vec<SidebarEntry>,
}

impl SidebarSection {
    /// Whether this section links to `path`.
    #[must_use]
    pub fn contains(&self, path: &ContentRef) -> bool {
        self.entries.iter().any(|entry| entry.path == *path)
    }

    /// Entry paths in display order.
    pub fn paths(&self) -> impl Iterator<Item = &ContentRef> {
        self.entries.iter().map(|entry| &entry.path)
    }
}

/// Sidebar sections in display order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SidebarTree {
    sections: Vec<SidebarSection>,
}

impl SidebarTree {
    pub(crate) fn new(sections: Vec<SidebarSection>) -> Self {
        Self { sections }
    }

    /// All sections.
    #[must_use]
    pub fn sections(&self) -> &[SidebarSection] {
        &self.sections
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// True if there are no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterate sections in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, SidebarSection> {
        self.sections.iter()
    }

    /// Look up a section by its title.
    #[must_use]
    pub fn section(&self, title: &str) -> Option<&SidebarSection> {
        self.sections.iter().find(|section| section.title == title)
    }

    /// Index of the first section linking to `path`.
    ///
    /// Renderers use this to expand the section holding the current page.
    #[must_use]
    pub fn section_index_for(&self, path: &ContentRef) -> Option<usize> {
        self.sections.iter().position(|section| section.contains(path))
    }

    /// Total number of links across all sections.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|section| section.entries.len()).sum()
    }
}

impl<'a> IntoIterator for &'a SidebarTree {
    type Item = &'a SidebarSection;
    type IntoIter = std::slice::Iter<'a, SidebarSection>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

/// Top-level settings passed through to the renderer unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SiteSettings {
    /// Root URL path the site is served under.
    pub base: String,
    /// Site title.
    pub title: String,
    /// Site description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Extra `<head>` tags.
    pub head: Vec<HeadTag>,
    /// Top navigation links.
    pub nav: Vec<NavLink>,
    /// "Last updated" label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    /// Markdown rendering toggles.
    pub markdown: MarkdownOptions,
}

/// Fully normalized navigation configuration.
///
/// Immutable once built. Share it behind an `Arc`; to change it, normalize a
/// new one and swap (see [`NavStore`](crate::NavStore)).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavState {
    settings: SiteSettings,
    sidebar: SidebarTree,
}

impl NavState {
    pub(crate) fn new(settings: SiteSettings, sidebar: SidebarTree) -> Self {
        Self { settings, sidebar }
    }

    /// Opaque site settings.
    #[must_use]
    pub fn settings(&self) -> &SiteSettings {
        &self.settings
    }

    /// Normalized sidebar.
    #[must_use]
    pub fn sidebar(&self) -> &SidebarTree {
        &self.sidebar
    }

    /// Site base path.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.settings.base
    }

    /// Site title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.settings.title
    }

    /// Absolute link for a document, including the site base.
    ///
    /// `/JSRedBook/Base.md` under base `/blog/` links to
    /// `/blog/JSRedBook/Base.html`.
    #[must_use]
    pub fn link_for(&self, path: &ContentRef) -> String {
        let base = self.settings.base.trim_end_matches('/');
        format!("{base}{}", path.route())
    }
}
