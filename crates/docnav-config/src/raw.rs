//! Raw navigation schema as authored by the site maintainer.
//!
//! Every field that the author may leave out is an `Option` here. Presence and
//! shape checks happen later, when the raw config is normalized into a
//! navigation state. Settings the navigation core does not interpret
//! ([`HeadTag`], [`NavLink`], [`MarkdownOptions`]) are defined once here and
//! passed through unchanged.

use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Site navigation configuration before validation.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawNavigationConfig {
    /// Root URL path the site is served under (e.g. `/blog/`).
    pub base: Option<String>,
    /// Site title.
    pub title: Option<String>,
    /// Site description.
    pub description: Option<String>,
    /// Extra tags injected into the page `<head>`.
    #[serde(default)]
    pub head: Vec<HeadTag>,
    /// Top navigation bar links.
    #[serde(default)]
    pub nav: Vec<NavLink>,
    /// Sidebar sections in display order.
    pub sidebar: Option<Vec<RawSidebarSection>>,
    /// Label shown next to the "last updated" timestamp.
    #[serde(default, alias = "lastUpdated")]
    pub last_updated: Option<String>,
    /// Markdown rendering toggles.
    #[serde(default)]
    pub markdown: MarkdownOptions,
    /// Theme-scoped settings, the VuePress `themeConfig` layout.
    #[serde(default, alias = "themeConfig")]
    pub theme_config: RawThemeConfig,
}

impl RawNavigationConfig {
    /// Fill top-level settings left unset from [`RawThemeConfig`].
    ///
    /// Top-level values win when both are given.
    #[must_use]
    pub fn with_theme_fallback(mut self) -> Self {
        let theme = std::mem::take(&mut self.theme_config);
        if self.nav.is_empty() {
            self.nav = theme.nav;
        }
        self.sidebar = self.sidebar.or(theme.sidebar);
        self.last_updated = self.last_updated.or(theme.last_updated);
        if self.markdown == MarkdownOptions::default() {
            self.markdown = theme.markdown.unwrap_or_default();
        }
        self
    }
}

/// Settings authored under `themeConfig`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawThemeConfig {
    /// Top navigation bar links.
    #[serde(default)]
    pub nav: Vec<NavLink>,
    /// Sidebar sections in display order.
    pub sidebar: Option<Vec<RawSidebarSection>>,
    /// Label shown next to the "last updated" timestamp.
    #[serde(default, alias = "lastUpdated")]
    pub last_updated: Option<String>,
    /// Markdown rendering toggles.
    pub markdown: Option<MarkdownOptions>,
}

/// Sidebar section before validation.
///
/// A `title` or `entries` value of the wrong type reads as `None`, so the
/// normalizer reports it against the section index instead of the whole
/// file failing to parse.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawSidebarSection {
    /// Section heading.
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    /// Whether the section may be collapsed in the rendered sidebar.
    #[serde(default, alias = "collapsable")]
    pub collapsible: Option<bool>,
    /// Content references in display order.
    #[serde(default, alias = "children", deserialize_with = "lenient")]
    pub entries: Option<Vec<RawEntry>>,
}

/// Deserialize `T`, reading a value of any other shape as `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient<T> {
        Valid(T),
        Invalid(IgnoredAny),
    }

    Ok(match Lenient::<T>::deserialize(deserializer)? {
        Lenient::Valid(value) => Some(value),
        Lenient::Invalid(_) => None,
    })
}

/// One sidebar entry as authored.
///
/// Accepted forms:
/// - `"/guide/intro.md"`
/// - `["/guide/intro.md", "Introduction"]`
/// - `{ path = "/guide/intro.md", title = "Introduction" }`
///
/// Anything else is kept as [`RawEntry::Malformed`] so the normalizer can
/// report which section it belongs to instead of failing the whole parse.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawEntry {
    /// Bare content path.
    Path(String),
    /// `[path, title]` pair.
    Titled(String, String),
    /// Table with explicit keys.
    Table {
        /// Content path.
        path: String,
        /// Sidebar label override.
        #[serde(default)]
        title: Option<String>,
    },
    /// Value of any other shape.
    Malformed(IgnoredAny),
}

impl RawEntry {
    /// Content path and optional title, or `None` for a malformed entry.
    #[must_use]
    pub fn parts(&self) -> Option<(&str, Option<&str>)> {
        match self {
            Self::Path(path) => Some((path, None)),
            Self::Titled(path, title) => Some((path, Some(title))),
            Self::Table { path, title } => Some((path, title.as_deref())),
            Self::Malformed(_) => None,
        }
    }
}

impl From<&str> for RawEntry {
    fn from(path: &str) -> Self {
        Self::Path(path.to_owned())
    }
}

/// A `<head>` tag directive: tag name plus attributes.
///
/// Authored either as a `[tag, { attr = value }]` pair or as a table with
/// `tag` and `attrs` keys.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HeadTagRepr")]
pub struct HeadTag {
    /// Tag name (e.g. `link`, `meta`).
    pub tag: String,
    /// Tag attributes, sorted by name.
    pub attrs: BTreeMap<String, String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HeadTagRepr {
    Pair(String, BTreeMap<String, String>),
    Table {
        tag: String,
        #[serde(default)]
        attrs: BTreeMap<String, String>,
    },
}

impl From<HeadTagRepr> for HeadTag {
    fn from(repr: HeadTagRepr) -> Self {
        match repr {
            HeadTagRepr::Pair(tag, attrs) | HeadTagRepr::Table { tag, attrs } => {
                Self { tag, attrs }
            }
        }
    }
}

/// Top navigation bar link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    /// Link label.
    pub text: String,
    /// Link target.
    pub link: String,
}

/// Markdown rendering toggles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownOptions {
    /// Show line numbers in fenced code blocks.
    #[serde(alias = "lineNumbers")]
    pub line_numbers: bool,
}
