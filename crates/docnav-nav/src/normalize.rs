//! Raw config to [`NavState`] normalization.

use std::collections::HashSet;

use docnav_config::{ConfigError, RawEntry, RawNavigationConfig, RawSidebarSection};

use crate::state::{ContentRef, NavState, SidebarEntry, SidebarSection, SidebarTree, SiteSettings};

/// Collapsible flag used when a section does not set one.
const DEFAULT_COLLAPSIBLE: bool = true;

/// Validate a raw navigation config and build the normalized state.
///
/// Settings authored under `themeConfig` fill in top-level ones left unset.
/// Checks run top to bottom: required fields (`base`, `title`, `sidebar`),
/// then each section in order (title, entry shapes, then each entry's path
/// and uniqueness within the section). The first failure is returned and
/// logged; nothing is built on failure.
///
/// # Errors
///
/// - [`ConfigError::MissingField`] if `base`, `title` or `sidebar` is absent
///   (empty strings count as absent).
/// - [`ConfigError::InvalidSection`] for a section without a title, with a
///   title already used by an earlier section, without entries, or with an
///   entry that is not a path.
/// - [`ConfigError::InvalidPath`] for a blank path or one with a `..` segment.
/// - [`ConfigError::DuplicatePath`] for a path listed twice in one section.
pub fn normalize(raw: RawNavigationConfig) -> Result<NavState, ConfigError> {
    let result = build_state(raw);

    match &result {
        Ok(state) => tracing::debug!(
            sections = state.sidebar().len(),
            entries = state.sidebar().entry_count(),
            "Normalized navigation config"
        ),
        Err(e) => tracing::warn!(error = %e, "Rejected navigation config"),
    }

    result
}

fn build_state(raw: RawNavigationConfig) -> Result<NavState, ConfigError> {
    let raw = raw.with_theme_fallback();
    let base = required(raw.base, "base")?;
    let title = required(raw.title, "title")?;
    let raw_sections = raw
        .sidebar
        .ok_or(ConfigError::MissingField { field: "sidebar" })?;

    let mut seen_titles = HashSet::with_capacity(raw_sections.len());
    let sections = raw_sections
        .into_iter()
        .enumerate()
        .map(|(index, section)| normalize_section(index, section, &mut seen_titles))
        .collect::<Result<Vec<_>, _>>()?;

    let settings = SiteSettings {
        base,
        title,
        description: raw.description,
        head: raw.head,
        nav: raw.nav,
        last_updated: raw.last_updated,
        markdown: raw.markdown,
    };

    Ok(NavState::new(settings, SidebarTree::new(sections)))
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingField { field })
}

fn normalize_section(
    index: usize,
    raw: RawSidebarSection,
    seen_titles: &mut HashSet<String>,
) -> Result<SidebarSection, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidSection { index, reason };

    let title = raw
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| invalid("title must be a non-empty string".to_owned()))?;
    if !seen_titles.insert(title.clone()) {
        return Err(invalid(format!("title {title:?} is already used")));
    }

    let raw_entries = raw
        .entries
        .filter(|entries| !entries.is_empty())
        .ok_or_else(|| invalid("entries must be a non-empty list".to_owned()))?;
    if let Some(position) = raw_entries.iter().position(|e| e.parts().is_none()) {
        return Err(invalid(format!("entry #{position} is not a content path")));
    }

    let mut seen_paths = HashSet::with_capacity(raw_entries.len());
    let mut entries = Vec::with_capacity(raw_entries.len());
    for (path, title) in raw_entries.iter().filter_map(RawEntry::parts) {
        let entry = normalize_entry(path, title)?;
        if !seen_paths.insert(entry.path.clone()) {
            return Err(ConfigError::DuplicatePath {
                path: entry.path.as_str().to_owned(),
                section_index: index,
            });
        }
        entries.push(entry);
    }

    Ok(SidebarSection {
        title,
        collapsible: raw.collapsible.unwrap_or(DEFAULT_COLLAPSIBLE),
        entries,
    })
}

fn normalize_entry(path: &str, title: Option<&str>) -> Result<SidebarEntry, ConfigError> {
    Ok(SidebarEntry {
        path: ContentRef::parse(path)?,
        title: title
            .filter(|t| !t.trim().is_empty())
            .map(str::to_owned),
    })
}
