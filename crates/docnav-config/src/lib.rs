//! Configuration loading for docnav.
//!
//! Parses the site configuration file into the raw navigation schema
//! ([`RawNavigationConfig`]) and resolves the content directory. The file is
//! auto-discovered in the current directory and its parents when no explicit
//! path is given.
//!
//! The format is chosen by extension: `.json` and `.yaml`/`.yml` use the JSON
//! and YAML parsers, anything else is read as TOML.
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `base`
//! - `title`
//! - `description`
//! - `docs.source_dir`

mod expand;
mod raw;

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use raw::{
    HeadTag, MarkdownOptions, NavLink, RawEntry, RawNavigationConfig, RawSidebarSection,
    RawThemeConfig,
};

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site base path.
    pub base: Option<String>,
    /// Override content source directory.
    pub source_dir: Option<PathBuf>,
}

/// Config filenames searched for during discovery, in priority order.
const CONFIG_FILENAMES: [&str; 4] = ["docnav.toml", "docnav.json", "docnav.yaml", "docnav.yml"];

/// Application configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Navigation settings as authored.
    #[serde(flatten)]
    pub site: RawNavigationConfig,
    /// Content settings (paths are relative strings from the file).
    #[serde(default)]
    docs: DocsConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Directory holding the markdown documents referenced by the sidebar.
    pub source_dir: PathBuf,
}

/// Configuration error.
///
/// Covers both loading the file and normalizing its navigation tree.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.source_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_DIR`} not set").
        message: String,
    },
    /// Required top-level field absent or empty.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Field name.
        field: &'static str,
    },
    /// Sidebar section without a usable title or entries.
    #[error("Invalid sidebar section #{index}: {reason}")]
    InvalidSection {
        /// Zero-based section position.
        index: usize,
        /// What is wrong with the section.
        reason: String,
    },
    /// Content path that cannot be normalized.
    #[error("Invalid content path {path:?}: {reason}")]
    InvalidPath {
        /// Path as authored.
        path: String,
        /// What is wrong with the path.
        reason: &'static str,
    },
    /// Same content path listed twice in one section.
    #[error("Duplicate path {path} in sidebar section #{section_index}")]
    DuplicatePath {
        /// Normalized path.
        path: String,
        /// Zero-based section position.
        section_index: usize,
    },
    /// Sidebar entry whose document does not exist.
    #[error("Content not found for {path} in sidebar section #{section_index}")]
    ContentNotFound {
        /// Normalized path.
        path: String,
        /// Zero-based section position.
        section_index: usize,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise, searches
    /// for a config file in the current directory and parents, falling back
    /// to an empty configuration.
    ///
    /// CLI settings are applied after loading and path resolution.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, reading or
    /// parsing fails, or an environment variable cannot be expanded.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Take the navigation settings for normalization.
    #[must_use]
    pub fn into_site(self) -> RawNavigationConfig {
        self.site
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base) = &settings.base {
            self.site.base = Some(base.clone());
        }
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let start = std::env::current_dir().ok()?;
        Self::discover_from(start)
    }

    fn discover_from(mut current: PathBuf) -> Option<PathBuf> {
        loop {
            for name in CONFIG_FILENAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            site: RawNavigationConfig::default(),
            docs: DocsConfigRaw::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(path, &content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(content)?,
            Some("yaml" | "yml") => serde_yaml::from_str(content)?,
            _ => toml::from_str(content)?,
        };
        Ok(config)
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_opt(&mut self.site.base, "base")?;
        expand::expand_opt(&mut self.site.title, "title")?;
        expand::expand_opt(&mut self.site.description, "description")?;
        expand::expand_opt(&mut self.docs.source_dir, "docs.source_dir")?;
        Ok(())
    }

    fn resolve_paths(&mut self, config_dir: &Path) {
        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(self.docs.source_dir.as_deref().unwrap_or("docs")),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const BLOG_TOML: &str = r#"
base = "/blog/"
title = "Notes"
description = "Things worth writing down"
last_updated = "Last updated"

[[head]]
tag = "link"
attrs = { rel = "icon", href = "/image/favicon.ico" }

[[nav]]
text = "Home"
link = "/"

[[sidebar]]
title = "JavaScript"
collapsable = true
children = ["/JSRedBook/Base.md", "/JSRedBook/UseJSInHtml.md"]

[[sidebar]]
title = "React Hooks"
children = ["/ReactHooks/BaseHooks.md"]

[markdown]
line_numbers = true

[docs]
source_dir = "content"
"#;

    const BLOG_JSON: &str = r#"{
  "base": "/blog/",
  "title": "Notes",
  "description": "Things worth writing down",
  "lastUpdated": "Last updated",
  "head": [["link", { "rel": "icon", "href": "/image/favicon.ico" }]],
  "nav": [{ "text": "Home", "link": "/" }],
  "sidebar": [
    {
      "title": "JavaScript",
      "collapsable": true,
      "children": ["/JSRedBook/Base.md", "/JSRedBook/UseJSInHtml.md"]
    },
    { "title": "React Hooks", "children": ["/ReactHooks/BaseHooks.md"] }
  ],
  "markdown": { "lineNumbers": true },
  "docs": { "source_dir": "content" }
}"#;

    const BLOG_YAML: &str = r#"
base: /blog/
title: Notes
description: Things worth writing down
last_updated: Last updated
head:
  - tag: link
    attrs: { rel: icon, href: /image/favicon.ico }
nav:
  - text: Home
    link: /
sidebar:
  - title: JavaScript
    collapsable: true
    children:
      - /JSRedBook/Base.md
      - /JSRedBook/UseJSInHtml.md
  - title: React Hooks
    children:
      - /ReactHooks/BaseHooks.md
markdown:
  line_numbers: true
docs:
  source_dir: content
"#;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert!(config.site.base.is_none());
        assert!(config.site.sidebar.is_none());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.site, RawNavigationConfig::default());
    }

    #[test]
    fn test_parse_full_toml_config() {
        let config: Config = toml::from_str(BLOG_TOML).unwrap();
        let site = &config.site;

        assert_eq!(site.base.as_deref(), Some("/blog/"));
        assert_eq!(site.title.as_deref(), Some("Notes"));
        assert_eq!(site.last_updated.as_deref(), Some("Last updated"));
        assert_eq!(site.head.len(), 1);
        assert_eq!(
            site.nav,
            vec![NavLink {
                text: "Home".to_owned(),
                link: "/".to_owned(),
            }]
        );
        assert!(site.markdown.line_numbers);

        let sidebar = site.sidebar.as_ref().unwrap();
        assert_eq!(sidebar.len(), 2);
        assert_eq!(sidebar[0].title.as_deref(), Some("JavaScript"));
        assert_eq!(sidebar[0].collapsible, Some(true));
        assert_eq!(sidebar[1].collapsible, None);
        assert_eq!(config.docs.source_dir.as_deref(), Some("content"));
    }

    #[test]
    fn test_formats_parse_to_same_config() {
        let from_toml = Config::parse(Path::new("docnav.toml"), BLOG_TOML).unwrap();
        let from_json = Config::parse(Path::new("docnav.json"), BLOG_JSON).unwrap();
        let from_yaml = Config::parse(Path::new("docnav.yaml"), BLOG_YAML).unwrap();

        assert_eq!(from_toml.site, from_json.site);
        assert_eq!(from_toml.site, from_yaml.site);
        assert_eq!(from_json.docs.source_dir.as_deref(), Some("content"));
        assert_eq!(from_yaml.docs.source_dir.as_deref(), Some("content"));
    }

    #[test]
    fn test_parse_error_reports_format() {
        let err = Config::parse(Path::new("docnav.json"), "{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));

        let err = Config::parse(Path::new("docnav.toml"), "base = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_resolve_paths() {
        let mut config: Config = toml::from_str(BLOG_TOML).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/content")
        );
    }

    #[test]
    fn test_resolve_paths_defaults_to_docs() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/project/docs"));
    }

    #[test]
    fn test_load_camel_case_last_updated() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("docnav.json");
        std::fs::write(&path, r#"{ "base": "/", "lastUpdated": "Edited" }"#).unwrap();

        let site = Config::load(Some(&path), None).unwrap().into_site();

        assert_eq!(site.last_updated.as_deref(), Some("Edited"));
    }

    #[test]
    fn test_load_theme_config_layout() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("docnav.json");
        let json = r#"{
  "base": "/blog/",
  "title": "Notes",
  "head": [["link", { "rel": "icon", "href": "/image/favicon.ico" }]],
  "themeConfig": {
    "lastUpdated": "Last updated",
    "nav": [{ "text": "Home", "link": "/" }],
    "sidebar": [
      { "title": "JavaScript", "collapsable": true, "children": ["/JSRedBook/Base.md"] }
    ],
    "markdown": { "lineNumbers": true }
  }
}"#;
        std::fs::write(&path, json).unwrap();

        let site = Config::load(Some(&path), None)
            .unwrap()
            .into_site()
            .with_theme_fallback();

        assert_eq!(site.last_updated.as_deref(), Some("Last updated"));
        assert_eq!(site.nav.len(), 1);
        assert_eq!(site.sidebar.as_ref().map(Vec::len), Some(1));
        assert!(site.markdown.line_numbers);
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file_sets_paths() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("docnav.toml");
        std::fs::write(&path, BLOG_TOML).unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(
            config.docs_resolved.source_dir,
            temp_dir.path().join("content")
        );
        assert_eq!(config.into_site().title.as_deref(), Some("Notes"));
    }

    #[test]
    fn test_load_yaml_by_extension() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("site.yml");
        std::fs::write(&path, BLOG_YAML).unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.site.base.as_deref(), Some("/blog/"));
    }

    #[test]
    fn test_discover_from_parent_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp_dir.path().join("docnav.json"), "{}").unwrap();

        let found = Config::discover_from(nested).unwrap();

        assert_eq!(found, temp_dir.path().join("docnav.json"));
    }

    #[test]
    fn test_discover_prefers_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("docnav.json"), "{}").unwrap();
        std::fs::write(temp_dir.path().join("docnav.toml"), "").unwrap();

        let found = Config::discover_from(temp_dir.path().to_path_buf()).unwrap();

        assert_eq!(found, temp_dir.path().join("docnav.toml"));
    }

    #[test]
    fn test_apply_cli_settings_base() {
        let mut config: Config = toml::from_str(BLOG_TOML).unwrap();
        let overrides = CliSettings {
            base: Some("/preview/".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.site.base.as_deref(), Some("/preview/"));
        assert_eq!(config.site.title.as_deref(), Some("Notes")); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_source_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/docs")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/custom/docs")
        );
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config: Config = toml::from_str(BLOG_TOML).unwrap();
        let before = config.site.clone();

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.site, before);
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCNAV_TEST_BASE", "/staging/");
            std::env::remove_var("DOCNAV_TEST_DOCS");
        }

        let toml = r#"
base = "${DOCNAV_TEST_BASE}"
title = "Notes"

[docs]
source_dir = "${DOCNAV_TEST_DOCS:-pages}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.site.base.as_deref(), Some("/staging/"));
        assert_eq!(config.site.title.as_deref(), Some("Notes"));
        assert_eq!(config.docs.source_dir.as_deref(), Some("pages"));

        unsafe {
            std::env::remove_var("DOCNAV_TEST_BASE");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCNAV_MISSING_TITLE");
        }

        let mut config: Config = toml::from_str(r#"title = "${DOCNAV_MISSING_TITLE}""#).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("DOCNAV_MISSING_TITLE"));
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::DuplicatePath {
            path: "/a.md".to_owned(),
            section_index: 2,
        };
        assert_eq!(err.to_string(), "Duplicate path /a.md in sidebar section #2");

        let err = ConfigError::MissingField { field: "base" };
        assert_eq!(err.to_string(), "Missing required field: base");
    }
}
