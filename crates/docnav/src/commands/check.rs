//! `docnav check` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_config::{CliSettings, Config, ConfigError, RawNavigationConfig};
use docnav_nav::{ContentSource, FsContent, NavState, normalize, verify_content};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Site base path (overrides config).
    #[arg(long, env = "DOCNAV_BASE")]
    base: Option<String>,

    /// Only validate the config, don't look for the referenced documents.
    #[arg(long)]
    skip_content: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded, fails normalization,
    /// or references a missing document.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            base: self.base,
            source_dir: self.source_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(source_dir = %config.docs_resolved.source_dir.display(), "Loaded configuration");

        match &config.config_path {
            Some(path) => output.info(&format!("Config: {}", path.display())),
            None => output.info("Config: not found, using defaults"),
        }

        let source = if self.skip_content {
            output.info("Content check: skipped");
            None
        } else {
            let source_dir = &config.docs_resolved.source_dir;
            output.info(&format!("Source directory: {}", source_dir.display()));
            Some(FsContent::new(source_dir.clone()))
        };

        let state = check(
            config.into_site(),
            source.as_ref().map(|s| s as &dyn ContentSource),
        )?;
        output.success(&summary(&state));

        Ok(())
    }
}

/// Normalize the config and, if a source is given, verify every entry exists.
fn check(
    raw: RawNavigationConfig,
    source: Option<&dyn ContentSource>,
) -> Result<NavState, ConfigError> {
    let state = normalize(raw)?;
    if let Some(source) = source {
        verify_content(&state, source)?;
    }
    Ok(state)
}

fn summary(state: &NavState) -> String {
    format!(
        "Navigation OK: {} sections, {} entries",
        state.sidebar().len(),
        state.sidebar().entry_count()
    )
}
