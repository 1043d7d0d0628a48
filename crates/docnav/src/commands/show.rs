//! `docnav show` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_config::{CliSettings, Config};
use docnav_nav::{NavState, normalize};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site base path (overrides config).
    #[arg(long, env = "DOCNAV_BASE")]
    base: Option<String>,

    /// Print the normalized navigation as JSON.
    #[arg(long)]
    json: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ShowArgs {
    /// Execute the show command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded or fails normalization.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            base: self.base,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let state = normalize(config.into_site())?;

        let output = Output::stdout();
        if self.json {
            output.info(&serde_json::to_string_pretty(&state)?);
            return Ok(());
        }

        for line in tree_lines(&state) {
            match line {
                TreeLine::Header(text) => output.highlight(&text),
                TreeLine::Section(text) => output.info(&text),
                TreeLine::Entry(text) => output.detail(&text),
            }
        }

        Ok(())
    }
}

/// One rendered line of the navigation tree.
#[derive(Debug, PartialEq, Eq)]
enum TreeLine {
    Header(String),
    Section(String),
    Entry(String),
}

impl TreeLine {
    fn text(&self) -> &str {
        match self {
            Self::Header(text) | Self::Section(text) | Self::Entry(text) => text,
        }
    }
}

/// Render the navigation tree as indented text lines.
///
/// The first line is the site header, followed by one line per section and
/// one more-indented line per entry with its resolved link.
fn tree_lines(state: &NavState) -> Vec<TreeLine> {
    let mut lines = vec![TreeLine::Header(format!(
        "{} ({})",
        state.title(),
        state.base()
    ))];

    for section in state.sidebar() {
        let marker = if section.collapsible { " [collapsible]" } else { "" };
        lines.push(TreeLine::Section(format!("  {}{marker}", section.title)));

        for entry in &section.entries {
            let link = state.link_for(&entry.path);
            let line = match &entry.title {
                Some(title) => format!("    {} \"{title}\" -> {link}", entry.path),
                None => format!("    {} -> {link}", entry.path),
            };
            lines.push(TreeLine::Entry(line));
        }
    }

    lines
}
