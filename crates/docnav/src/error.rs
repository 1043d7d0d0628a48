//! CLI error types.

use docnav_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("Failed to serialize navigation: {0}")]
    Json(#[from] serde_json::Error),
}
