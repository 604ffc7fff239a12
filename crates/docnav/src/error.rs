//! CLI error types.

use docnav_config::ConfigError;
use docnav_tree::SpecError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Spec(#[from] SpecError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
