//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod resolve;

use std::path::PathBuf;

use clap::Args;
use docnav_config::{CliSettings, Config};
use docnav_tree::TreeSpec;

use crate::error::CliError;
use crate::output::Output;

pub(crate) use render::RenderArgs;
pub(crate) use resolve::ResolveArgs;

/// Arguments shared by commands that load tree data.
#[derive(Args)]
pub(crate) struct TreeArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tree data file, generated `.js` or JSON (overrides config).
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Page selected when the target is not in the tree (overrides config).
    #[arg(long)]
    fallback: Option<String>,
}

impl TreeArgs {
    /// Load configuration and tree data.
    ///
    /// `relpath` and `window_height` are command-specific overrides.
    pub(crate) fn load(
        self,
        relpath: Option<String>,
        window_height: Option<u32>,
    ) -> Result<(Config, TreeSpec), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            data: self.data,
            fallback: self.fallback,
            relpath,
            window_height,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(
            data = %config.tree_resolved.data.display(),
            fallback = %config.tree_resolved.fallback,
            "Configuration loaded"
        );
        if let Some(path) = &config.config_path {
            output.dim(&format!("Config: {}", path.display()));
        }

        let spec = TreeSpec::load(&config.tree_resolved.data)?;
        output.info(&format!(
            "Loaded {} top-level entries from {}",
            spec.entries().len(),
            config.tree_resolved.data.display()
        ));

        Ok((config, spec))
    }
}
