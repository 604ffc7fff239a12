//! `docnav resolve` command implementation.

use clap::Args;
use docnav_tree::{Matched, Resolution, TreeSpec, resolve};
use serde::Serialize;

use super::TreeArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Page to resolve, as linked from the tree (e.g. `class_parser.html`).
    target: String,

    #[command(flatten)]
    tree: TreeArgs,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
}

/// Resolution result with labels along the path.
#[derive(Debug, Serialize)]
struct ResolveReport {
    target: String,
    fallback: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolution: Option<Resolution>,
    labels: Vec<String>,
}

impl ResolveReport {
    fn build(target: &str, fallback: &str, spec: &TreeSpec) -> Self {
        let resolution = resolve(target, fallback, spec);
        let labels = resolution
            .as_ref()
            .and_then(|r| spec.trail(r.path.indices()))
            .map(|trail| trail.iter().map(|entry| entry.label.clone()).collect())
            .unwrap_or_default();

        Self {
            target: target.to_owned(),
            fallback: fallback.to_owned(),
            resolution,
            labels,
        }
    }
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or tree data cannot be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, spec) = self.tree.load(None, None)?;

        let report = ResolveReport::build(&self.target, &config.tree_resolved.fallback, &spec);

        if self.json {
            output.result(&serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        let Some(resolution) = &report.resolution else {
            output.warning(&format!(
                "Neither {} nor fallback {} is in the tree",
                report.target, report.fallback
            ));
            return Ok(());
        };

        if resolution.matched == Matched::Fallback {
            output.warning(&format!(
                "{} is not in the tree, using fallback {}",
                report.target, report.fallback
            ));
        }
        output.highlight(&report.labels.join(" > "));
        let indices: Vec<String> = resolution
            .path
            .indices()
            .iter()
            .map(ToString::to_string)
            .collect();
        output.result(&indices.join("/"));

        Ok(())
    }
}
