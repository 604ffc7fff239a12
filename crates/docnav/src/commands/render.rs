//! `docnav render` command implementation.

use clap::Args;
use docnav_tree::{
    HtmlRenderer, InitOutcome, Matched, SessionConfig, TreeSession, TreeSpec, ViewportMetrics,
};

use super::TreeArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Current page, as linked from the tree (e.g. `class_parser.html`).
    target: String,

    #[command(flatten)]
    tree: TreeArgs,

    /// Prefix prepended to every link (overrides config).
    #[arg(long)]
    relpath: Option<String>,

    /// Window height used for scroll centering (overrides config).
    #[arg(long)]
    window_height: Option<u32>,
}

/// Result of rendering the tree for one page.
#[derive(Debug)]
struct RenderedPage {
    outcome: InitOutcome,
    scroll_offset: Option<f64>,
    markup: String,
}

/// Run one page load: build the session, expand to `target`, signal host load.
fn render_page(
    spec: &TreeSpec,
    target: &str,
    fallback: &str,
    relpath: &str,
    metrics: ViewportMetrics,
) -> RenderedPage {
    let config = SessionConfig {
        fallback: fallback.to_owned(),
    };
    let mut session = TreeSession::new(spec, HtmlRenderer::new(relpath), config);

    let outcome = session.init_tree(target);
    let scroll_offset = session.host_loaded(metrics);
    let markup = session.renderer().render();

    RenderedPage {
        outcome,
        scroll_offset,
        markup,
    }
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or tree data cannot be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, spec) = self.tree.load(self.relpath, self.window_height)?;

        let viewport = &config.viewport;
        let metrics = ViewportMetrics::new(
            f64::from(viewport.window_height),
            f64::from(viewport.header_height),
            f64::from(viewport.footer_height),
        );
        let page = render_page(
            &spec,
            &self.target,
            &config.tree_resolved.fallback,
            &config.tree_resolved.relpath,
            metrics,
        );

        match &page.outcome {
            InitOutcome::Selected { path, matched, .. } => {
                let via = match matched {
                    Matched::Target => "",
                    Matched::Fallback => " (fallback)",
                };
                output.success(&format!("Selected path {:?}{via}", path.indices()));
            }
            InitOutcome::Unresolved => {
                output.warning(&format!(
                    "{} not in tree; rendering collapsed tree",
                    self.target
                ));
            }
        }
        if let Some(offset) = page.scroll_offset {
            output.dim(&format!("Scroll offset: {offset}"));
        }
        output.result(&page.markup);

        Ok(())
    }
}
