//! docnav CLI - documentation navigation tree.
//!
//! Provides commands for:
//! - `resolve`: Print the breadcrumb path for a page
//! - `render`: Build the navigation tree for a page and print its markup

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use commands::{RenderArgs, ResolveArgs};
use output::Output;

/// docnav - Documentation navigation tree.
#[derive(Parser)]
#[command(name = "docnav", version, about)]
struct Cli {
    /// Enable verbose output (resolution and scroll logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the breadcrumb path for a page.
    Resolve(ResolveArgs),
    /// Build the navigation tree for a page and print its markup.
    Render(RenderArgs),
}

/// Log filter: `--verbose` enables DEBUG, otherwise `RUST_LOG` with a WARN default.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Resolve(args) => args.execute(),
        Commands::Render(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_filter_enables_debug() {
        assert_eq!(log_filter(true).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_cli_parses_render_arguments() {
        let cli = Cli::try_parse_from(["docnav", "-v", "render", "a.html", "--relpath", "../"]).unwrap();

        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Render(_)));
    }
}
