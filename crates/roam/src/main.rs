//! Roam CLI - Outline to Markdown exporter.
//!
//! Provides commands for:
//! - `render`: Render an outline export as Markdown
//! - `refs`: List references that do not resolve
//! - `show`: Print a single node with its references resolved

mod commands;
mod error;
mod input;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RefsArgs, RenderArgs, ShowArgs};
use output::Output;

/// Roam - Outline to Markdown exporter.
#[derive(Parser)]
#[command(name = "roam", version, about)]
struct Cli {
    /// Enable verbose output (show INFO logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an outline export as Markdown.
    Render(RenderArgs),
    /// List reference ids that resolve to no node.
    Refs(RefsArgs),
    /// Print one node and its subtree.
    Show(ShowArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr, stdout carries rendered documents
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Refs(args) => args.execute(),
        Commands::Show(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
