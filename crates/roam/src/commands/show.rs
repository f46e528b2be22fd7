//! `roam show` command implementation.

use std::path::PathBuf;

use clap::Args;
use roam_config::{CliSettings, Config};
use roam_outline::{Node, RefIndex};
use roam_render::{HierarchicalRenderer, extract_reference_ids, format_reference_quote};

use crate::error::CliError;
use crate::input::read_outline;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Outline JSON file (`-` reads stdin).
    input: PathBuf,

    /// Id of the node to print.
    id: String,

    /// Reference resolution passes (overrides config).
    #[arg(short, long)]
    depth: Option<usize>,

    /// Append a quote for every referenced node (overrides config).
    #[arg(long)]
    quote_refs: bool,

    /// Path to configuration file (default: auto-discover roam.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ShowArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            resolve_depth: self.depth,
            quote_refs: self.quote_refs.then_some(true),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let nodes = read_outline(&self.input)?;
        let index = RefIndex::build(&nodes);
        let node = index
            .get(&self.id)
            .ok_or_else(|| CliError::Validation(format!("No node with id {}", self.id)))?;

        let mut text = HierarchicalRenderer::new()
            .with_options(config.render.hierarchical_options())
            .with_ref_index(index.clone())
            .render(std::slice::from_ref(node));
        if config.render.quote_refs {
            text = append_quotes(text, node, &index);
        }

        output.document(&text)?;
        Ok(())
    }
}

/// Append one quote per distinct reference in the node's own text.
///
/// Unknown ids are quoted as not found.
fn append_quotes(text: String, node: &Node, index: &RefIndex<'_>) -> String {
    let mut ids: Vec<&str> = Vec::new();
    for id in extract_reference_ids(&node.text) {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    if ids.is_empty() {
        return text;
    }

    let quotes: Vec<String> = ids
        .iter()
        .map(|id| format_reference_quote(id, index.get(id)))
        .collect();
    format!("{text}\n\n{}", quotes.join("\n\n"))
}
