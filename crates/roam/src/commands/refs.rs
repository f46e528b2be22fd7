//! `roam refs` command implementation.

use std::path::PathBuf;

use clap::Args;
use roam_outline::RefIndex;
use roam_render::collect_unresolved_ids;

use crate::error::CliError;
use crate::input::read_outline;
use crate::output::Output;

/// Arguments for the refs command.
#[derive(Args)]
pub(crate) struct RefsArgs {
    /// Outline JSON file (`-` reads stdin).
    input: PathBuf,
}

impl RefsArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let nodes = read_outline(&self.input)?;
        let unresolved = collect_unresolved_ids(&nodes, &RefIndex::build(&nodes));
        if unresolved.is_empty() {
            output.success("All references resolve");
            return Ok(());
        }

        for id in &unresolved {
            output.document(id)?;
        }
        Ok(())
    }
}
