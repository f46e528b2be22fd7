//! Outline input loading.

use std::io::Read;
use std::path::Path;

use roam_outline::{Node, parse_nodes};

use crate::error::CliError;

/// Path that reads the outline from stdin.
pub(crate) const STDIN_PATH: &str = "-";

/// Whether `path` names stdin rather than a file.
pub(crate) fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}

/// Read and decode an outline export.
pub(crate) fn read_outline(path: &Path) -> Result<Vec<Node>, CliError> {
    let json = if is_stdin(path) {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|e| {
            std::io::Error::new(e.kind(), format!("{}: {e}", path.display()))
        })?
    };

    let nodes = parse_nodes(&json)?;
    tracing::info!(path = %path.display(), top_level = nodes.len(), "Loaded outline");
    Ok(nodes)
}
