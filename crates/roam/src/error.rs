//! CLI error types.

use roam_config::ConfigError;
use roam_outline::OutlineError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Outline(#[from] OutlineError),

    #[error("{0}")]
    Validation(String),
}
