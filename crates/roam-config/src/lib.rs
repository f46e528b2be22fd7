//! Configuration management for roam exports.
//!
//! Parses `roam.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [render]
//! mode = "hierarchical"
//! resolve_depth = 1
//! top_level_as_paragraphs = true
//! quote_refs = false
//!
//! [output]
//! dir = "${NOTES_DIR:-export}"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `output.dir` supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use std::path::{Path, PathBuf};

use roam_render::{HierarchicalOptions, RenderMode};
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "roam.toml";

/// Upper bound for `render.resolve_depth`.
const MAX_RESOLVE_DEPTH: usize = 10;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override rendering policy.
    pub mode: Option<RenderMode>,
    /// Override reference resolution depth.
    pub resolve_depth: Option<usize>,
    /// Override top-level paragraph rendering.
    pub top_level_as_paragraphs: Option<bool>,
    /// Override reference quoting.
    pub quote_refs: Option<bool>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering configuration.
    pub render: RenderConfig,
    /// Output configuration (paths are relative strings from TOML).
    output: OutputConfigRaw,

    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Rendering policy.
    pub mode: RenderMode,
    /// Reference resolution passes (0 disables resolution).
    pub resolve_depth: usize,
    /// Render top-level nodes as paragraphs in hierarchical mode.
    pub top_level_as_paragraphs: bool,
    /// Append blockquotes for references when showing a single node.
    pub quote_refs: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::default(),
            resolve_depth: 1,
            top_level_as_paragraphs: true,
            quote_refs: false,
        }
    }
}

impl RenderConfig {
    /// Options for the hierarchical renderer.
    #[must_use]
    pub fn hierarchical_options(&self) -> HierarchicalOptions {
        HierarchicalOptions {
            resolve_depth: self.resolve_depth,
            top_level_as_paragraphs: self.top_level_as_paragraphs,
        }
    }
}

/// Raw output configuration as parsed from TOML (paths as strings).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
}

/// Resolved output configuration with absolute paths.
#[derive(Debug, Default)]
pub struct OutputConfig {
    /// Directory rendered documents are written to. `None` means stdout.
    pub dir: Option<PathBuf>,
}

impl OutputConfig {
    /// Output file for a given input file (`<dir>/<input stem>.md`).
    ///
    /// Returns `None` when no output directory is configured.
    #[must_use]
    pub fn document_path(&self, input: &Path) -> Option<PathBuf> {
        let dir = self.dir.as_ref()?;
        let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
        name.push(".md");
        Some(dir.join(name))
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`output.dir`").
        field: String,
        /// Error message from expansion.
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `roam.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            tracing::debug!(path = %discovered.display(), "Discovered config file");
            Self::load_from_file(&discovered)?
        } else {
            tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(mode) = settings.mode {
            self.render.mode = mode;
        }
        if let Some(depth) = settings.resolve_depth {
            self.render.resolve_depth = depth;
        }
        if let Some(paragraphs) = settings.top_level_as_paragraphs {
            self.render.top_level_as_paragraphs = paragraphs;
        }
        if let Some(quote_refs) = settings.quote_refs {
            self.render.quote_refs = quote_refs;
        }
        if let Some(dir) = &settings.output_dir {
            self.output_resolved.dir = Some(dir.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        tracing::info!(
            path = %path.display(),
            mode = config.render.mode.as_str(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render.resolve_depth > MAX_RESOLVE_DEPTH {
            return Err(ConfigError::Validation(format!(
                "render.resolve_depth cannot exceed {MAX_RESOLVE_DEPTH}"
            )));
        }
        if let Some(dir) = &self.output.dir
            && dir.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "output.dir cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.output.dir {
            self.output.dir = Some(expand::expand_env(dir, "output.dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.output_resolved = OutputConfig {
            dir: self.output.dir.as_deref().map(|dir| config_dir.join(dir)),
        };
    }
}
