//! `roam render` command implementation.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use roam_config::{CliSettings, Config, OutputConfig, RenderConfig};
use roam_outline::{Node, RefIndex};
use roam_render::{FlatRenderer, HierarchicalRenderer, RenderMode, collect_unresolved_ids};

use crate::error::CliError;
use crate::input::{is_stdin, read_outline};
use crate::output::Output;

/// Rendering policy selectable on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum ModeArg {
    /// Paragraphs with one flat bullet list per section.
    Flat,
    /// Nested bullet lists mirroring the outline.
    Hierarchical,
}

impl From<ModeArg> for RenderMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Flat => Self::Flat,
            ModeArg::Hierarchical => Self::Hierarchical,
        }
    }
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Outline JSON file (`-` reads stdin).
    input: PathBuf,

    /// Rendering policy (overrides config).
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Reference resolution passes, 0 keeps markers verbatim (overrides config).
    #[arg(short, long)]
    depth: Option<usize>,

    /// Render top-level nodes as bullets instead of paragraphs.
    #[arg(long)]
    bullets: bool,

    /// Output file (default: `<output.dir>/<input stem>.md`, or stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for `<input stem>.md` (overrides config).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover roam.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }

        let nodes = read_outline(&self.input)?;
        let unresolved = collect_unresolved_ids(&nodes, &RefIndex::build(&nodes));
        if !unresolved.is_empty() {
            let ids: Vec<&str> = unresolved.iter().map(String::as_str).collect();
            output.warning(&format!(
                "{} unresolved reference(s): {}",
                ids.len(),
                ids.join(", ")
            ));
        }

        let markdown = render_document(&nodes, &config.render);

        match destination(self.output, &self.input, &config.output_resolved) {
            Some(path) => {
                if let Some(parent) = path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&path, format!("{markdown}\n"))?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => output.document(&markdown)?,
        }
        Ok(())
    }

    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            mode: self.mode.map(Into::into),
            resolve_depth: self.depth,
            top_level_as_paragraphs: self.bullets.then_some(false),
            output_dir: self.output_dir.clone(),
            ..CliSettings::default()
        }
    }
}

/// Render a forest with the configured policy.
pub(crate) fn render_document(nodes: &[Node], render: &RenderConfig) -> String {
    match render.mode {
        RenderMode::Flat => FlatRenderer::new()
            .with_resolve_depth(render.resolve_depth)
            .render(nodes),
        RenderMode::Hierarchical => HierarchicalRenderer::new()
            .with_options(render.hierarchical_options())
            .render(nodes),
    }
}

/// Output file for a render, `None` for stdout.
///
/// An explicit `--output` wins; otherwise the configured output directory is
/// used unless the input came from stdin.
fn destination(
    explicit: Option<PathBuf>,
    input: &Path,
    config: &OutputConfig,
) -> Option<PathBuf> {
    if explicit.is_some() {
        return explicit;
    }
    if is_stdin(input) {
        return None;
    }
    config.document_path(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: RenderArgs,
    }

    fn parse(args: &[&str]) -> RenderArgs {
        TestCli::try_parse_from(std::iter::once("render").chain(args.iter().copied()))
            .unwrap()
            .args
    }

    fn outline() -> Vec<Node> {
        vec![
            Node::new("Top").with_children(vec![
                Node::new("Child").with_children(vec![Node::new("Grandchild ((g))")]),
            ]),
            Node::new("ref").with_id("g"),
        ]
    }

    #[test]
    fn test_render_document_hierarchical() {
        let render = RenderConfig::default();

        assert_eq!(
            render_document(&outline(), &render),
            "Top\n\n- Child\n  - Grandchild ref\n\nref"
        );
    }

    #[test]
    fn test_render_document_flat() {
        let render = RenderConfig {
            mode: RenderMode::Flat,
            ..RenderConfig::default()
        };

        assert_eq!(
            render_document(&outline(), &render),
            "Top\n\nChild\n\n- Grandchild ref\n\nref"
        );
    }

    #[test]
    fn test_render_document_depth_zero_keeps_markers() {
        let render = RenderConfig {
            resolve_depth: 0,
            ..RenderConfig::default()
        };

        assert!(render_document(&outline(), &render).contains("Grandchild ((g))"));
    }

    #[test]
    fn test_destination_explicit_wins() {
        let config = OutputConfig {
            dir: Some(PathBuf::from("/out")),
        };

        assert_eq!(
            destination(Some(PathBuf::from("doc.md")), Path::new("page.json"), &config),
            Some(PathBuf::from("doc.md"))
        );
    }

    #[test]
    fn test_destination_from_output_dir() {
        let config = OutputConfig {
            dir: Some(PathBuf::from("/out")),
        };

        assert_eq!(
            destination(None, Path::new("notes/page.json"), &config),
            Some(PathBuf::from("/out/page.md"))
        );
        assert_eq!(destination(None, Path::new("-"), &config), None);
    }

    #[test]
    fn test_destination_defaults_to_stdout() {
        assert_eq!(
            destination(None, Path::new("page.json"), &OutputConfig::default()),
            None
        );
    }

    #[test]
    fn test_flags_become_cli_settings() {
        let args = parse(&[
            "page.json",
            "--mode",
            "flat",
            "--depth",
            "3",
            "--bullets",
            "--output-dir",
            "out",
        ]);
        let settings = args.cli_settings();

        assert_eq!(settings.mode, Some(RenderMode::Flat));
        assert_eq!(settings.resolve_depth, Some(3));
        assert_eq!(settings.top_level_as_paragraphs, Some(false));
        assert_eq!(settings.output_dir, Some(PathBuf::from("out")));
        assert_eq!(settings.quote_refs, None);
    }

    #[test]
    fn test_no_flags_override_nothing() {
        let settings = parse(&["page.json"]).cli_settings();

        assert_eq!(settings.mode, None);
        assert_eq!(settings.top_level_as_paragraphs, None);
        assert_eq!(settings.output_dir, None);
    }

    #[test]
    fn test_output_dir_flag_sets_destination() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = CliSettings {
            output_dir: Some(temp_dir.path().to_path_buf()),
            ..CliSettings::default()
        };
        let config_path = temp_dir.path().join("roam.toml");
        std::fs::write(&config_path, "").unwrap();

        let config = Config::load(Some(config_path.as_path()), Some(&settings)).unwrap();
        assert_eq!(
            destination(None, Path::new("notes/page.json"), &config.output_resolved),
            Some(temp_dir.path().join("page.md"))
        );
    }

    #[test]
    fn test_mode_arg_conversion() {
        assert_eq!(RenderMode::from(ModeArg::Flat), RenderMode::Flat);
        assert_eq!(
            RenderMode::from(ModeArg::Hierarchical),
            RenderMode::Hierarchical
        );
    }
}
