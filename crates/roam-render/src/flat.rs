//! Flattening renderer.
//!
//! Renders a document as shallow prose with a flat appendix per section:
//!
//! - each top-level node and each of its direct children becomes a heading or
//!   paragraph;
//! - everything below a direct child is linearized, in pre-order, into a single
//!   bullet list regardless of how deeply it was nested;
//! - code blocks inside that list are never bulleted: they close the pending
//!   list, are emitted verbatim, and a new list starts after them.
//!
//! Tables at the top two levels render as GFM tables. Unlike the hierarchical
//! renderer, no blank-line normalization is applied to node text.

use roam_outline::{Node, RefIndex};

use crate::classify::{NodeKind, classify};
use crate::refs::resolve_references;
use crate::table::render_table;
use crate::util::{join_blocks, merged_index};

/// Renders a forest with the flattening policy.
///
/// # Example
///
/// ```
/// use roam_outline::{Heading, Node};
/// use roam_render::FlatRenderer;
///
/// let nodes = vec![Node::new("Guide").with_heading(Heading::H1).with_children(vec![
///     Node::new("Setup").with_children(vec![
///         Node::new("install").with_children(vec![Node::new("run the script")]),
///     ]),
/// ])];
///
/// let markdown = FlatRenderer::new().render(&nodes);
/// assert_eq!(markdown, "# Guide\n\nSetup\n\n- install\n- run the script");
/// ```
#[derive(Clone, Debug)]
pub struct FlatRenderer<'a> {
    resolve_depth: usize,
    ref_index: Option<RefIndex<'a>>,
}

impl Default for FlatRenderer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> FlatRenderer<'a> {
    /// Create a renderer resolving references with a single pass.
    #[must_use]
    pub fn new() -> Self {
        Self {
            resolve_depth: 1,
            ref_index: None,
        }
    }

    /// Set the number of reference resolution passes (0 disables resolution).
    #[must_use]
    pub fn with_resolve_depth(mut self, depth: usize) -> Self {
        self.resolve_depth = depth;
        self
    }

    /// Resolve references against a caller-supplied index as well.
    ///
    /// Nodes of the rendered forest are merged in; the supplied entries win.
    #[must_use]
    pub fn with_ref_index(mut self, index: RefIndex<'a>) -> Self {
        self.ref_index = Some(index);
        self
    }

    /// Render top-level nodes in input order.
    pub fn render(&self, nodes: &'a [Node]) -> String {
        let index = merged_index(self.ref_index.as_ref(), nodes);
        tracing::debug!(
            top_level = nodes.len(),
            indexed = index.len(),
            "Rendering flat document"
        );

        let mut lines = Vec::new();
        for node in nodes {
            let kind = classify(node);
            if kind == NodeKind::Table {
                push_table(&mut lines, node, &index);
                continue;
            }
            lines.push(self.block_text(node, kind, &index));
            lines.push(String::new());

            for child in node.sorted_children() {
                let kind = classify(child);
                if kind == NodeKind::Table {
                    push_table(&mut lines, child, &index);
                    continue;
                }
                lines.push(self.block_text(child, kind, &index));
                lines.push(String::new());

                self.push_list(&mut lines, &descendants(child), &index);
            }
        }

        join_blocks(&lines)
    }

    fn resolve(&self, node: &Node, index: &RefIndex<'_>) -> String {
        resolve_references(&node.text, index, self.resolve_depth)
    }

    /// Heading or paragraph text.
    fn block_text(&self, node: &Node, kind: NodeKind, index: &RefIndex<'_>) -> String {
        kind.decorate(self.resolve(node, index))
    }

    /// Emit deep nodes as bullets, breaking the list around code blocks.
    fn push_list(&self, lines: &mut Vec<String>, items: &[&Node], index: &RefIndex<'_>) {
        let mut pending: Vec<String> = Vec::new();
        for item in items {
            let text = self.resolve(item, index);
            if classify(item) == NodeKind::Code {
                flush_list(lines, &mut pending);
                lines.push(text);
                lines.push(String::new());
            } else {
                pending.push(format!("- {text}"));
            }
        }
        flush_list(lines, &mut pending);
    }
}

/// Render with the flattening policy.
///
/// `ref_index` is merged with an index built from `nodes`; its entries win.
pub fn render_flat<'a>(nodes: &'a [Node], ref_index: Option<&RefIndex<'a>>) -> String {
    let mut renderer = FlatRenderer::new();
    if let Some(index) = ref_index {
        renderer = renderer.with_ref_index(index.clone());
    }
    renderer.render(nodes)
}

/// All descendants of a top-level node's direct child, in pre-order.
///
/// The child sits at level one below its top-level node, so every node
/// collected here is at level two or deeper. Nesting below that is discarded.
fn descendants(node: &Node) -> Vec<&Node> {
    let mut collected = Vec::new();
    collect_descendants(node, &mut collected);
    collected
}

fn collect_descendants<'n>(node: &'n Node, collected: &mut Vec<&'n Node>) {
    for child in node.sorted_children() {
        collected.push(child);
        collect_descendants(child, collected);
    }
}

fn flush_list(lines: &mut Vec<String>, pending: &mut Vec<String>) {
    if pending.is_empty() {
        return;
    }
    lines.append(pending);
    lines.push(String::new());
}

/// Emit a table followed by a blank line; empty tables emit nothing.
fn push_table(lines: &mut Vec<String>, root: &Node, index: &RefIndex<'_>) {
    let table = render_table(root, index);
    if table.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(table);
    lines.push(String::new());
}
