//! Hierarchical renderer.
//!
//! Keeps the outline's nesting as indented bullets, two spaces per level.
//! Nodes whose resolved text is blank produce no line and do not consume an
//! indentation level: their children render where the blank node would have.

use roam_outline::{Node, RefIndex};

use crate::classify::{NodeKind, classify};
use crate::refs::resolve_references;
use crate::table::Table;
use crate::util::{finish, merged_index};

const INDENT: &str = "  ";

/// Options for [`HierarchicalRenderer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HierarchicalOptions {
    /// Reference resolution passes; 0 disables resolution.
    pub resolve_depth: usize,
    /// Render top-level nodes as bare paragraphs instead of bullets.
    pub top_level_as_paragraphs: bool,
}

impl Default for HierarchicalOptions {
    fn default() -> Self {
        Self {
            resolve_depth: 1,
            top_level_as_paragraphs: true,
        }
    }
}

/// Renders a forest preserving its full nesting.
///
/// # Example
///
/// ```
/// use roam_outline::Node;
/// use roam_render::HierarchicalRenderer;
///
/// let nodes = vec![Node::new("Top").with_children(vec![
///     Node::new("Child 1").with_children(vec![Node::new("Grandchild")]),
///     Node::new("Child 2"),
/// ])];
///
/// let markdown = HierarchicalRenderer::new()
///     .with_top_level_as_paragraphs(false)
///     .render(&nodes);
/// assert_eq!(markdown, "- Top\n  - Child 1\n    - Grandchild\n  - Child 2");
/// ```
#[derive(Clone, Debug, Default)]
pub struct HierarchicalRenderer<'a> {
    options: HierarchicalOptions,
    ref_index: Option<RefIndex<'a>>,
}

impl<'a> HierarchicalRenderer<'a> {
    /// Create a renderer with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(mut self, options: HierarchicalOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the number of reference resolution passes (0 disables resolution).
    #[must_use]
    pub fn with_resolve_depth(mut self, depth: usize) -> Self {
        self.options.resolve_depth = depth;
        self
    }

    /// Render top-level nodes as paragraphs (`true`) or bullets (`false`).
    #[must_use]
    pub fn with_top_level_as_paragraphs(mut self, enabled: bool) -> Self {
        self.options.top_level_as_paragraphs = enabled;
        self
    }

    /// Resolve references against a caller-supplied index as well.
    ///
    /// When resolution is enabled, nodes of the rendered forest are merged in
    /// and the supplied entries win. With a resolve depth of 0 the index is
    /// only consulted for table cells.
    #[must_use]
    pub fn with_ref_index(mut self, index: RefIndex<'a>) -> Self {
        self.ref_index = Some(index);
        self
    }

    /// Render top-level nodes in input order.
    pub fn render(&self, nodes: &'a [Node]) -> String {
        if nodes.is_empty() {
            return String::new();
        }

        let index = self.index_for(nodes);
        tracing::debug!(
            top_level = nodes.len(),
            indexed = index.len(),
            resolve_depth = self.options.resolve_depth,
            "Rendering hierarchical document"
        );

        let mut lines = Vec::new();
        for node in nodes {
            let kind = classify(node);
            if kind == NodeKind::Table {
                if let Some(table) = Table::decode(node, &index) {
                    lines.push(table.to_markdown());
                    lines.push(String::new());
                }
                continue;
            }

            // Children of a bulleted top-level node nest one level under it
            let mut child_depth = 0;
            let text = self.resolve(node, &index);
            if !text.trim().is_empty() {
                let text = kind.decorate(text);
                if self.options.top_level_as_paragraphs {
                    lines.push(text);
                    lines.push(String::new());
                } else {
                    lines.push(format!("- {text}"));
                    child_depth = 1;
                }
            }

            let children = node.sorted_children();
            if !children.is_empty() {
                for child in children {
                    self.push_nested(&mut lines, child, &index, child_depth);
                }
                lines.push(String::new());
            }
        }

        finish(&lines)
    }

    fn index_for(&self, nodes: &'a [Node]) -> RefIndex<'a> {
        if self.options.resolve_depth == 0 {
            return self.ref_index.clone().unwrap_or_default();
        }
        merged_index(self.ref_index.as_ref(), nodes)
    }

    fn resolve(&self, node: &Node, index: &RefIndex<'_>) -> String {
        resolve_references(&node.text, index, self.options.resolve_depth)
    }

    fn push_nested(
        &self,
        lines: &mut Vec<String>,
        node: &Node,
        index: &RefIndex<'_>,
        depth: usize,
    ) {
        let text = self.resolve(node, index);
        if text.trim().is_empty() {
            for child in node.sorted_children() {
                self.push_nested(lines, child, index, depth);
            }
            return;
        }

        let indent = INDENT.repeat(depth);
        match classify(node) {
            NodeKind::Table => {
                if let Some(table) = Table::decode(node, index) {
                    for line in table.to_markdown().lines() {
                        lines.push(format!("{indent}{line}"));
                    }
                    lines.push(String::new());
                }
            }
            kind => {
                lines.push(format!("{indent}- {}", kind.decorate(text)));
                for child in node.sorted_children() {
                    self.push_nested(lines, child, index, depth + 1);
                }
            }
        }
    }
}

/// Render with the hierarchical policy.
///
/// `ref_index` is merged with an index built from `nodes` (its entries win);
/// with `resolve_depth == 0` it is the only index used.
pub fn render_hierarchical<'a>(
    nodes: &'a [Node],
    options: &HierarchicalOptions,
    ref_index: Option<&RefIndex<'a>>,
) -> String {
    let mut renderer = HierarchicalRenderer::new().with_options(*options);
    if let Some(index) = ref_index {
        renderer = renderer.with_ref_index(index.clone());
    }
    renderer.render(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use roam_outline::Heading;

    use crate::TABLE_MARKER;

    fn bullets() -> HierarchicalOptions {
        HierarchicalOptions {
            top_level_as_paragraphs: false,
            ..HierarchicalOptions::default()
        }
    }

    fn sample() -> Vec<Node> {
        vec![Node::new("Top level block").with_children(vec![
            Node::new("Child 1").with_children(vec![
                Node::new("Grandchild 1"),
                Node::new("Grandchild 2"),
            ]),
            Node::new("Child 2"),
        ])]
    }

    fn table_root() -> Node {
        Node::new(TABLE_MARKER).with_children(vec![
            Node::new("H1").with_children(vec![Node::new("H2")]),
            Node::new("a").with_children(vec![Node::new("b")]),
        ])
    }

    #[test]
    fn test_top_level_as_paragraphs() {
        assert_eq!(
            render_hierarchical(&sample(), &HierarchicalOptions::default(), None),
            "Top level block\n\n\
             - Child 1\n  - Grandchild 1\n  - Grandchild 2\n\
             - Child 2"
        );
    }

    #[test]
    fn test_top_level_as_bullets() {
        assert_eq!(
            render_hierarchical(&sample(), &bullets(), None),
            "- Top level block\n  - Child 1\n    - Grandchild 1\n    - Grandchild 2\n  - Child 2"
        );
    }

    #[test]
    fn test_multiple_top_level_nodes() {
        let nodes = vec![
            Node::new("A").with_children(vec![Node::new("a1")]),
            Node::new("B"),
            Node::new("C"),
        ];

        assert_eq!(
            render_hierarchical(&nodes, &HierarchicalOptions::default(), None),
            "A\n\n- a1\n\nB\n\nC"
        );
        assert_eq!(
            render_hierarchical(&nodes, &bullets(), None),
            "- A\n  - a1\n\n- B\n- C"
        );
    }

    #[test]
    fn test_arbitrary_depth() {
        let nodes = vec![Node::new("0").with_children(vec![Node::new("1").with_children(vec![
            Node::new("2").with_children(vec![Node::new("3").with_children(vec![Node::new("4")])]),
        ])])];

        assert_eq!(
            render_hierarchical(&nodes, &HierarchicalOptions::default(), None),
            "0\n\n- 1\n  - 2\n    - 3\n      - 4"
        );
    }

    #[test]
    fn test_blank_child_promotes_its_children() {
        let nodes = vec![Node::new("Top").with_children(vec![
            Node::new("Child").with_children(vec![
                Node::new("   ").with_children(vec![Node::new("promoted")]),
                Node::new("sibling"),
            ]),
        ])];

        assert_eq!(
            render_hierarchical(&nodes, &HierarchicalOptions::default(), None),
            "Top\n\n- Child\n  - promoted\n  - sibling"
        );
    }

    #[test]
    fn test_blank_top_level_node_still_renders_children() {
        let nodes = vec![Node::new("").with_children(vec![Node::new("orphan")])];

        assert_eq!(
            render_hierarchical(&nodes, &HierarchicalOptions::default(), None),
            "- orphan"
        );
        assert_eq!(render_hierarchical(&nodes, &bullets(), None), "- orphan");
    }

    #[test]
    fn test_reference_to_blank_text_is_blank() {
        let nodes = vec![Node::new("Top").with_children(vec![
            Node::new("((empty))").with_children(vec![Node::new("kept")]),
            Node::new("").with_id("empty"),
        ])];

        assert_eq!(
            render_hierarchical(&nodes, &HierarchicalOptions::default(), None),
            "Top\n\n- kept"
        );
    }

    #[test]
    fn test_headings() {
        let nodes = vec![
            Node::new("Title")
                .with_heading(Heading::H1)
                .with_children(vec![Node::new("Sub").with_heading(Heading::H3)]),
        ];

        assert_eq!(
            render_hierarchical(&nodes, &HierarchicalOptions::default(), None),
            "# Title\n\n- ### Sub"
        );
        assert_eq!(
            render_hierarchical(&nodes, &bullets(), None),
            "- # Title\n  - ### Sub"
        );
    }

    #[test]
    fn test_top_level_table() {
        let nodes = vec![table_root(), Node::new("After")];

        assert_eq!(
            render_hierarchical(&nodes, &HierarchicalOptions::default(), None),
            "| H1 | H2 |\n| --- | --- |\n| a | b |\n\nAfter"
        );
    }

    #[test]
    fn test_nested_table_is_indented() {
        let nodes = vec![Node::new("Top").with_children(vec![table_root(), Node::new("tail")])];

        assert_eq!(
            render_hierarchical(&nodes, &bullets(), None),
            "- Top\n  | H1 | H2 |\n  | --- | --- |\n  | a | b |\n\n  - tail"
        );
    }

    #[test]
    fn test_empty_tables_are_skipped() {
        let nodes = vec![
            Node::new(TABLE_MARKER),
            Node::new("Top").with_children(vec![Node::new(TABLE_MARKER), Node::new("x")]),
        ];

        assert_eq!(
            render_hierarchical(&nodes, &HierarchicalOptions::default(), None),
            "Top\n\n- x"
        );
    }

    #[test]
    fn test_resolve_depth() {
        let nodes = vec![
            Node::new("see ((b))").with_id("a"),
            Node::new("b says ((c))").with_id("b"),
            Node::new("the end").with_id("c"),
        ];

        let render = |depth| {
            HierarchicalRenderer::new()
                .with_resolve_depth(depth)
                .render(&nodes)
        };

        assert_eq!(render(0), "see ((b))\n\nb says ((c))\n\nthe end");
        assert_eq!(render(1), "see b says ((c))\n\nb says the end\n\nthe end");
        assert_eq!(
            render(2),
            "see b says the end\n\nb says the end\n\nthe end"
        );
    }

    #[test]
    fn test_nested_references_resolved() {
        let nodes = vec![Node::new("Top").with_children(vec![
            Node::new("child ((ext))")
                .with_attached_refs(vec![Node::new("attached text").with_id("ext")]),
        ])];

        assert_eq!(
            render_hierarchical(&nodes, &HierarchicalOptions::default(), None),
            "Top\n\n- child attached text"
        );
    }

    #[test]
    fn test_external_index_is_merged() {
        let external = vec![Node::new("external wins").with_id("x")];
        let nodes = vec![
            Node::new("((x)) and ((y))"),
            Node::new("local x").with_id("x"),
            Node::new("local y").with_id("y"),
        ];

        let markdown = HierarchicalRenderer::new()
            .with_ref_index(RefIndex::build(&external))
            .render(&nodes);
        assert_eq!(
            markdown,
            "external wins and local y\n\nlocal x\n\nlocal y"
        );
    }

    #[test]
    fn test_render_hierarchical_with_caller_index() {
        let external = vec![Node::new("from elsewhere").with_id("ext")];
        let index = RefIndex::build(&external);
        let nodes = vec![Node::new("Top").with_children(vec![Node::new("see ((ext))")])];

        assert_eq!(
            render_hierarchical(&nodes, &bullets(), Some(&index)),
            "- Top\n  - see from elsewhere"
        );
        assert_eq!(
            render_hierarchical(&nodes, &bullets(), None),
            "- Top\n  - see ((ext))"
        );
    }

    #[test]
    fn test_depth_zero_ignores_forest_for_tables() {
        let nodes = vec![
            Node::new(TABLE_MARKER).with_children(vec![Node::new("((cell))")]),
            Node::new("value").with_id("cell"),
        ];

        assert_eq!(
            HierarchicalRenderer::new().with_resolve_depth(0).render(&nodes),
            "| ((cell)) |\n| --- |\n\nvalue"
        );
        assert_eq!(
            HierarchicalRenderer::new().render(&nodes),
            "| value |\n| --- |\n\nvalue"
        );
    }

    #[test]
    fn test_blank_lines_collapsed() {
        let nodes = vec![Node::new("A\n\n\n\nB"), Node::new("C")];

        let markdown = render_hierarchical(&nodes, &HierarchicalOptions::default(), None);
        assert_eq!(markdown, "A\n\nB\n\nC");
        assert!(!markdown.contains("\n\n\n"));
    }

    #[test]
    fn test_children_sorted_by_order() {
        let nodes = vec![Node::new("Top").with_children(vec![
            Node::new("second").with_order(2),
            Node::new("first").with_order(1),
        ])];

        assert_eq!(
            render_hierarchical(&nodes, &HierarchicalOptions::default(), None),
            "Top\n\n- first\n- second"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render_hierarchical(&[], &HierarchicalOptions::default(), None), "");
    }
}
