//! Blockquote rendering of referenced nodes.
//!
//! Used when a single node is shown on its own: instead of splicing referenced
//! text inline, each reference is appended below as a quote that also lists
//! the referenced node's children and grandchildren.

use std::fmt::Write;

use roam_outline::{Node, RefIndex};

use crate::refs::distinct_ids;

/// Format a referenced node as a Markdown blockquote.
///
/// Children and grandchildren are listed as nested items; deeper levels are
/// omitted. A missing node renders a `[not found]` placeholder.
pub fn format_reference_quote(id: &str, node: Option<&Node>) -> String {
    let Some(node) = node else {
        return format!("> **((_{id}_))**: _[not found]_");
    };

    let mut output = format!("> **((_{id}_))**: {}", node.text);
    for child in node.sorted_children() {
        let _ = write!(output, "\n>   - {}", child.text);
        for grandchild in child.sorted_children() {
            let _ = write!(output, "\n>     - {}", grandchild.text);
        }
    }
    output
}

/// Append a quote for every resolvable reference in `text`.
///
/// Quotes follow the text after a blank line, one per distinct id in order of
/// first appearance. Text without resolvable references is returned unchanged.
pub fn expand_references(text: &str, index: &RefIndex<'_>) -> String {
    let quotes: Vec<String> = distinct_ids(text)
        .iter()
        .filter_map(|id| {
            index
                .get(id)
                .map(|node| format_reference_quote(id, Some(node)))
        })
        .collect();

    if quotes.is_empty() {
        return text.to_owned();
    }
    format!("{text}\n\n{}", quotes.join("\n\n"))
}
