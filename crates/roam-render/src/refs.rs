//! Inline reference markers.
//!
//! A reference marker is `((id))` where `id` matches `[a-zA-Z0-9_-]*`.
//! Resolution is plain text substitution: each marker is replaced by the raw
//! text of the node it names. Substituted text may itself contain markers,
//! which are expanded on the next pass.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use roam_outline::{Node, RefIndex};

static REF_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\(([a-zA-Z0-9_-]*?)\)\)").unwrap());

/// Marker ids in order of appearance, duplicates included.
pub fn extract_reference_ids(text: &str) -> Vec<&str> {
    REF_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|id| id.as_str())
        .collect()
}

/// Replace reference markers with the referenced nodes' text.
///
/// Runs at most `depth` passes. Each pass replaces every marker whose id is in
/// `index` with that node's raw text. Resolution stops early when the text has
/// no markers left or when a pass finds none of its ids in the index, so
/// self-referencing or cyclic nodes terminate after `depth` passes at most.
///
/// Markers with unknown ids are left verbatim.
pub fn resolve_references(text: &str, index: &RefIndex<'_>, depth: usize) -> String {
    let mut resolved = text.to_owned();

    for pass in 0..depth {
        let ids = distinct_ids(&resolved);
        if ids.is_empty() {
            break;
        }

        let mut replaced_any = false;
        for id in &ids {
            if let Some(node) = index.get(id) {
                resolved = resolved.replace(&format!("(({id}))"), &node.text);
                replaced_any = true;
            }
        }

        if !replaced_any {
            tracing::trace!(pass, unresolved = ids.len(), "Reference resolution stalled");
            break;
        }
    }

    resolved
}

/// Marker ids in `text` that `index` cannot resolve.
pub fn unresolved_reference_ids(text: &str, index: &RefIndex<'_>) -> BTreeSet<String> {
    let mut unresolved = BTreeSet::new();
    push_unresolved(text, index, &mut unresolved);
    unresolved
}

/// Unresolvable marker ids across every node of every tree.
///
/// Only node text is scanned; attached refs are lookup material, not content.
/// Callers use this to decide which ids to fetch before a final render.
pub fn collect_unresolved_ids(nodes: &[Node], index: &RefIndex<'_>) -> BTreeSet<String> {
    let mut unresolved = BTreeSet::new();
    collect_into(nodes, index, &mut unresolved);
    unresolved
}

fn collect_into(nodes: &[Node], index: &RefIndex<'_>, unresolved: &mut BTreeSet<String>) {
    for node in nodes {
        push_unresolved(&node.text, index, unresolved);
        collect_into(&node.children, index, unresolved);
    }
}

fn push_unresolved(text: &str, index: &RefIndex<'_>, unresolved: &mut BTreeSet<String>) {
    for id in extract_reference_ids(text) {
        if !index.contains(id) {
            unresolved.insert(id.to_owned());
        }
    }
}

/// Distinct marker ids in order of first appearance.
pub(crate) fn distinct_ids(text: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for id in extract_reference_ids(text) {
        if !ids.iter().any(|seen| seen == id) {
            ids.push(id.to_owned());
        }
    }
    ids
}
