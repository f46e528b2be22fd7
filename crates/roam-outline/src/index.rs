//! Identifier-to-node lookup for reference resolution.

use std::collections::HashMap;

use crate::Node;

/// Maps node identifiers to the nodes they name.
///
/// Built by a pre-order walk over one or more trees. Each node's own id is
/// inserted first, then the ids of its attached refs, then its children in
/// input order. The first occurrence of an id wins: later duplicates, including
/// a stale attached copy of a primary node, are discarded.
///
/// The index only borrows nodes. Once built it is read-only, so a single index
/// can be shared across threads rendering independent trees.
#[derive(Clone, Debug, Default)]
pub struct RefIndex<'a> {
    nodes: HashMap<&'a str, &'a Node>,
}

impl<'a> RefIndex<'a> {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over a forest of trees.
    #[must_use]
    pub fn build(nodes: &'a [Node]) -> Self {
        let mut index = Self::new();
        index.extend(nodes);
        index
    }

    /// Merge a forest of trees into the index, keeping existing entries.
    pub fn extend(&mut self, nodes: &'a [Node]) {
        for node in nodes {
            self.insert(node);
            for attached in &node.attached_refs {
                self.insert(attached);
            }
            self.extend(&node.children);
        }
    }

    /// Insert a single node without visiting its children.
    ///
    /// Returns `true` if the node was added, `false` if it has no id or the id
    /// is already present.
    pub fn insert(&mut self, node: &'a Node) -> bool {
        let Some(id) = node.uid() else {
            return false;
        };
        if self.nodes.contains_key(id) {
            return false;
        }
        self.nodes.insert(id, node);
        true
    }

    /// Look up a node by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&'a Node> {
        self.nodes.get(id).copied()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
