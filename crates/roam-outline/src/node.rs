//! Outline node model.
//!
//! Nodes decode from the outline store's pull results, whose keys are
//! namespaced (`:block/uid`, `:block/string`, ...). Plain aliases (`uid`,
//! `text`, `children`, ...) are accepted as well so hand-written fixtures stay
//! readable. Decoding is lenient: missing or `null` fields take their defaults
//! and out-of-range heading levels are dropped.

use serde::{Deserialize, Deserializer};

use crate::OutlineError;

/// Heading level of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    H1,
    H2,
    H3,
}

impl Heading {
    /// Convert a raw heading attribute to a level.
    ///
    /// Returns `None` for anything outside 1..=3.
    #[must_use]
    pub fn from_level(level: i64) -> Option<Self> {
        match level {
            1 => Some(Self::H1),
            2 => Some(Self::H2),
            3 => Some(Self::H3),
            _ => None,
        }
    }

    /// Numeric level (1-3).
    #[must_use]
    pub fn level(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
        }
    }

    /// ATX heading prefix (`#`, `##` or `###`).
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Self::H1 => "#",
            Self::H2 => "##",
            Self::H3 => "###",
        }
    }
}

/// A single outline entry ("block").
///
/// Nodes are built once by whoever fetched the outline and are read-only
/// afterwards. Renderers never mutate them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Node {
    /// Identifier, unique within a document. Absent for placeholder nodes.
    #[serde(rename = ":block/uid", alias = "uid", alias = "id", default)]
    pub id: Option<String>,

    /// Raw text, possibly containing `((id))` reference markers.
    #[serde(
        rename = ":block/string",
        alias = "string",
        alias = "text",
        default,
        deserialize_with = "null_as_default"
    )]
    pub text: String,

    /// Heading level, `None` for plain text.
    #[serde(
        rename = ":block/heading",
        alias = "heading",
        default,
        deserialize_with = "heading_level"
    )]
    pub heading: Option<Heading>,

    /// Sort key among siblings.
    #[serde(
        rename = ":block/order",
        alias = "order",
        default,
        deserialize_with = "null_as_default"
    )]
    pub order: i64,

    /// Child nodes in input order (see [`Node::sorted_children`]).
    #[serde(
        rename = ":block/children",
        alias = "children",
        default,
        deserialize_with = "null_as_default"
    )]
    pub children: Vec<Node>,

    /// Referenced nodes the source already expanded alongside this node.
    #[serde(
        rename = ":block/refs",
        alias = "refs",
        default,
        deserialize_with = "null_as_default"
    )]
    pub attached_refs: Vec<Node>,
}

impl Node {
    /// Create an id-less node with the given text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_heading(mut self, heading: Heading) -> Self {
        self.heading = Some(heading);
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    #[must_use]
    pub fn with_attached_refs(mut self, refs: Vec<Node>) -> Self {
        self.attached_refs = refs;
        self
    }

    /// Identifier, treating an empty string like a missing one.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Direct children sorted by `order`.
    ///
    /// The sort is stable, so siblings sharing an order key keep input order.
    #[must_use]
    pub fn sorted_children(&self) -> Vec<&Node> {
        let mut children: Vec<&Node> = self.children.iter().collect();
        children.sort_by_key(|child| child.order);
        children
    }

    /// First child in sort order.
    #[must_use]
    pub fn first_child(&self) -> Option<&Node> {
        // min_by_key returns the first of equal minimums, matching the stable sort
        self.children.iter().min_by_key(|child| child.order)
    }
}

/// Parse an outline payload into top-level nodes.
///
/// Accepts either a JSON array of nodes or a single node object.
///
/// # Errors
///
/// Returns [`OutlineError::Json`] if the payload is not valid JSON or a field
/// has an incompatible type.
pub fn parse_nodes(json: &str) -> Result<Vec<Node>, OutlineError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let nodes = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    Ok(nodes)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn heading_level<'de, D>(deserializer: D) -> Result<Option<Heading>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_i64)
        .and_then(Heading::from_level))
}
