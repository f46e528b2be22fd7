//! Markdown rendering of outline trees.
//!
//! Turns a forest of [`Node`]s into Markdown under one of two policies:
//!
//! - [`FlatRenderer`]: top-level nodes and their direct children become
//!   headings and paragraphs; everything deeper collapses into one bullet list
//!   per direct child, interrupted by code blocks.
//! - [`HierarchicalRenderer`]: full nesting is kept as indented bullets.
//!
//! Both resolve inline `((id))` reference markers against a [`RefIndex`] built
//! from the input (optionally merged with a caller-supplied index), decode
//! outline tables into GFM pipe tables, and never mutate their input.
//!
//! # Example
//!
//! ```
//! use roam_outline::Node;
//! use roam_render::{HierarchicalRenderer, render_flat};
//!
//! let nodes = vec![Node::new("Top").with_children(vec![
//!     Node::new("Child").with_children(vec![Node::new("Grandchild")]),
//! ])];
//!
//! let markdown = HierarchicalRenderer::new().render(&nodes);
//! assert_eq!(markdown, "Top\n\n- Child\n  - Grandchild");
//!
//! assert_eq!(render_flat(&nodes, None), "Top\n\nChild\n\n- Grandchild");
//! ```

mod classify;
mod flat;
mod hierarchical;
mod mode;
mod quote;
mod refs;
mod table;
mod util;

pub use classify::{NodeKind, TABLE_MARKER, classify};
pub use flat::{FlatRenderer, render_flat};
pub use hierarchical::{HierarchicalOptions, HierarchicalRenderer, render_hierarchical};
pub use mode::RenderMode;
pub use quote::{expand_references, format_reference_quote};
pub use refs::{
    collect_unresolved_ids, extract_reference_ids, resolve_references, unresolved_reference_ids,
};
pub use table::{Table, render_table};

pub use roam_outline::{Heading, Node, RefIndex};
