//! Outline node model for roam exports.
//!
//! An outline is a forest of [`Node`]s ("blocks"). Each node carries raw text
//! that may contain inline `((id))` reference markers pointing at other nodes.
//! This crate provides:
//!
//! - [`Node`]: the immutable input shape, decodable from outline-store JSON
//! - [`RefIndex`]: identifier-to-node lookup used to resolve reference markers
//! - [`parse_nodes`]: JSON entry point accepting a single node or an array
//!
//! Nothing here performs I/O. Callers fetch outline data elsewhere and hand the
//! materialized trees to the renderer.
//!
//! # Example
//!
//! ```
//! use roam_outline::{Node, RefIndex};
//!
//! let nodes = vec![
//!     Node::new("See ((abc))").with_id("root"),
//!     Node::new("Referenced text").with_id("abc"),
//! ];
//! let index = RefIndex::build(&nodes);
//! assert_eq!(index.get("abc").map(|n| n.text.as_str()), Some("Referenced text"));
//! ```

mod error;
mod index;
mod node;

pub use error::OutlineError;
pub use index::RefIndex;
pub use node::{Heading, Node, parse_nodes};
