//! Node classification.

use roam_outline::{Heading, Node};

/// Text of a node whose children encode a table.
pub const TABLE_MARKER: &str = "{{[[table]]}}";

const CODE_FENCE: &str = "```";

/// How a node renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Table root: children are rows, see [`Table`](crate::Table).
    Table,
    /// Fenced code block, emitted verbatim.
    Code,
    /// ATX heading.
    Heading(Heading),
    /// Paragraph or bullet text.
    Plain,
}

/// Classify a node from its raw text and heading attribute.
///
/// Checked in order: table marker, code fence, heading, plain.
pub fn classify(node: &Node) -> NodeKind {
    let trimmed = node.text.trim();
    if trimmed == TABLE_MARKER {
        NodeKind::Table
    } else if trimmed.starts_with(CODE_FENCE) {
        NodeKind::Code
    } else if let Some(heading) = node.heading {
        NodeKind::Heading(heading)
    } else {
        NodeKind::Plain
    }
}

impl NodeKind {
    /// Decorate already-resolved text for this kind.
    ///
    /// Headings get their `#` prefix; everything else is returned as is.
    pub(crate) fn decorate(self, text: String) -> String {
        match self {
            Self::Heading(heading) => format!("{} {text}", heading.marker()),
            Self::Table | Self::Code | Self::Plain => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_table() {
        assert_eq!(classify(&Node::new("{{[[table]]}}")), NodeKind::Table);
        assert_eq!(classify(&Node::new("  {{[[table]]}}\n")), NodeKind::Table);
        assert_eq!(classify(&Node::new("{{[[table]]}} extra")), NodeKind::Plain);
    }

    #[test]
    fn test_classify_code() {
        assert_eq!(
            classify(&Node::new("```rust\nfn main() {}\n```")),
            NodeKind::Code
        );
        assert_eq!(classify(&Node::new("  ```")), NodeKind::Code);
        assert_eq!(classify(&Node::new("inline `code`")), NodeKind::Plain);
    }

    #[test]
    fn test_classify_heading() {
        assert_eq!(
            classify(&Node::new("Title").with_heading(Heading::H2)),
            NodeKind::Heading(Heading::H2)
        );
    }

    #[test]
    fn test_table_and_code_take_precedence_over_heading() {
        assert_eq!(
            classify(&Node::new("{{[[table]]}}").with_heading(Heading::H1)),
            NodeKind::Table
        );
        assert_eq!(
            classify(&Node::new("```sh").with_heading(Heading::H1)),
            NodeKind::Code
        );
    }

    #[test]
    fn test_classify_plain() {
        assert_eq!(classify(&Node::new("just text")), NodeKind::Plain);
        assert_eq!(classify(&Node::default()), NodeKind::Plain);
    }

    #[test]
    fn test_decorate() {
        assert_eq!(
            NodeKind::Heading(Heading::H3).decorate("Sub".to_owned()),
            "### Sub"
        );
        assert_eq!(NodeKind::Plain.decorate("text".to_owned()), "text");
    }
}
