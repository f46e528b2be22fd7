//! Rendering policy selection.

/// Which renderer to use for a document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RenderMode {
    /// [`FlatRenderer`](crate::FlatRenderer): shallow prose, flat bullet appendix.
    Flat,
    /// [`HierarchicalRenderer`](crate::HierarchicalRenderer): nested bullets.
    #[default]
    Hierarchical,
}

impl RenderMode {
    /// Name as used in configuration files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Hierarchical => "hierarchical",
        }
    }
}
