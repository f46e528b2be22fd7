//! CLI command implementations.

pub(crate) mod refs;
pub(crate) mod render;
pub(crate) mod show;

pub(crate) use refs::RefsArgs;
pub(crate) use render::RenderArgs;
pub(crate) use show::ShowArgs;
