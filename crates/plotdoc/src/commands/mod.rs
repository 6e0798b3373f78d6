//! CLI command implementations.

pub(crate) mod directives;
pub(crate) mod render;

pub(crate) use render::RenderArgs;
