//! Spec document model for specgen.
//!
//! A [`SpecDocument`] is the single artifact every extension contributes to
//! during a generation run: named tags with one value each, and named blocks
//! holding ordered lines. A [`Renderer`] turns the finished document into
//! text.

pub mod document;
pub mod render;

pub use document::SpecDocument;
pub use render::{Renderer, RpmSpecRenderer};
