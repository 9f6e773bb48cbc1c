//! Renderers turning a finished [`SpecDocument`] into text.

use std::fmt;

use crate::document::SpecDocument;

/// Tags the RPM renderer emits first, in this order.
pub const CANONICAL_TAG_ORDER: &[&str] = &[
    "Name",
    "Version",
    "Release",
    "Summary",
    "Group",
    "License",
    "Url",
    "Source0",
    "BuildRoot",
    "BuildArch",
];

/// Blocks the RPM renderer emits first, in this order.
pub const CANONICAL_BLOCK_ORDER: &[&str] = &["prep", "build", "install", "clean", "files", "changelog"];

/// Serializes a spec document.
pub trait Renderer {
    /// Write the rendered document to `out`.
    fn write(&self, spec: &SpecDocument, out: &mut dyn fmt::Write) -> fmt::Result;

    /// Render the document to a string.
    fn render(&self, spec: &SpecDocument) -> String {
        let mut out = String::new();
        // Writing into a String never fails.
        let _ = self.write(spec, &mut out);
        out
    }
}

/// Renders RPM spec-file text.
///
/// Tags come first as `Tag: value` lines, then each non-empty block as a
/// `%name` header followed by its lines verbatim, blocks separated by a blank
/// line. Tags and blocks named in the canonical order come first in that
/// order; the rest follow sorted by name.
#[derive(Debug, Clone)]
pub struct RpmSpecRenderer {
    tag_order: Vec<String>,
    block_order: Vec<String>,
}

impl RpmSpecRenderer {
    pub fn new() -> Self {
        Self {
            tag_order: CANONICAL_TAG_ORDER.iter().map(|s| s.to_string()).collect(),
            block_order: CANONICAL_BLOCK_ORDER.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replace the canonical tag order.
    pub fn with_tag_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag_order = order.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the canonical block order.
    pub fn with_block_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.block_order = order.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for RpmSpecRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for RpmSpecRenderer {
    fn write(&self, spec: &SpecDocument, out: &mut dyn fmt::Write) -> fmt::Result {
        let tags = ordered(&self.tag_order, spec.tags());
        for (name, value) in &tags {
            writeln!(out, "{name}: {value}")?;
        }

        let mut first = tags.is_empty();
        for (name, lines) in ordered(&self.block_order, spec.blocks()) {
            if lines.is_empty() {
                continue;
            }
            if !first {
                writeln!(out)?;
            }
            first = false;

            writeln!(out, "%{name}")?;
            for line in lines {
                writeln!(out, "{line}")?;
            }
        }

        Ok(())
    }
}

/// Sort entries by their position in `canonical`, unknown names last.
///
/// Input arrives sorted by name and the sort is stable, so unknown names stay
/// in name order.
fn ordered<'a, V>(canonical: &[String], entries: impl Iterator<Item = (&'a str, V)>) -> Vec<(&'a str, V)> {
    let mut entries: Vec<_> = entries.collect();
    entries.sort_by_key(|(name, _)| {
        canonical
            .iter()
            .position(|c| c == name)
            .unwrap_or(usize::MAX)
    });
    entries
}
