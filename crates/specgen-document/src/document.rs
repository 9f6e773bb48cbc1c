//! The shared spec document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Tags and blocks assembled by extensions.
///
/// Tags are looked up by exact, case-sensitive name and the last write wins.
/// Blocks are append-only: lines keep the order in which they were appended
/// and nothing is ever removed.
///
/// # Example
///
/// ```
/// use specgen_document::SpecDocument;
///
/// let mut spec = SpecDocument::new();
/// spec.set_tag("Name", "foo");
/// spec.append_block("prep", "rm -rf %{buildroot}/*");
/// spec.append_block("prep", "mkdir -p %{buildroot}");
///
/// assert_eq!(spec.tag("Name"), Some("foo"));
/// assert_eq!(spec.tag("name"), None);
/// assert_eq!(spec.block("prep"), ["rm -rf %{buildroot}/*", "mkdir -p %{buildroot}"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecDocument {
    #[serde(default)]
    tags: BTreeMap<String, String>,
    #[serde(default)]
    blocks: BTreeMap<String, Vec<String>>,
}

impl SpecDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a tag, returning the value it replaced.
    pub fn set_tag(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.tags.insert(name.into(), value.into())
    }

    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags.get(name).map(String::as_str)
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// All tags, ordered by name.
    pub fn tags(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tags.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Append a line to a block, creating the block if needed.
    pub fn append_block(&mut self, name: impl Into<String>, line: impl Into<String>) {
        self.blocks.entry(name.into()).or_default().push(line.into());
    }

    /// Append several lines to a block in order.
    pub fn extend_block<I, S>(&mut self, name: impl Into<String>, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocks
            .entry(name.into())
            .or_default()
            .extend(lines.into_iter().map(Into::into));
    }

    /// Lines of a block; empty when the block does not exist.
    pub fn block(&self, name: &str) -> &[String] {
        self.blocks.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has_block(&self, name: &str) -> bool {
        self.blocks.contains_key(name)
    }

    /// All blocks, ordered by name.
    pub fn blocks(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.blocks.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_is_empty() {
        let spec = SpecDocument::new();
        assert!(spec.is_empty());
        assert_eq!(spec.tags().count(), 0);
        assert!(spec.block("prep").is_empty());
        assert!(!spec.has_block("prep"));
    }

    #[test]
    fn test_set_tag_last_writer_wins() {
        let mut spec = SpecDocument::new();
        assert_eq!(spec.set_tag("Version", "1.0"), None);
        assert_eq!(spec.set_tag("Version", "2.0"), Some("1.0".to_string()));
        assert_eq!(spec.tag("Version"), Some("2.0"));
        assert_eq!(spec.tags().count(), 1);
    }

    #[test]
    fn test_tag_lookup_is_case_sensitive() {
        let mut spec = SpecDocument::new();
        spec.set_tag("Url", "https://example.com");
        assert!(spec.has_tag("Url"));
        assert!(!spec.has_tag("URL"));
        assert_eq!(spec.tag("url"), None);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut spec = SpecDocument::new();
        spec.append_block("install", "one");
        spec.append_block("clean", "other");
        spec.append_block("install", "two");
        spec.extend_block("install", ["three", "four"]);

        assert_eq!(spec.block("install"), ["one", "two", "three", "four"]);
        assert_eq!(spec.block("clean"), ["other"]);
    }

    #[test]
    fn test_blocks_iterate_by_name() {
        let mut spec = SpecDocument::new();
        spec.append_block("prep", "a");
        spec.append_block("clean", "b");
        let names: Vec<&str> = spec.blocks().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["clean", "prep"]);
    }

    #[test]
    fn test_json_shape() {
        let mut spec = SpecDocument::new();
        spec.set_tag("Name", "foo");
        spec.append_block("prep", "rm -rf %{buildroot}/*");

        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "tags": {"Name": "foo"},
                "blocks": {"prep": ["rm -rf %{buildroot}/*"]}
            })
        );
        let back: SpecDocument = serde_json::from_value(json).unwrap();
        assert_eq!(back, spec);
    }
}
