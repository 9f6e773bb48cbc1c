//! The extension contract.

use specgen_config::{Namespace, ResolvedConfig};
use specgen_document::SpecDocument;

/// Error type returned by [`Extension::generate`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A dependency on another extension, optionally restricted to a version
/// range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Name of the extension that must run first.
    pub extension: String,
    /// Version constraint such as `>= 1.0.0, < 2.0.0`; `None` accepts any.
    pub constraint: Option<String>,
}

impl Requirement {
    /// Require `extension` at any version.
    pub fn any(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            constraint: None,
        }
    }

    /// Require `extension` at a version matching `constraint`.
    pub fn new(extension: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            constraint: Some(constraint.into()),
        }
    }
}

/// A unit contributing tags and block lines to the spec document.
///
/// Extensions are stateless. `generate` reads only the configuration
/// namespace the extension declares and must not assume any tag or block
/// exists unless it or one of its requirements wrote it. Optional values are
/// skipped when absent: an extension never writes an empty placeholder.
pub trait Extension: Send + Sync {
    /// Unique name within a registry.
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// Semantic version of the extension.
    fn version(&self) -> &str;

    /// Extensions that must have run before this one.
    fn requirements(&self) -> Vec<Requirement> {
        Vec::new()
    }

    /// Configuration namespace this extension reads, if any.
    fn namespace(&self) -> Option<Namespace> {
        None
    }

    /// Contribute to the document and hand it on.
    fn generate(&self, config: &ResolvedConfig, spec: SpecDocument) -> Result<SpecDocument, BoxError>;
}
