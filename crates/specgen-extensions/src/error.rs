use crate::extension::BoxError;

/// Errors that can occur while registering, ordering or running extensions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An extension with the same name is already registered.
    #[error("extension '{name}' is already registered")]
    DuplicateExtension { name: String },

    /// Invalid extension name.
    #[error("invalid extension name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// Invalid semver version string.
    #[error("invalid version '{version}' for extension '{extension}': {source}")]
    InvalidVersion {
        extension: String,
        version: String,
        source: semver::Error,
    },

    /// Failed to parse a version constraint string.
    #[error("invalid version constraint '{constraint}': {reason}")]
    VersionConstraintParse { constraint: String, reason: String },

    /// A requirement names an extension that is not registered.
    #[error("extension '{extension}' requires unknown extension '{dependency}'")]
    UnknownDependency {
        extension: String,
        dependency: String,
    },

    /// A requirement's version constraint rejects the registered version.
    #[error(
        "extension '{extension}' requires '{dependency}' {constraint}, but version {found} is registered"
    )]
    IncompatibleDependency {
        extension: String,
        dependency: String,
        constraint: String,
        found: String,
    },

    /// Requirements form a cycle.
    #[error("dependency cycle among extensions: {}", .participants.join(", "))]
    DependencyCycle { participants: Vec<String> },

    /// An extension's `generate` failed; the run was aborted.
    #[error("extension '{extension}' failed: {source}")]
    ExtensionExecution {
        extension: String,
        #[source]
        source: BoxError,
    },

    /// Schema declaration or configuration validation failed.
    #[error(transparent)]
    Config(#[from] specgen_config::Error),
}

impl Error {
    /// Short name of the error category, used for reporting.
    pub fn category(&self) -> &'static str {
        match self {
            Error::DuplicateExtension { .. }
            | Error::InvalidName { .. }
            | Error::InvalidVersion { .. }
            | Error::VersionConstraintParse { .. } => "registration",
            Error::UnknownDependency { .. } => "unknown-dependency",
            Error::IncompatibleDependency { .. } => "incompatible-dependency",
            Error::DependencyCycle { .. } => "dependency-cycle",
            Error::ExtensionExecution { .. } => "extension-execution",
            Error::Config(e) => e.category(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
