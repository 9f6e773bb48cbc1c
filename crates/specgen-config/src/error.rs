//! Error types for specgen-config

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Two namespaces with the same name were declared.
    #[error("configuration namespace '{namespace}' is already declared")]
    SchemaConflict { namespace: String },

    /// An option name appears twice within one namespace.
    #[error("option '{option}' is declared twice in namespace '{namespace}'")]
    DuplicateOption { namespace: String, option: String },

    /// An option declaration is internally inconsistent.
    #[error("invalid declaration of '{namespace}.{option}': {reason}")]
    InvalidOption {
        namespace: String,
        option: String,
        reason: String,
    },

    /// A supplied value is missing, unknown or of the wrong type.
    #[error("invalid configuration for '{namespace}.{option}': {reason}")]
    Validation {
        namespace: String,
        option: String,
        reason: String,
    },

    /// A resolved namespace could not be read into a typed section.
    #[error("failed to read configuration namespace '{namespace}': {message}")]
    Section { namespace: String, message: String },

    /// Configuration input could not be parsed.
    #[error("failed to parse configuration from {origin}: {message}")]
    Parse { origin: String, message: String },

    /// The configuration file extension is not one of toml, json, yaml.
    #[error("unsupported configuration format: {origin}")]
    UnsupportedFormat { origin: String },

    /// A command-line override is not of the form `namespace.option=value`.
    #[error("invalid override '{input}': expected <namespace>.<option>=<value>")]
    InvalidOverride { input: String },

    /// Reading a configuration file failed.
    #[error("failed to read {origin}: {source}")]
    Io {
        origin: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Short name of the error category, used for reporting.
    pub fn category(&self) -> &'static str {
        match self {
            Error::SchemaConflict { .. } | Error::DuplicateOption { .. } => "schema-conflict",
            Error::InvalidOption { .. } => "schema",
            Error::Validation { .. } | Error::Section { .. } => "validation",
            Error::Parse { .. } | Error::UnsupportedFormat { .. } | Error::InvalidOverride { .. } => {
                "config-input"
            }
            Error::Io { .. } => "io",
        }
    }

    pub(crate) fn validation(
        namespace: impl Into<String>,
        option: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Validation {
            namespace: namespace.into(),
            option: option.into(),
            reason: reason.into(),
        }
    }
}
