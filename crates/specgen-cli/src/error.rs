//! Error types for specgen-cli

use std::path::PathBuf;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from specgen-config
    #[error(transparent)]
    Config(#[from] specgen_config::Error),

    /// Error from specgen-extensions
    #[error(transparent)]
    Extensions(#[from] specgen_extensions::Error),

    /// Writing output failed
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading an existing spec file failed
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Category printed in `error[<category>]`.
    pub fn category(&self) -> &'static str {
        match self {
            CliError::Config(e) => e.category(),
            CliError::Extensions(e) => e.category(),
            CliError::Write { .. } | CliError::Read { .. } => "io",
            CliError::Json(_) => "output",
        }
    }

    /// Process exit code for this error.
    ///
    /// Configuration problems exit 2, registry and dependency problems 3,
    /// extension failures 4, everything else 1.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            "validation" | "config-input" | "schema" => 2,
            "schema-conflict" | "registration" | "unknown-dependency" | "incompatible-dependency"
            | "dependency-cycle" => 3,
            "extension-execution" => 4,
            _ => 1,
        }
    }
}
