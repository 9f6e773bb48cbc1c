//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// specgen - Compose RPM spec files from extensions and configuration
#[derive(Parser, Debug)]
#[command(name = "specgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Render a spec file from a configuration file
    ///
    /// Values are layered: the file, then SPECGEN_<NAMESPACE>_<OPTION>
    /// environment variables, then --set overrides.
    ///
    /// Examples:
    ///   specgen generate rpm.toml
    ///   specgen generate rpm.toml --set core.release=3 -o foo.spec
    ///   specgen generate rpm.yaml --json
    Generate {
        /// Configuration file (.toml, .json, .yaml or .yml)
        config: PathBuf,

        /// Override a value, as <namespace>.<option>=<value>
        #[arg(long = "set", value_name = "NS.OPT=VALUE")]
        overrides: Vec<String>,

        /// Write the spec to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the spec document as JSON instead of spec text
        #[arg(long)]
        json: bool,
    },

    /// Compare an existing spec file with freshly generated output
    ///
    /// Exits 0 when they are identical and 1 when they differ.
    Diff {
        /// Configuration file (.toml, .json, .yaml or .yml)
        config: PathBuf,

        /// Existing spec file to compare against
        specfile: PathBuf,

        /// Override a value, as <namespace>.<option>=<value>
        #[arg(long = "set", value_name = "NS.OPT=VALUE")]
        overrides: Vec<String>,
    },

    /// List registered extensions in execution order
    Extensions {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List every configuration option the extensions declare
    Options {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
