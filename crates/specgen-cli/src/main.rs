//! specgen CLI
//!
//! Composes RPM spec files from the built-in extensions and a configuration
//! file.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {}", format!("error[{}]", e.category()).red().bold(), e);
            std::process::exit(e.exit_code());
        }
    }
}

/// Run the parsed command and return the process exit code.
fn run() -> Result<i32> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to initialize logging: {e}", "warning".yellow().bold());
    }
    tracing::debug!(command = ?cli.command, "starting");

    match cli.command {
        Commands::Generate {
            config,
            overrides,
            output,
            json,
        } => commands::run_generate(&config, &overrides, output.as_deref(), json).map(|()| 0),
        Commands::Diff {
            config,
            specfile,
            overrides,
        } => commands::run_diff(&config, &specfile, &overrides).map(|identical| if identical { 0 } else { 1 }),
        Commands::Extensions { json } => commands::run_extensions(json).map(|()| 0),
        Commands::Options { json } => commands::run_options(json).map(|()| 0),
    }
}
