//! Generate command implementation

use std::fs;
use std::path::Path;

use colored::Colorize;
use specgen_document::{Renderer, RpmSpecRenderer};

use super::compose;
use crate::error::{CliError, Result};

/// Render the spec for `config` to stdout or `output`.
///
/// With `json` the spec document itself is printed instead of spec text.
pub fn run_generate(config: &Path, overrides: &[String], output: Option<&Path>, json: bool) -> Result<()> {
    let spec = compose(config, overrides)?;

    let text = if json {
        let mut text = serde_json::to_string_pretty(&spec)?;
        text.push('\n');
        text
    } else {
        RpmSpecRenderer::new().render(&spec)
    };

    match output {
        Some(path) => {
            fs::write(path, &text).map_err(|source| CliError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            eprintln!(
                "{} Wrote {}",
                "=>".blue().bold(),
                path.display().to_string().cyan()
            );
        }
        None => print!("{text}"),
    }

    Ok(())
}
