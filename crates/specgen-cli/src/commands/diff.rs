//! Diff command implementation
//!
//! Compares an existing spec file with what `generate` would write.

use std::fs;
use std::path::Path;

use colored::Colorize;
use similar::TextDiff;
use specgen_document::{Renderer, RpmSpecRenderer};

use super::compose;
use crate::error::{CliError, Result};

/// Print a unified diff from `specfile` to freshly rendered output.
///
/// Returns `true` when the file is already up to date.
pub fn run_diff(config: &Path, specfile: &Path, overrides: &[String]) -> Result<bool> {
    let rendered = RpmSpecRenderer::new().render(&compose(config, overrides)?);
    let existing = fs::read_to_string(specfile).map_err(|source| CliError::Read {
        path: specfile.to_path_buf(),
        source,
    })?;

    if existing == rendered {
        println!(
            "{} {} is up to date",
            "OK".green().bold(),
            specfile.display()
        );
        return Ok(true);
    }

    let old_header = specfile.display().to_string();
    let diff = TextDiff::from_lines(&existing, &rendered);
    let unified = diff
        .unified_diff()
        .context_radius(3)
        .header(&old_header, "generated")
        .to_string();

    for line in unified.lines() {
        print_diff_line(line);
    }

    Ok(false)
}

fn print_diff_line(line: &str) {
    if line.starts_with("---") || line.starts_with("+++") {
        println!("{}", line.bold());
    } else if line.starts_with("@@") {
        println!("{}", line.cyan());
    } else if line.starts_with('+') {
        println!("{}", line.green());
    } else if line.starts_with('-') {
        println!("{}", line.red());
    } else {
        println!("{line}");
    }
}
