//! Extensions command implementation

use colored::Colorize;
use serde_json::json;
use specgen_extensions::{Extension, ExtensionRegistry, Requirement, Resolver};

use crate::error::Result;

/// List the built-in extensions in the order they run.
pub fn run_extensions(json: bool) -> Result<()> {
    let registry = ExtensionRegistry::with_builtins()?;
    let order = Resolver::new(&registry).order()?;

    if json {
        let entries: Vec<_> = order
            .iter()
            .map(|ext| {
                json!({
                    "name": ext.name(),
                    "version": ext.version(),
                    "description": ext.description(),
                    "requires": ext.requirements().iter().map(|req| json!({
                        "extension": req.extension,
                        "constraint": constraint(req),
                    })).collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for ext in order {
        print_extension(ext);
    }
    Ok(())
}

fn print_extension(ext: &dyn Extension) {
    println!(
        "{} {}  {}",
        ext.name().cyan().bold(),
        format!("v{}", ext.version()).dimmed(),
        ext.description()
    );
    for req in ext.requirements() {
        println!(
            "   {} {} ({})",
            "requires".dimmed(),
            req.extension,
            constraint(&req)
        );
    }
}

fn constraint(req: &Requirement) -> &str {
    req.constraint.as_deref().unwrap_or("*")
}
