//! Options command implementation

use colored::Colorize;
use specgen_config::OptionSpec;
use specgen_extensions::{ExtensionRegistry, Resolver};

use crate::error::Result;

/// List every option declared by the built-in extensions.
pub fn run_options(json: bool) -> Result<()> {
    let registry = ExtensionRegistry::with_builtins()?;
    let schema = Resolver::new(&registry).schema()?;

    if json {
        println!("{}", serde_json::to_string_pretty(schema.namespaces())?);
        return Ok(());
    }

    for (i, namespace) in schema.namespaces().iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!(
            "{}  {}",
            format!("[{}]", namespace.name()).cyan().bold(),
            namespace.description()
        );
        let width = namespace
            .options()
            .iter()
            .map(|opt| opt.name.len())
            .max()
            .unwrap_or(0);
        for option in namespace.options() {
            println!(
                "  {:<width$}  {:<7}  {}  {}",
                option.name,
                option.option_type.to_string(),
                qualifier(option),
                option.description
            );
        }
    }
    Ok(())
}

fn qualifier(option: &OptionSpec) -> String {
    match (&option.default, option.required) {
        (_, true) => "required".yellow().to_string(),
        (Some(default), false) => format!("default: {default}").dimmed().to_string(),
        (None, false) => "optional".dimmed().to_string(),
    }
}
