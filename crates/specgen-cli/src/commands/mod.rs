//! Command implementations for specgen-cli

pub mod diff;
pub mod extensions;
pub mod generate;
pub mod options;

use std::path::Path;

use specgen_config::RawConfig;
use specgen_document::SpecDocument;
use specgen_extensions::{ExtensionRegistry, Resolver};

use crate::error::Result;

pub use diff::run_diff;
pub use extensions::run_extensions;
pub use generate::run_generate;
pub use options::run_options;

/// Prefix of environment variables that override configuration values.
pub const ENV_PREFIX: &str = "SPECGEN";

/// Load `config`, layer the environment and `overrides` on top, and compose
/// the spec document with the built-in extensions.
pub(crate) fn compose(config: &Path, overrides: &[String]) -> Result<SpecDocument> {
    let registry = ExtensionRegistry::with_builtins()?;
    let resolver = Resolver::new(&registry);
    let schema = resolver.schema()?;

    let mut raw = RawConfig::from_path(config)?;
    let from_env = raw.apply_env(&schema, ENV_PREFIX, unicode_env());
    for input in overrides {
        raw.set_override(input)?;
    }
    tracing::debug!(
        config = %config.display(),
        from_env,
        overrides = overrides.len(),
        "assembled configuration"
    );

    Ok(resolver.compose(&raw)?)
}

/// Environment variables whose name and value are valid Unicode. Others
/// cannot name a declared option and are skipped.
fn unicode_env() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os().filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
}
