//! Extensions compiled into specgen.

mod core_fields;

pub use core_fields::CoreExtension;

use crate::error::Result;
use crate::registry::ExtensionRegistry;

/// Register every built-in extension.
pub fn register_all(registry: &mut ExtensionRegistry) -> Result<()> {
    registry.register(CoreExtension)?;
    Ok(())
}
