//! Configuration schema and validation for specgen.
//!
//! Extensions declare typed, namespaced options through a [`ConfigSchema`].
//! Raw input gathered from files, the environment and command-line overrides
//! is collected into a [`RawConfig`] and validated by
//! [`ConfigSchema::resolve`] into an immutable [`ResolvedConfig`].
//!
//! # Example
//!
//! ```
//! use specgen_config::{ConfigSchema, Namespace, OptionSpec, RawConfig};
//!
//! let mut schema = ConfigSchema::new();
//! schema
//!     .declare(
//!         Namespace::new("core", "Common package metadata.")
//!             .option(OptionSpec::string("name", "Package name.").required())
//!             .option(OptionSpec::integer("release", "Release number.").with_default(1_i64)),
//!     )
//!     .unwrap();
//!
//! let mut raw = RawConfig::new();
//! raw.set("core", "name", "foo");
//!
//! let config = schema.resolve(&raw).unwrap();
//! assert_eq!(config.get_str("core", "name"), Some("foo"));
//! assert_eq!(config.get_int("core", "release"), Some(1));
//! ```

pub mod error;
pub mod raw;
pub mod resolved;
pub mod schema;
pub mod value;

pub use error::{Error, Result};
pub use raw::{ConfigFormat, RawConfig};
pub use resolved::ResolvedConfig;
pub use schema::{ConfigSchema, Namespace, OptionSpec};
pub use value::{OptionType, Value};
