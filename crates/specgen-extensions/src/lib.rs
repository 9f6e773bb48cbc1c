//! Extension system for specgen.
//!
//! Extensions contribute tags and block lines to a shared
//! [`SpecDocument`](specgen_document::SpecDocument). This crate provides the
//! [`Extension`] trait, a static [`ExtensionRegistry`], dependency ordering
//! between extensions, and the [`Resolver`] that validates configuration and
//! threads one document through every extension in order.
//!
//! # Example
//!
//! ```
//! use specgen_config::RawConfig;
//! use specgen_extensions::{ExtensionRegistry, Resolver};
//!
//! let registry = ExtensionRegistry::with_builtins().unwrap();
//!
//! let mut raw = RawConfig::new();
//! raw.set("core", "name", "foo");
//! raw.set("core", "version", "1.0");
//!
//! let spec = Resolver::new(&registry).compose(&raw).unwrap();
//! assert_eq!(spec.tag("Name"), Some("foo"));
//! assert_eq!(spec.tag("Release"), Some("1%{?dist}"));
//! ```

pub mod builtins;
pub mod dependency;
pub mod error;
pub mod extension;
pub mod registry;
pub mod resolver;
pub mod version;

pub use builtins::CoreExtension;
pub use error::{Error, Result};
pub use extension::{BoxError, Extension, Requirement};
pub use registry::ExtensionRegistry;
pub use resolver::Resolver;
pub use version::VersionConstraint;
