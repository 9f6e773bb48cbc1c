//! Composition of registered extensions into one spec document.
//!
//! ```text
//! resolve order ──▶ build schema ──▶ validate config ──▶ generate (in order)
//! ```
//!
//! Every check happens before the first `generate` call, and the first
//! failing extension aborts the run. No partial document is returned.

use specgen_config::{ConfigSchema, RawConfig, ResolvedConfig};
use specgen_document::SpecDocument;

use crate::error::{Error, Result};
use crate::extension::Extension;
use crate::registry::ExtensionRegistry;

/// Orders and runs the extensions of a registry.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    registry: &'a ExtensionRegistry,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a ExtensionRegistry) -> Self {
        Self { registry }
    }

    /// Extensions in execution order.
    pub fn order(&self) -> Result<Vec<&'a dyn Extension>> {
        self.registry.resolve_order()
    }

    /// Configuration schema made of every extension's namespace, in
    /// registration order.
    ///
    /// # Errors
    ///
    /// `Error::Config` wrapping `SchemaConflict` when two extensions declare
    /// the same namespace.
    pub fn schema(&self) -> Result<ConfigSchema> {
        let mut schema = ConfigSchema::new();
        for extension in self.registry.iter() {
            if let Some(namespace) = extension.namespace() {
                tracing::debug!(
                    extension = extension.name(),
                    namespace = namespace.name(),
                    "declaring configuration namespace"
                );
                schema.declare(namespace)?;
            }
        }
        Ok(schema)
    }

    /// Run every extension in dependency order against validated
    /// configuration.
    pub fn run(&self, config: &ResolvedConfig) -> Result<SpecDocument> {
        let order = self.order()?;
        run_ordered(&order, config)
    }

    /// Validate raw input and run every extension.
    pub fn compose(&self, raw: &RawConfig) -> Result<SpecDocument> {
        let order = self.order()?;
        let config = self.schema()?.resolve(raw)?;
        run_ordered(&order, &config)
    }
}

fn run_ordered(order: &[&dyn Extension], config: &ResolvedConfig) -> Result<SpecDocument> {
    let mut spec = SpecDocument::new();

    for extension in order {
        tracing::debug!(
            extension = extension.name(),
            version = extension.version(),
            "running extension"
        );
        spec = extension
            .generate(config, spec)
            .map_err(|source| Error::ExtensionExecution {
                extension: extension.name().to_string(),
                source,
            })?;
    }

    tracing::info!(
        extensions = order.len(),
        tags = spec.tags().count(),
        blocks = spec.blocks().count(),
        "composed spec document"
    );
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use specgen_config::{Namespace, OptionSpec};

    use crate::extension::{BoxError, Requirement};

    /// Appends its own name to the `build` block.
    struct Marker {
        name: &'static str,
        requires: Vec<&'static str>,
        calls: &'static AtomicUsize,
    }

    impl Extension for Marker {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "marker"
        }

        fn version(&self) -> &str {
            "0.1.0"
        }

        fn requirements(&self) -> Vec<Requirement> {
            self.requires.iter().map(|r| Requirement::any(*r)).collect()
        }

        fn generate(&self, _config: &ResolvedConfig, mut spec: SpecDocument) -> std::result::Result<SpecDocument, BoxError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            spec.append_block("build", self.name);
            Ok(spec)
        }
    }

    struct Failing;

    impl Extension for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn description(&self) -> &str {
            "always fails"
        }

        fn version(&self) -> &str {
            "1.0.0"
        }

        fn generate(&self, _config: &ResolvedConfig, _spec: SpecDocument) -> std::result::Result<SpecDocument, BoxError> {
            Err("disk on fire".into())
        }
    }

    /// Declares a namespace named after itself.
    struct Configured(&'static str, &'static str);

    impl Extension for Configured {
        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "configured"
        }

        fn version(&self) -> &str {
            "1.0.0"
        }

        fn namespace(&self) -> Option<Namespace> {
            Some(Namespace::new(self.1, "").option(OptionSpec::string("value", "").required()))
        }

        fn generate(&self, config: &ResolvedConfig, mut spec: SpecDocument) -> std::result::Result<SpecDocument, BoxError> {
            if let Some(value) = config.get_str(self.1, "value") {
                spec.set_tag(self.0, value);
            }
            Ok(spec)
        }
    }

    fn leak_counter() -> &'static AtomicUsize {
        Box::leak(Box::new(AtomicUsize::new(0)))
    }

    #[test]
    fn test_run_threads_document_in_order() {
        let calls = leak_counter();
        let mut registry = ExtensionRegistry::new();
        registry
            .register(Marker { name: "late", requires: vec!["early"], calls })
            .unwrap();
        registry
            .register(Marker { name: "early", requires: vec![], calls })
            .unwrap();

        let spec = Resolver::new(&registry).run(&ResolvedConfig::default()).unwrap();
        assert_eq!(spec.block("build"), ["early", "late"]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_cycle_prevents_any_generate() {
        let calls = leak_counter();
        let mut registry = ExtensionRegistry::new();
        registry
            .register(Marker { name: "free", requires: vec![], calls })
            .unwrap();
        registry
            .register(Marker { name: "a", requires: vec!["b"], calls })
            .unwrap();
        registry
            .register(Marker { name: "b", requires: vec!["a"], calls })
            .unwrap();

        let err = Resolver::new(&registry).compose(&RawConfig::new()).unwrap_err();
        assert!(matches!(err, Error::DependencyCycle { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_extension_failure_names_extension() {
        let calls = leak_counter();
        let mut registry = ExtensionRegistry::new();
        registry
            .register(Marker { name: "first", requires: vec![], calls })
            .unwrap();
        registry.register(Failing).unwrap();
        registry
            .register(Marker { name: "last", requires: vec![], calls })
            .unwrap();

        let err = Resolver::new(&registry).run(&ResolvedConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), "extension 'failing' failed: disk on fire");
        assert_eq!(err.category(), "extension-execution");
        assert_eq!(calls.load(Ordering::SeqCst), 1, "nothing runs after a failure");
    }

    #[test]
    fn test_schema_collects_namespaces() {
        let mut registry = ExtensionRegistry::new();
        registry.register(Configured("one", "first")).unwrap();
        registry.register(Configured("two", "second")).unwrap();

        let schema = Resolver::new(&registry).schema().unwrap();
        let names: Vec<&str> = schema.namespaces().iter().map(|ns| ns.name()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_shared_namespace_is_schema_conflict() {
        let mut registry = ExtensionRegistry::new();
        registry.register(Configured("one", "shared")).unwrap();
        registry.register(Configured("two", "shared")).unwrap();

        let err = Resolver::new(&registry).schema().unwrap_err();
        assert!(matches!(
            err,
            Error::Config(specgen_config::Error::SchemaConflict { ref namespace }) if namespace == "shared"
        ));
        assert_eq!(err.category(), "schema-conflict");
    }

    #[test]
    fn test_compose_validates_before_generate() {
        static SEEN: Mutex<Vec<&'static str>> = Mutex::new(Vec::new());

        struct Recording;

        impl Extension for Recording {
            fn name(&self) -> &str {
                "recording"
            }

            fn description(&self) -> &str {
                ""
            }

            fn version(&self) -> &str {
                "1.0.0"
            }

            fn generate(&self, _config: &ResolvedConfig, spec: SpecDocument) -> std::result::Result<SpecDocument, BoxError> {
                SEEN.lock().unwrap().push("recording");
                Ok(spec)
            }
        }

        let mut registry = ExtensionRegistry::new();
        registry.register(Recording).unwrap();
        registry.register(Configured("one", "first")).unwrap();

        let err = Resolver::new(&registry).compose(&RawConfig::new()).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(specgen_config::Error::Validation { ref option, .. }) if option == "value"
        ));
        assert!(SEEN.lock().unwrap().is_empty());

        let mut raw = RawConfig::new();
        raw.set("first", "value", "hello");
        let spec = Resolver::new(&registry).compose(&raw).unwrap();
        assert_eq!(spec.tag("one"), Some("hello"));
        assert_eq!(*SEEN.lock().unwrap(), vec!["recording"]);
    }
}
