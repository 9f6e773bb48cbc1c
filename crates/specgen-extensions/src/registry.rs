//! Static registry of compiled-in extensions.

use std::collections::HashMap;

use crate::builtins;
use crate::dependency::DependencyGraph;
use crate::error::{Error, Result};
use crate::extension::{Extension, Requirement};
use crate::version::VersionConstraint;

/// A registered extension with its metadata validated.
struct Entry {
    extension: Box<dyn Extension>,
    version: semver::Version,
    requirements: Vec<(Requirement, VersionConstraint)>,
}

/// Catalog of extensions available to a generation run.
///
/// Registration order is remembered and used to break ties when ordering
/// extensions that have no dependency between them.
#[derive(Default)]
pub struct ExtensionRegistry {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl ExtensionRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry populated with the built-in extensions.
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        builtins::register_all(&mut registry)?;
        Ok(registry)
    }

    /// Register an extension.
    ///
    /// # Errors
    ///
    /// Fails if the name is taken or malformed, the version is not valid
    /// semver, or a requirement's version constraint does not parse.
    pub fn register(&mut self, extension: impl Extension + 'static) -> Result<()> {
        self.register_boxed(Box::new(extension))
    }

    /// Register an already boxed extension.
    pub fn register_boxed(&mut self, extension: Box<dyn Extension>) -> Result<()> {
        let name = extension.name().to_string();
        validate_name(&name)?;
        if self.index.contains_key(&name) {
            return Err(Error::DuplicateExtension { name });
        }

        let version = semver::Version::parse(extension.version()).map_err(|source| Error::InvalidVersion {
            extension: name.clone(),
            version: extension.version().to_string(),
            source,
        })?;

        let requirements = extension
            .requirements()
            .into_iter()
            .map(|req| -> Result<(Requirement, VersionConstraint)> {
                let constraint = match &req.constraint {
                    Some(c) => VersionConstraint::parse(c)?,
                    None => VersionConstraint::any(),
                };
                Ok((req, constraint))
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(extension = %name, %version, "registered extension");
        self.index.insert(name, self.entries.len());
        self.entries.push(Entry {
            extension,
            version,
            requirements,
        });
        Ok(())
    }

    /// Look up an extension by name.
    pub fn get(&self, name: &str) -> Option<&dyn Extension> {
        self.index.get(name).map(|&i| self.entries[i].extension.as_ref())
    }

    /// The parsed version of a registered extension.
    pub fn version_of(&self, name: &str) -> Option<&semver::Version> {
        self.index.get(name).map(|&i| &self.entries[i].version)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Registered extensions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Extension> {
        self.entries.iter().map(|e| e.extension.as_ref())
    }

    /// Registered extension names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|e| e.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the requirement graph, checking every requirement exists and
    /// accepts the registered version.
    pub fn dependency_graph(&self) -> Result<DependencyGraph> {
        let mut graph = DependencyGraph::new();
        for entry in &self.entries {
            graph.add_node(entry.extension.name());
        }

        for entry in &self.entries {
            let name = entry.extension.name();
            for (requirement, constraint) in &entry.requirements {
                let dependency = requirement.extension.as_str();
                let found = self.version_of(dependency).ok_or_else(|| Error::UnknownDependency {
                    extension: name.to_string(),
                    dependency: dependency.to_string(),
                })?;
                if !constraint.satisfies_version(found) {
                    return Err(Error::IncompatibleDependency {
                        extension: name.to_string(),
                        dependency: dependency.to_string(),
                        constraint: constraint.to_string(),
                        found: found.to_string(),
                    });
                }
                graph.add_edge(name, dependency);
            }
        }

        Ok(graph)
    }

    /// Order extensions so each runs after everything it requires.
    ///
    /// Extensions with no ordering constraint between them keep their
    /// registration order.
    ///
    /// # Errors
    ///
    /// `Error::UnknownDependency`, `Error::IncompatibleDependency` or
    /// `Error::DependencyCycle`.
    pub fn resolve_order(&self) -> Result<Vec<&dyn Extension>> {
        let graph = self.dependency_graph()?;
        let order = graph.topological_sort()?;
        tracing::debug!(order = ?order, "resolved extension order");

        Ok(order
            .into_iter()
            .filter_map(|name| self.get(name))
            .collect())
    }
}

impl std::fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("extensions", &self.names())
            .finish()
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidName {
            name: name.to_string(),
            reason: "extension name must not be empty".to_string(),
        });
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::InvalidName {
            name: name.to_string(),
            reason: "extension name must contain only alphanumeric characters, hyphens, or underscores"
                .to_string(),
        });
    }
    Ok(())
}
