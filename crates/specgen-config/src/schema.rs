//! Namespaced option declarations and validation.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::raw::RawConfig;
use crate::resolved::ResolvedConfig;
use crate::value::{OptionType, Value};

/// Declaration of a single configuration option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionSpec {
    /// Option name, unique within its namespace.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Declared type of the option.
    #[serde(rename = "type")]
    pub option_type: OptionType,
    /// Whether input must supply a value.
    pub required: bool,
    /// Value used when input supplies none.
    pub default: Option<Value>,
}

impl OptionSpec {
    fn new(name: impl Into<String>, description: impl Into<String>, option_type: OptionType) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            option_type,
            required: false,
            default: None,
        }
    }

    /// Declare an optional string option.
    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, OptionType::String)
    }

    /// Declare an optional integer option.
    pub fn integer(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, OptionType::Integer)
    }

    /// Declare an optional boolean option.
    pub fn boolean(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, OptionType::Boolean)
    }

    /// Mark the option as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the value used when input supplies none.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// A named group of related options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Namespace {
    name: String,
    description: String,
    options: Vec<OptionSpec>,
}

impl Namespace {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            options: Vec::new(),
        }
    }

    /// Add an option declaration. Options keep their declaration order.
    pub fn option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// Look up an option by name.
    pub fn get(&self, option: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.name == option)
    }

    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::InvalidOption {
                namespace: self.name.clone(),
                option: String::new(),
                reason: "namespace name must not be empty".to_string(),
            });
        }

        for (index, option) in self.options.iter().enumerate() {
            let invalid = |reason: String| Error::InvalidOption {
                namespace: self.name.clone(),
                option: option.name.clone(),
                reason,
            };

            if option.name.is_empty() {
                return Err(invalid("option name must not be empty".to_string()));
            }
            if self.options[..index].iter().any(|o| o.name == option.name) {
                return Err(Error::DuplicateOption {
                    namespace: self.name.clone(),
                    option: option.name.clone(),
                });
            }
            if let Some(default) = &option.default {
                if option.required {
                    return Err(invalid("a required option cannot declare a default".to_string()));
                }
                if default.option_type() != option.option_type {
                    return Err(invalid(format!(
                        "default {} does not match declared type {}",
                        default.option_type(),
                        option.option_type
                    )));
                }
            }
        }

        Ok(())
    }
}

/// The set of namespaces declared for one generation run.
#[derive(Debug, Clone, Default)]
pub struct ConfigSchema {
    namespaces: Vec<Namespace>,
}

impl ConfigSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a namespace.
    ///
    /// # Errors
    ///
    /// Returns `Error::SchemaConflict` if a namespace with the same name is
    /// already declared, and `Error::InvalidOption` or
    /// `Error::DuplicateOption` if the declaration is inconsistent.
    pub fn declare(&mut self, namespace: Namespace) -> Result<()> {
        if self.namespace(namespace.name()).is_some() {
            return Err(Error::SchemaConflict {
                namespace: namespace.name,
            });
        }
        namespace.validate()?;
        self.namespaces.push(namespace);
        Ok(())
    }

    /// Look up a declared namespace.
    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.iter().find(|ns| ns.name == name)
    }

    /// Declared namespaces in declaration order.
    pub fn namespaces(&self) -> &[Namespace] {
        &self.namespaces
    }

    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Validate raw input and apply defaults.
    ///
    /// Namespaces and options are checked in declaration order and the first
    /// problem is reported. Input for undeclared namespaces is ignored.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` naming the namespace and option when a
    /// required option has no value, a value cannot be coerced to the
    /// declared type, or input names an option the namespace does not
    /// declare.
    pub fn resolve(&self, raw: &RawConfig) -> Result<ResolvedConfig> {
        for name in raw.namespaces() {
            if self.namespace(name).is_none() {
                tracing::warn!(namespace = %name, "ignoring configuration for undeclared namespace");
            }
        }

        let mut resolved = BTreeMap::new();

        for namespace in &self.namespaces {
            let supplied = raw.namespace(namespace.name());
            let mut values = BTreeMap::new();

            for option in namespace.options() {
                let value = match supplied.and_then(|s| s.get(&option.name)) {
                    Some(raw_value) => option
                        .option_type
                        .coerce(raw_value)
                        .map_err(|reason| Error::validation(&namespace.name, &option.name, reason))?,
                    None => None,
                };

                match value.or_else(|| option.default.clone()) {
                    Some(value) => {
                        values.insert(option.name.clone(), value);
                    }
                    None if option.required => {
                        return Err(Error::validation(
                            &namespace.name,
                            &option.name,
                            "required option is missing",
                        ));
                    }
                    None => {}
                }
            }

            if let Some(supplied) = supplied {
                if let Some(unknown) = supplied.keys().find(|key| namespace.get(key).is_none()) {
                    return Err(Error::validation(&namespace.name, unknown, "unknown option"));
                }
            }

            tracing::debug!(namespace = %namespace.name, values = values.len(), "resolved namespace");
            resolved.insert(namespace.name.clone(), values);
        }

        Ok(ResolvedConfig::new(resolved))
    }
}
