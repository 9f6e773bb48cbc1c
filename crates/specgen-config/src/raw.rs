//! Untyped configuration input.
//!
//! A [`RawConfig`] is assembled from layered sources before validation:
//!
//! ```text
//! config file (toml / json / yaml)
//!   < SPECGEN_<NAMESPACE>_<OPTION> environment variables
//!     < --set namespace.option=value overrides
//! ```
//!
//! Later layers replace values from earlier ones option by option.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::Value as RawValue;

use crate::error::{Error, Result};
use crate::schema::ConfigSchema;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "toml" => Some(ConfigFormat::Toml),
            "json" => Some(ConfigFormat::Json),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            _ => None,
        }
    }
}

/// Namespace → option → untyped value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawConfig {
    namespaces: BTreeMap<String, BTreeMap<String, RawValue>>,
}

impl RawConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration file, picking the parser from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let format = ConfigFormat::from_path(path).ok_or_else(|| Error::UnsupportedFormat {
            origin: origin.clone(),
        })?;
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            origin: origin.clone(),
            source,
        })?;
        tracing::debug!(path = %origin, ?format, "loading configuration file");
        Self::parse_with_origin(&content, format, &origin)
    }

    /// Parse configuration text in the given format.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        Self::parse_with_origin(content, format, "<input>")
    }

    fn parse_with_origin(content: &str, format: ConfigFormat, origin: &str) -> Result<Self> {
        let parse_err = |message: String| Error::Parse {
            origin: origin.to_string(),
            message,
        };

        let tree: RawValue = match format {
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string()))?,
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))?
            }
            ConfigFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string()))?
            }
        };

        Self::from_tree(tree).map_err(parse_err)
    }

    /// Build from a JSON-like tree whose top-level keys are namespaces.
    fn from_tree(tree: RawValue) -> std::result::Result<Self, String> {
        let top = match tree {
            RawValue::Null => return Ok(Self::new()),
            RawValue::Object(map) => map,
            _ => return Err("top level must be a table of namespaces".to_string()),
        };

        let mut config = Self::new();
        for (namespace, options) in top {
            match options {
                RawValue::Object(options) => {
                    let entry = config.namespaces.entry(namespace).or_default();
                    entry.extend(options);
                }
                RawValue::Null => {
                    config.namespaces.entry(namespace).or_default();
                }
                _ => return Err(format!("namespace '{namespace}' must be a table")),
            }
        }
        Ok(config)
    }

    /// Set a single value, replacing any previous one.
    pub fn set(
        &mut self,
        namespace: impl Into<String>,
        option: impl Into<String>,
        value: impl Into<RawValue>,
    ) {
        self.namespaces
            .entry(namespace.into())
            .or_default()
            .insert(option.into(), value.into());
    }

    /// Apply a `namespace.option=value` override. The value is kept as a
    /// string and coerced during validation.
    pub fn set_override(&mut self, input: &str) -> Result<()> {
        let invalid = || Error::InvalidOverride {
            input: input.to_string(),
        };

        let (key, value) = input.split_once('=').ok_or_else(invalid)?;
        let (namespace, option) = key.trim().split_once('.').ok_or_else(invalid)?;
        if namespace.is_empty() || option.is_empty() || option.contains('.') {
            return Err(invalid());
        }

        self.set(namespace, option, value);
        Ok(())
    }

    /// Apply `PREFIX_<NAMESPACE>_<OPTION>` variables for every option the
    /// schema declares. Matching is case-insensitive and `-` in declared
    /// names maps to `_`. When two options map to the same variable the
    /// first declared one receives it. Returns the number of values applied.
    pub fn apply_env<I, K, V>(&mut self, schema: &ConfigSchema, prefix: &str, vars: I) -> usize
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut known: BTreeMap<String, (&str, &str)> = BTreeMap::new();
        for namespace in schema.namespaces() {
            for option in namespace.options() {
                let key = format!("{prefix}_{}_{}", namespace.name(), option.name)
                    .replace('-', "_")
                    .to_uppercase();
                if let Some((taken_ns, taken_opt)) = known.get(&key) {
                    tracing::warn!(
                        variable = %key,
                        kept = %format!("{taken_ns}.{taken_opt}"),
                        ignored = %format!("{}.{}", namespace.name(), option.name),
                        "environment variable maps to two options; keeping the first declared"
                    );
                    continue;
                }
                known.insert(key, (namespace.name(), option.name.as_str()));
            }
        }

        let mut applied = 0;
        for (key, value) in vars {
            if let Some((namespace, option)) = known.get(&key.as_ref().to_uppercase()) {
                tracing::debug!(variable = key.as_ref(), "applying environment override");
                let value: String = value.into();
                self.set(*namespace, *option, value);
                applied += 1;
            }
        }
        applied
    }

    /// Overlay `other` on top of this configuration.
    pub fn merge(&mut self, other: RawConfig) {
        for (namespace, options) in other.namespaces {
            self.namespaces.entry(namespace).or_default().extend(options);
        }
    }

    /// Supplied values for a namespace.
    pub fn namespace(&self, name: &str) -> Option<&BTreeMap<String, RawValue>> {
        self.namespaces.get(name)
    }

    /// Names of all namespaces present in the input.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.keys().map(String::as_str)
    }

    pub fn get(&self, namespace: &str, option: &str) -> Option<&RawValue> {
        self.namespaces.get(namespace)?.get(option)
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}
