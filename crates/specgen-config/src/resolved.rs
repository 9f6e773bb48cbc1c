//! Validated, read-only configuration.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::value::Value;

/// Namespace → option → typed value, with defaults applied.
///
/// Only [`ConfigSchema::resolve`](crate::ConfigSchema::resolve) constructs
/// one, so every value present has already passed type validation and every
/// required option is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedConfig {
    namespaces: BTreeMap<String, BTreeMap<String, Value>>,
}

impl ResolvedConfig {
    pub(crate) fn new(namespaces: BTreeMap<String, BTreeMap<String, Value>>) -> Self {
        Self { namespaces }
    }

    pub fn get(&self, namespace: &str, option: &str) -> Option<&Value> {
        self.namespaces.get(namespace)?.get(option)
    }

    pub fn get_str(&self, namespace: &str, option: &str) -> Option<&str> {
        self.get(namespace, option)?.as_str()
    }

    pub fn get_int(&self, namespace: &str, option: &str) -> Option<i64> {
        self.get(namespace, option)?.as_int()
    }

    pub fn get_bool(&self, namespace: &str, option: &str) -> Option<bool> {
        self.get(namespace, option)?.as_bool()
    }

    /// All resolved values of a namespace.
    pub fn namespace(&self, namespace: &str) -> Option<&BTreeMap<String, Value>> {
        self.namespaces.get(namespace)
    }

    /// Read a whole namespace into a typed struct.
    ///
    /// An undeclared namespace reads as an empty table, so a struct made only
    /// of `Option` fields still deserializes.
    ///
    /// ```
    /// # use specgen_config::{ConfigSchema, Namespace, OptionSpec, RawConfig};
    /// #[derive(serde::Deserialize)]
    /// struct Core {
    ///     name: String,
    ///     summary: Option<String>,
    /// }
    ///
    /// let mut schema = ConfigSchema::new();
    /// schema
    ///     .declare(
    ///         Namespace::new("core", "")
    ///             .option(OptionSpec::string("name", "").required())
    ///             .option(OptionSpec::string("summary", "")),
    ///     )
    ///     .unwrap();
    /// let mut raw = RawConfig::new();
    /// raw.set("core", "name", "foo");
    ///
    /// let core: Core = schema.resolve(&raw).unwrap().section("core").unwrap();
    /// assert_eq!(core.name, "foo");
    /// assert!(core.summary.is_none());
    /// ```
    pub fn section<T: DeserializeOwned>(&self, namespace: &str) -> Result<T> {
        let table = match self.namespaces.get(namespace) {
            Some(values) => serde_json::to_value(values),
            None => Ok(serde_json::Value::Object(serde_json::Map::new())),
        };

        table
            .and_then(serde_json::from_value)
            .map_err(|e| Error::Section {
                namespace: namespace.to_string(),
                message: e.to_string(),
            })
    }
}
