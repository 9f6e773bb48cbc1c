//! Option types and typed configuration values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The declared type of a configuration option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    String,
    Integer,
    Boolean,
}

impl OptionType {
    /// Coerce an untyped input value into a value of this type.
    ///
    /// Returns `Ok(None)` for `null`, which counts as "not supplied".
    /// The error string describes why coercion failed.
    pub fn coerce(self, raw: &serde_json::Value) -> Result<Option<Value>, String> {
        use serde_json::Value as Raw;

        let value = match (self, raw) {
            (_, Raw::Null) => return Ok(None),

            (OptionType::String, Raw::String(s)) => Value::String(s.clone()),
            (OptionType::String, Raw::Number(n)) => Value::String(n.to_string()),

            (OptionType::Integer, Raw::Number(n)) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => return Err(format!("expected an integer, got {n}")),
            },
            (OptionType::Integer, Raw::String(s)) => match s.trim().parse::<i64>() {
                Ok(i) => Value::Integer(i),
                Err(_) => return Err(format!("expected an integer, got \"{s}\"")),
            },

            (OptionType::Boolean, Raw::Bool(b)) => Value::Boolean(*b),
            (OptionType::Boolean, Raw::String(s)) => match parse_bool(s) {
                Some(b) => Value::Boolean(b),
                None => return Err(format!("expected a boolean, got \"{s}\"")),
            },

            (ty, other) => {
                return Err(format!("expected {}, got {}", ty.article(), describe(other)));
            }
        };

        Ok(Some(value))
    }

    fn article(self) -> &'static str {
        match self {
            OptionType::String => "a string",
            OptionType::Integer => "an integer",
            OptionType::Boolean => "a boolean",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::String => write!(f, "string"),
            OptionType::Integer => write!(f, "integer"),
            OptionType::Boolean => write!(f, "boolean"),
        }
    }
}

impl FromStr for OptionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" | "str" => Ok(OptionType::String),
            "integer" | "int" => Ok(OptionType::Integer),
            "boolean" | "bool" => Ok(OptionType::Boolean),
            _ => Err(format!("unknown option type: {s}")),
        }
    }
}

/// A concrete, typed configuration value.
///
/// Serializes untagged, so a resolved namespace can be deserialized straight
/// into a typed struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    String(String),
}

impl Value {
    /// The option type this value satisfies.
    pub fn option_type(&self) -> OptionType {
        match self {
            Value::Boolean(_) => OptionType::Boolean,
            Value::Integer(_) => OptionType::Integer,
            Value::String(_) => OptionType::String,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn describe(raw: &serde_json::Value) -> &'static str {
    match raw {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "a table",
    }
}
