//! Flat parameter tables for emitter configuration.
//!
//! The legacy emitter format is a flat dictionary of string keys to typed
//! scalar values. An external front-end (such as the built-in
//! [`plist`](crate::plist) reader) produces a [`ParamTable`]; the
//! configuration contract in [`config`](crate::config) then maps it onto an
//! emitter, failing fast on any missing key.
//!
//! # Example
//!
//! ```ignore
//! let mut table = ParamTable::new();
//! table.insert("maxParticles", Value::Int(64));
//! table.insert("particleLifespan", Value::Float(1.5));
//! table.insert("textureFileName", Value::Str("fire.png".into()));
//!
//! let lifespan = table.require_f32("particleLifespan")?;
//! ```

use std::collections::HashMap;

use crate::error::LoadError;

/// A typed scalar value from the emitter definition.
///
/// The legacy files freely mix `integer` and `real` elements for the same
/// keys, so both numeric variants coerce in numeric contexts. A string where
/// a number is required is a structural defect of the document.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An `integer` element.
    Int(i32),
    /// A `real` element.
    Float(f32),
    /// Any other element, kept verbatim.
    Str(String),
}

impl Value {
    /// Numeric view of this value, if it has one.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Int(v) => Some(*v as f32),
            Value::Float(v) => Some(*v),
            Value::Str(_) => None,
        }
    }

    /// Integer view of this value, if it has one. Reals truncate.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            Value::Float(v) => Some(*v as i32),
            Value::Str(_) => None,
        }
    }

    /// String view of this value, if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// A flat string-keyed table of emitter parameters.
#[derive(Debug, Clone, Default)]
pub struct ParamTable {
    entries: HashMap<String, Value>,
}

impl ParamTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous entry for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Remove an entry, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fetch a required float parameter.
    ///
    /// Missing keys are a [`LoadError::MissingParameter`]; a string value
    /// under a numeric key is a [`LoadError::MalformedFile`].
    pub fn require_f32(&self, key: &str) -> Result<f32, LoadError> {
        let value = self
            .entries
            .get(key)
            .ok_or_else(|| LoadError::MissingParameter(key.to_string()))?;
        value
            .as_f32()
            .ok_or_else(|| LoadError::MalformedFile(format!("key {} is not numeric", key)))
    }

    /// Fetch a required integer parameter.
    pub fn require_i32(&self, key: &str) -> Result<i32, LoadError> {
        let value = self
            .entries
            .get(key)
            .ok_or_else(|| LoadError::MissingParameter(key.to_string()))?;
        value
            .as_i32()
            .ok_or_else(|| LoadError::MalformedFile(format!("key {} is not numeric", key)))
    }

    /// Fetch a required string parameter.
    pub fn require_str(&self, key: &str) -> Result<&str, LoadError> {
        let value = self
            .entries
            .get(key)
            .ok_or_else(|| LoadError::MissingParameter(key.to_string()))?;
        value
            .as_str()
            .ok_or_else(|| LoadError::MalformedFile(format!("key {} is not a string", key)))
    }
}

impl FromIterator<(String, Value)> for ParamTable {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_coercion() {
        let mut table = ParamTable::new();
        table.insert("count", Value::Int(32));
        table.insert("span", Value::Float(2.5));

        assert_eq!(table.require_f32("count").unwrap(), 32.0);
        assert_eq!(table.require_i32("span").unwrap(), 2);
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let table = ParamTable::new();
        assert_eq!(
            table.require_f32("speed"),
            Err(LoadError::MissingParameter("speed".to_string()))
        );
    }

    #[test]
    fn test_string_under_numeric_key_is_malformed() {
        let mut table = ParamTable::new();
        table.insert("speed", Value::Str("fast".to_string()));
        assert!(matches!(
            table.require_f32("speed"),
            Err(LoadError::MalformedFile(_))
        ));
    }
}
