//! The open-ended half of an attribute container.

use super::AttrValue;
use crate::document::ToDocument;
use crate::error::{AmisError, Result};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// Caller-supplied attributes that a node type does not declare.
///
/// Entries keep insertion order; re-inserting a key replaces its value in place.
/// Every entry is serialized, including `null` values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extension {
    entries: IndexMap<String, AttrValue>,
}

impl Extension {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Option<AttrValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Insert any serializable value, converting it to JSON first.
    ///
    /// # Errors
    ///
    /// Returns [`AmisError::Serialization`] naming `key` if the value cannot be
    /// represented as JSON (e.g., a map with non-string keys).
    pub fn insert_serialized<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_value(value)
            .map_err(|err| AmisError::serialization(key, err.to_string()))?;
        self.entries.insert(key.to_string(), AttrValue::Json(json));
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.get(key)
    }

    /// Remove an entry, preserving the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append every entry to `doc`, after whatever it already holds.
    pub(crate) fn write(&self, doc: &mut Map<String, Value>) -> Result<()> {
        for (key, value) in &self.entries {
            let json = value.to_document().map_err(|err| err.at(key))?;
            doc.insert(key.clone(), json);
        }
        Ok(())
    }
}
