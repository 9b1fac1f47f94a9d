//! Attribute value types.
//!
//! This module defines the runtime representation of attribute values used by
//! the by-name API (`get`, `set`, `update_from_mapping`).

use crate::schema::AnyNode;
use crate::types::{Mapping, NodeMap};
use serde_json::{Number, Value};

/// Runtime representation of an attribute value.
///
/// Plain data travels as JSON. Nodes travel as [`AnyNode`] handles so that a
/// concrete node type (and everything it declares) survives being stored in a
/// field typed as "any node".
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Any JSON value. `Json(Value::Null)` clears a declared attribute.
    Json(Value),

    /// A float, kept as-is until serialization. Non-finite values cannot be
    /// represented in a document and fail there.
    Float(f64),

    /// A node of any concrete type.
    Node(AnyNode),

    /// A sequence that may mix nodes and plain values.
    List(Vec<AttrValue>),

    /// An object whose values may be nodes, in insertion order.
    Map(NodeMap),
}

impl AttrValue {
    /// The value that clears a declared attribute.
    pub fn null() -> Self {
        AttrValue::Json(Value::Null)
    }

    /// An object value built from `(key, value)` pairs.
    ///
    /// ```ignore
    /// let dialog = AttrValue::map([("title", "Edit".into()), ("body", tpl.into_node().into())]);
    /// ```
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, AttrValue)>) -> Self {
        AttrValue::Map(entries.into_iter().map(|(key, value)| (key.into(), value)).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Json(Value::Null))
    }

    /// Name of this value's shape, as reported in validation errors.
    pub fn shape(&self) -> &'static str {
        match self {
            AttrValue::Json(Value::Null) => "null",
            AttrValue::Json(Value::Bool(_)) => "boolean",
            AttrValue::Json(Value::Number(n)) if n.is_i64() => "integer",
            AttrValue::Json(Value::Number(_)) => "number",
            AttrValue::Json(Value::String(_)) => "string",
            AttrValue::Json(Value::Array(_)) => "array",
            AttrValue::Json(Value::Object(_)) => "object",
            AttrValue::Float(_) => "number",
            AttrValue::Node(_) => "node",
            AttrValue::List(_) => "array",
            AttrValue::Map(_) => "object",
        }
    }

    /// Plain JSON for values that hold no nodes.
    ///
    /// Returns `None` if a node or a non-finite float is found at any depth.
    pub fn into_json(self) -> Option<Value> {
        match self {
            AttrValue::Json(value) => Some(value),
            AttrValue::Float(float) => Number::from_f64(float).map(Value::Number),
            AttrValue::Node(_) => None,
            AttrValue::List(items) => items
                .into_iter()
                .map(AttrValue::into_json)
                .collect::<Option<Vec<_>>>()
                .map(Value::Array),
            AttrValue::Map(entries) => entries
                .into_iter()
                .map(|(key, value)| value.into_json().map(|json| (key, json)))
                .collect::<Option<Mapping>>()
                .map(Value::Object),
        }
    }

    /// Get the string if this is a JSON string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Json(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Get the boolean if this is a JSON boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Json(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Get the integer if this is a JSON integer that fits in `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttrValue::Json(Value::Number(n)) => n.as_i64(),
            _ => None,
        }
    }

    /// Get the node handle if this is a node.
    pub fn as_node(&self) -> Option<&AnyNode> {
        match self {
            AttrValue::Node(node) => Some(node),
            _ => None,
        }
    }
}

impl From<Value> for AttrValue {
    fn from(value: Value) -> Self {
        AttrValue::Json(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Json(Value::String(value.to_string()))
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Json(Value::String(value))
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Json(Value::Bool(value))
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Json(Value::from(value))
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Json(Value::from(value))
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        AttrValue::Json(Value::from(value))
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<Mapping> for AttrValue {
    fn from(value: Mapping) -> Self {
        AttrValue::Json(Value::Object(value))
    }
}

impl From<NodeMap> for AttrValue {
    fn from(value: NodeMap) -> Self {
        AttrValue::Map(value)
    }
}

impl From<AnyNode> for AttrValue {
    fn from(node: AnyNode) -> Self {
        AttrValue::Node(node)
    }
}

impl From<Vec<AnyNode>> for AttrValue {
    fn from(nodes: Vec<AnyNode>) -> Self {
        AttrValue::List(nodes.into_iter().map(AttrValue::Node).collect())
    }
}

impl From<Vec<AttrValue>> for AttrValue {
    fn from(items: Vec<AttrValue>) -> Self {
        AttrValue::List(items)
    }
}
