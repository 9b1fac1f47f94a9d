//! Typed conversion between [`AttrValue`] and declared field types.

use super::{AttrValue, AttributeKind};
use crate::error::{AmisError, Result};
use crate::types::{Mapping, NodeMap};
use serde_json::Value;

/// A type that can be stored in a declared attribute.
///
/// `from_attr` is strict: it accepts exactly the shapes [`AttrType::KIND`]
/// permits and returns `None` for anything else. Nothing is coerced; the
/// string `"1"` is not an integer and the integer `1` is not a string.
pub trait AttrType: Sized {
    const KIND: AttributeKind;

    fn from_attr(value: AttrValue) -> Option<Self>;

    fn to_attr(&self) -> AttrValue;
}

impl AttrType for String {
    const KIND: AttributeKind = AttributeKind::Text;

    fn from_attr(value: AttrValue) -> Option<Self> {
        match value {
            AttrValue::Json(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    fn to_attr(&self) -> AttrValue {
        AttrValue::from(self.as_str())
    }
}

impl AttrType for bool {
    const KIND: AttributeKind = AttributeKind::Flag;

    fn from_attr(value: AttrValue) -> Option<Self> {
        value.as_bool()
    }

    fn to_attr(&self) -> AttrValue {
        AttrValue::from(*self)
    }
}

impl AttrType for i64 {
    const KIND: AttributeKind = AttributeKind::Integer;

    fn from_attr(value: AttrValue) -> Option<Self> {
        value.as_i64()
    }

    fn to_attr(&self) -> AttrValue {
        AttrValue::from(*self)
    }
}

impl AttrType for Mapping {
    const KIND: AttributeKind = AttributeKind::Mapping;

    /// Plain objects only; an [`AttrValue::Map`] holding a node is rejected.
    fn from_attr(value: AttrValue) -> Option<Self> {
        match value {
            AttrValue::Json(Value::Object(map)) => Some(map),
            map @ AttrValue::Map(_) => match map.into_json()? {
                Value::Object(map) => Some(map),
                _ => None,
            },
            _ => None,
        }
    }

    fn to_attr(&self) -> AttrValue {
        AttrValue::Json(Value::Object(self.clone()))
    }
}

impl AttrType for NodeMap {
    const KIND: AttributeKind = AttributeKind::Mapping;

    fn from_attr(value: AttrValue) -> Option<Self> {
        match value {
            AttrValue::Json(Value::Object(map)) => Some(
                map.into_iter()
                    .map(|(key, value)| (key, AttrValue::Json(value)))
                    .collect(),
            ),
            AttrValue::Map(entries) => Some(entries),
            _ => None,
        }
    }

    fn to_attr(&self) -> AttrValue {
        AttrValue::Map(self.clone())
    }
}

/// Validates `value` for the declared attribute whose wire name is `field`.
///
/// `null` yields `Ok(None)`, which clears the attribute.
pub(crate) fn decode<T: AttrType>(field: &str, value: AttrValue) -> Result<Option<T>> {
    if value.is_null() {
        return Ok(None);
    }
    let received = value.shape();
    match T::from_attr(value) {
        Some(typed) => Ok(Some(typed)),
        None => {
            tracing::debug!(field, received, "rejected attribute value");
            Err(AmisError::validation(field, T::KIND.describe(), received))
        }
    }
}
