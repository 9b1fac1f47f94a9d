//! Conversion of attribute values into JSON documents.
//!
//! Node types serialize themselves (see [`crate::Schema::to_document`]); this
//! module covers the values stored inside them. Errors carry the path of the
//! offending value, built up as they propagate outwards:
//!
//! ```text
//! body[1].args.dialog.ratio
//!                     ^^^^^  extension key on the innermost node
//! ```

use crate::attributes::AttrValue;
use crate::error::{AmisError, Result};
use crate::schema::Schema;
use crate::types::{Mapping, NodeMap};
use serde_json::{Number, Value};

/// A value that can be written into a document.
pub trait ToDocument {
    fn to_document(&self) -> Result<Value>;
}

impl ToDocument for String {
    fn to_document(&self) -> Result<Value> {
        Ok(Value::String(self.clone()))
    }
}

impl ToDocument for bool {
    fn to_document(&self) -> Result<Value> {
        Ok(Value::Bool(*self))
    }
}

impl ToDocument for i64 {
    fn to_document(&self) -> Result<Value> {
        Ok(Value::from(*self))
    }
}

impl ToDocument for Mapping {
    fn to_document(&self) -> Result<Value> {
        Ok(Value::Object(self.clone()))
    }
}

impl ToDocument for NodeMap {
    fn to_document(&self) -> Result<Value> {
        let mut doc = Mapping::new();
        for (key, value) in self {
            let json = value.to_document().map_err(|err| err.at(key))?;
            doc.insert(key.clone(), json);
        }
        Ok(Value::Object(doc))
    }
}

impl ToDocument for AttrValue {
    fn to_document(&self) -> Result<Value> {
        match self {
            AttrValue::Json(value) => Ok(value.clone()),
            AttrValue::Float(float) => Number::from_f64(*float)
                .map(Value::Number)
                .ok_or_else(|| AmisError::serialization("", format!("non-finite float {float}"))),
            AttrValue::Node(node) => Schema::to_document(&**node),
            AttrValue::List(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    item.to_document()
                        .map_err(|err| err.at(&format!("[{index}]")))
                })
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            AttrValue::Map(entries) => entries.to_document(),
        }
    }
}

/// Encodes a document as JSON text.
pub(crate) fn encode(doc: &Value, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(doc)
    } else {
        serde_json::to_string(doc)
    };
    text.map_err(|err| AmisError::serialization("", err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::Tpl;
    use serde_json::json;

    #[test]
    fn test_finite_float() {
        assert_eq!(AttrValue::Float(0.5).to_document().unwrap(), json!(0.5));
    }

    #[test]
    fn test_non_finite_float_fails() {
        let err = AttrValue::Float(f64::NEG_INFINITY).to_document().unwrap_err();
        match err {
            AmisError::Serialization { path, message } => {
                assert_eq!(path, "");
                assert!(message.contains("non-finite"));
            }
            other => panic!("Expected Serialization, got {other:?}"),
        }
    }

    #[test]
    fn test_list_error_path_has_index() {
        let value = AttrValue::List(vec![AttrValue::from(1), AttrValue::Float(f64::NAN)]);
        match value.to_document().unwrap_err() {
            AmisError::Serialization { path, .. } => assert_eq!(path, "[1]"),
            other => panic!("Expected Serialization, got {other:?}"),
        }
    }

    #[test]
    fn test_node_values_use_concrete_type() {
        let value = AttrValue::Node(Tpl::new("${name}").into_node());
        assert_eq!(
            value.to_document().unwrap(),
            json!({"type": "tpl", "tpl": "${name}"})
        );
    }

    #[test]
    fn test_map_values_keep_node_attributes() {
        let mut tpl = Tpl::new("${reason}");
        tpl.class_name = Some("text-danger".into());
        tpl.show_native_title = Some(true);

        let value = AttrValue::map([
            ("title", AttrValue::from("Rejected")),
            ("body", tpl.into_node().into()),
        ]);
        assert_eq!(
            value.to_document().unwrap(),
            json!({
                "title": "Rejected",
                "body": {
                    "type": "tpl",
                    "className": "text-danger",
                    "tpl": "${reason}",
                    "showNativeTitle": true
                }
            })
        );
    }

    #[test]
    fn test_map_error_path_has_key() {
        let mut tpl = Tpl::new("x");
        tpl.extra.insert("ratio", f64::INFINITY);
        let value = AttrValue::map([(
            "dialog",
            AttrValue::map([("body", AttrValue::List(vec![tpl.into_node().into()]))]),
        )]);

        match value.to_document().unwrap_err() {
            AmisError::Serialization { path, .. } => assert_eq!(path, "dialog.body[0].ratio"),
            other => panic!("Expected Serialization, got {other:?}"),
        }
    }

    #[test]
    fn test_encode_compact_and_pretty() {
        let doc = json!({"type": "page", "title": "x"});
        assert_eq!(encode(&doc, false).unwrap(), r#"{"type":"page","title":"x"}"#);
        assert!(encode(&doc, true).unwrap().contains("\n  \"type\": \"page\""));
    }
}
