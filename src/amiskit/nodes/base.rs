use super::Event;
use crate::error::Result;
use crate::schema::Schema;
use crate::types::{Expression, Mapping};
use serde_json::Value;

attribute_group! {
    /// Attributes every amis component accepts.
    pub struct NodeBase {
        /// Component tag, emitted as `type`.
        kind: String => "type",
        visible: bool => "visible",
        hidden: bool => "hidden",
        visible_on: Expression => "visibleOn",
        hidden_on: Expression => "hiddenOn",
        id: String => "id",
        /// Field name the component binds to in its data scope.
        name: String => "name",
        value: String => "value",
        /// Event handlers, keyed by event name.
        on_event: Mapping => "onEvent",
    }
}

impl NodeBase {
    /// A base group with only the `type` tag set.
    pub fn typed(tag: &str) -> Self {
        Self {
            kind: Some(tag.to_string()),
            ..Default::default()
        }
    }

    /// Appends actions to `onEvent.<event>.actions`.
    ///
    /// Handlers for other events are left as they are. Nothing is changed if
    /// one of the actions fails to serialize.
    pub fn add_event_actions(&mut self, event: &str, actions: &[Event]) -> Result<()> {
        let docs = actions
            .iter()
            .enumerate()
            .map(|(index, action)| {
                action.to_document().map_err(|err| {
                    err.at(&format!("[{index}]"))
                        .at("actions")
                        .at(event)
                        .at("onEvent")
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let handlers = self.on_event.get_or_insert_with(Mapping::new);
        let handler = handlers
            .entry(event.to_string())
            .or_insert_with(|| Value::Object(Mapping::new()));
        if !handler.is_object() {
            *handler = Value::Object(Mapping::new());
        }
        if let Value::Object(handler) = handler {
            let list = handler
                .entry("actions".to_string())
                .or_insert_with(|| Value::Array(Vec::new()));
            if !list.is_array() {
                *list = Value::Array(Vec::new());
            }
            if let Value::Array(list) = list {
                list.extend(docs);
            }
        }
        Ok(())
    }
}

schema! {
    /// A component of any type, for tags without a dedicated struct.
    ///
    /// Component-specific attributes go to the extension map:
    ///
    /// ```ignore
    /// let mut button = AmisNode::new("button");
    /// button.set("label", "Save".into())?;
    /// ```
    #[derive(Default)]
    pub struct AmisNode extends NodeBase {}
}

impl AmisNode {
    pub fn new(kind: &str) -> Self {
        Self {
            base: NodeBase::typed(kind),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttrValue;
    use crate::error::AmisError;
    use serde_json::json;

    #[test]
    fn test_unset_attributes_are_omitted() {
        let node = AmisNode::new("divider");
        assert_eq!(node.to_document().unwrap(), json!({"type": "divider"}));
    }

    #[test]
    fn test_aliases_use_wire_names() {
        let mut node = AmisNode::new("button");
        node.set("visible_on", "${role == 'admin'}".into()).unwrap();
        node.set("hiddenOn", "${locked}".into()).unwrap();

        let doc = node.to_document().unwrap();
        assert_eq!(doc["visibleOn"], json!("${role == 'admin'}"));
        assert_eq!(doc["hiddenOn"], json!("${locked}"));
        assert!(doc.get("visible_on").is_none());
        assert!(doc.get("hidden_on").is_none());
    }

    #[test]
    fn test_set_validates_base_attributes() {
        let mut node = AmisNode::new("button");
        let err = node.set("visible", "yes".into()).unwrap_err();
        assert!(matches!(err, AmisError::Validation { ref field, .. } if field == "visible"));
        assert!(node.base.visible.is_none());
    }

    #[test]
    fn test_extension_attributes_follow_declared() {
        let mut node = AmisNode::new("button");
        node.set("label", "Save".into()).unwrap();
        node.set("level", "primary".into()).unwrap();
        node.set("id", "save".into()).unwrap();

        assert_eq!(
            node.to_text().unwrap(),
            r#"{"type":"button","id":"save","label":"Save","level":"primary"}"#
        );
    }

    #[test]
    fn test_null_clears_declared_attribute() {
        let mut node = AmisNode::new("button");
        node.set("id", "save".into()).unwrap();
        node.set("id", AttrValue::null()).unwrap();

        assert_eq!(node.get("id"), None);
        assert!(node.to_document().unwrap().get("id").is_none());
    }

    #[test]
    fn test_add_event_actions() {
        let mut base = NodeBase::typed("button");
        base.add_event_actions("click", &[Event::new("toast")]).unwrap();
        base.add_event_actions("click", &[Event::new("reload")]).unwrap();

        let actions = &base.on_event.as_ref().unwrap()["click"]["actions"];
        assert_eq!(actions.as_array().unwrap().len(), 2);
        assert_eq!(actions[0]["actionType"], json!("toast"));
        assert_eq!(actions[1]["actionType"], json!("reload"));
    }

    #[test]
    fn test_add_event_actions_keeps_other_events() {
        let mut base = NodeBase::typed("input-text");
        base.on_event = Some(crate::types::mapping(json!({"blur": {"actions": []}})).unwrap());
        base.add_event_actions("change", &[Event::new("validate")]).unwrap();

        let handlers = base.on_event.as_ref().unwrap();
        let keys: Vec<&String> = handlers.keys().collect();
        assert_eq!(keys, vec!["blur", "change"]);
    }

    #[test]
    fn test_add_event_actions_error_path() {
        let mut action = Event::new("ajax");
        action.extra.insert("timeout", f64::INFINITY);

        let mut base = NodeBase::typed("button");
        let err = base.add_event_actions("click", &[action]).unwrap_err();
        match err {
            AmisError::Serialization { path, .. } => {
                assert_eq!(path, "onEvent.click.actions[0].timeout")
            }
            other => panic!("Expected Serialization, got {other:?}"),
        }
        assert!(base.on_event.is_none());
    }
}
