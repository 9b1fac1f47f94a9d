use super::NodeBase;
use crate::attributes::Extension;
use crate::types::Template;

schema! {
    /// Renders a template against the data in scope (`"Hello ${name}"`).
    pub struct Tpl: "tpl" extends NodeBase {
        /// Class of the outer DOM element.
        class_name: String => "className",
        tpl: Template => "tpl",
        /// Use the rendered text as the outer element's `title`.
        show_native_title: bool => "showNativeTitle",
    }
}

impl Default for Tpl {
    fn default() -> Self {
        Self {
            base: NodeBase::typed(Self::TAG),
            class_name: None,
            tpl: None,
            show_native_title: None,
            extra: Extension::new(),
        }
    }
}

impl Tpl {
    pub fn new(tpl: impl Into<Template>) -> Self {
        Self {
            tpl: Some(tpl.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttrValue;
    use crate::error::AmisError;
    use crate::schema::Schema;
    use serde_json::json;

    #[test]
    fn test_default_carries_type() {
        assert_eq!(Tpl::default().to_document().unwrap(), json!({"type": "tpl"}));
        assert_eq!(Tpl::default().type_tag(), Some("tpl"));
    }

    #[test]
    fn test_declared_then_extension() {
        let mut tpl = Tpl::new("${count} items");
        tpl.set("wrapperComponent", "h2".into()).unwrap();
        tpl.set("class_name", "text-muted".into()).unwrap();

        assert_eq!(
            tpl.to_text().unwrap(),
            r#"{"type":"tpl","className":"text-muted","tpl":"${count} items","wrapperComponent":"h2"}"#
        );
    }

    #[test]
    fn test_nested_tpl_keeps_own_attributes() {
        let mut inner = Tpl::new("${name}");
        inner.show_native_title = Some(true);
        let outer = Tpl::new(inner);

        assert_eq!(
            outer.to_document().unwrap(),
            json!({
                "type": "tpl",
                "tpl": {"type": "tpl", "tpl": "${name}", "showNativeTitle": true}
            })
        );
    }

    #[test]
    fn test_rejected_value_keeps_previous() {
        let mut tpl = Tpl::new("x");
        tpl.set("showNativeTitle", true.into()).unwrap();

        let err = tpl.set("show_native_title", "true".into()).unwrap_err();
        match err {
            AmisError::Validation {
                field, received, ..
            } => {
                assert_eq!(field, "showNativeTitle");
                assert_eq!(received, "string");
            }
            other => panic!("Expected Validation, got {other:?}"),
        }
        assert_eq!(tpl.show_native_title, Some(true));
    }

    #[test]
    fn test_get_by_either_name() {
        let mut tpl = Tpl::new("x");
        tpl.class_name = Some("lead".into());

        assert_eq!(tpl.get("className"), Some(AttrValue::from("lead")));
        assert_eq!(tpl.get("class_name"), Some(AttrValue::from("lead")));
        assert_eq!(tpl.get("showNativeTitle"), None);
    }

    #[test]
    fn test_attributes_list_base_first() {
        let names: Vec<&str> = Tpl::default().attributes().iter().map(|spec| spec.wire).collect();
        assert_eq!(names.first(), Some(&"type"));
        assert_eq!(
            &names[names.len() - 3..],
            &["className", "tpl", "showNativeTitle"]
        );
    }
}
