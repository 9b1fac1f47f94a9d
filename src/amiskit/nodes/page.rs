use super::NodeBase;
use crate::attributes::Extension;
use crate::error::Result;
use crate::render::{self, RenderOptions};
use crate::types::{Api, Expression, Mapping, SchemaNode, Template};
use envelope::Shell;

schema! {
    /// Root of an exported amis document.
    pub struct Page: "page" extends NodeBase {
        title: Template => "title",
        sub_title: Template => "subTitle",
        /// Hint shown next to the title.
        remark: SchemaNode => "remark",
        aside: SchemaNode => "aside",
        toolbar: SchemaNode => "toolbar",
        body: SchemaNode => "body",
        class_name: String => "className",
        /// CSS custom properties set on the page root.
        css_vars: Mapping => "cssVars",
        toolbar_class_name: String => "toolbarClassName",
        body_class_name: String => "bodyClassName",
        aside_class_name: String => "asideClassName",
        header_class_name: String => "headerClassName",
        /// Loads the page's initial data.
        init_api: Api => "initApi",
        init_fetch: bool => "initFetch",
        init_fetch_on: Expression => "initFetchOn",
        /// Polling interval for `initApi`, in milliseconds.
        interval: i64 => "interval",
        silent_polling: bool => "silentPolling",
        stop_auto_refresh_when: Expression => "stopAutoRefreshWhen",
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            base: NodeBase::typed(Self::TAG),
            title: None,
            sub_title: None,
            remark: None,
            aside: None,
            toolbar: None,
            body: None,
            class_name: None,
            css_vars: None,
            toolbar_class_name: None,
            body_class_name: None,
            aside_class_name: None,
            header_class_name: None,
            init_api: None,
            init_fetch: None,
            init_fetch_on: None,
            interval: None,
            silent_polling: None,
            stop_auto_refresh_when: None,
            extra: Extension::new(),
        }
    }
}

impl Page {
    /// Template used when [`RenderOptions::template`] is not set.
    pub const DEFAULT_TEMPLATE: &'static str = "page.html";

    pub fn new() -> Self {
        Self::default()
    }

    /// Renders a complete HTML document with the bundled templates.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AmisError::TemplateNotFound`] if `options.template`
    /// names a template that is not bundled, and
    /// [`crate::AmisError::Serialization`] if the page cannot be exported.
    pub fn render(&self, options: &RenderOptions) -> Result<String> {
        render::render_page(self, render::bundled_shell(), options)
    }

    /// Renders with templates from `shell` instead of the bundled ones.
    pub fn render_with(&self, shell: &Shell, options: &RenderOptions) -> Result<String> {
        render::render_page(self, shell, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{AmisApi, AmisNode, Tpl};
    use crate::schema::Schema;
    use serde_json::json;

    #[test]
    fn test_body_keeps_subtype_attributes() {
        let mut tpl = Tpl::new("Hello ${name}");
        tpl.class_name = Some("lead".into());

        let page = Page {
            title: Some("Greeting".into()),
            body: Some(tpl.into_node().into()),
            ..Page::default()
        };

        assert_eq!(
            page.to_document().unwrap(),
            json!({
                "type": "page",
                "title": "Greeting",
                "body": {"type": "tpl", "className": "lead", "tpl": "Hello ${name}"}
            })
        );
    }

    #[test]
    fn test_body_list_mixes_shapes() {
        let page = Page {
            body: Some(SchemaNode::List(vec![
                "plain text".into(),
                AmisNode::new("divider").into_node().into(),
                Tpl::new("${total}").into_node().into(),
            ])),
            ..Page::default()
        };

        assert_eq!(
            page.to_document().unwrap()["body"],
            json!([
                "plain text",
                {"type": "divider"},
                {"type": "tpl", "tpl": "${total}"}
            ])
        );
    }

    #[test]
    fn test_init_api_descriptor() {
        let mut api = AmisApi::get("/api/dashboard");
        api.cache = Some(5000);
        let page = Page {
            init_api: Some(api.into()),
            interval: Some(3000),
            ..Page::default()
        };

        let doc = page.to_document().unwrap();
        assert_eq!(doc["initApi"]["method"], json!("get"));
        assert_eq!(doc["initApi"]["cache"], json!(5000));
        assert_eq!(doc["interval"], json!(3000));
    }

    #[test]
    fn test_body_set_by_name_accepts_nodes() {
        let mut page = Page::new();
        page.set("body", Tpl::new("x").into_node().into()).unwrap();
        assert!(matches!(page.body, Some(SchemaNode::Node(ref node)) if node.is::<Tpl>()));

        let err = page.set("body", 42.into()).unwrap_err();
        assert!(matches!(err, crate::AmisError::Validation { ref field, .. } if field == "body"));
    }

    #[test]
    fn test_serialization_error_names_nested_path() {
        let mut tpl = Tpl::new("x");
        tpl.extra.insert("ratio", f64::NAN);
        let page = Page {
            body: Some(SchemaNode::List(vec!["a".into(), tpl.into_node().into()])),
            ..Page::default()
        };

        match page.to_document().unwrap_err() {
            crate::AmisError::Serialization { path, .. } => assert_eq!(path, "body[1].ratio"),
            other => panic!("Expected Serialization, got {other:?}"),
        }
    }
}
