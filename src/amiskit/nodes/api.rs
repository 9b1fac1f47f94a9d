use crate::attributes::{AttrType, AttrValue, AttributeKind, Extension};
use crate::document::ToDocument;
use crate::error::Result;
use crate::types::{Expression, Mapping, Template, TextOrMap};
use serde_json::Value;
use std::fmt;

/// HTTP method of an [`AmisApi`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl ApiMethod {
    pub const NAMES: &'static [&'static str] = &["get", "post", "put", "delete"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiMethod::Get => "get",
            ApiMethod::Post => "post",
            ApiMethod::Put => "put",
            ApiMethod::Delete => "delete",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "get" => Some(ApiMethod::Get),
            "post" => Some(ApiMethod::Post),
            "put" => Some(ApiMethod::Put),
            "delete" => Some(ApiMethod::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AttrType for ApiMethod {
    const KIND: AttributeKind = AttributeKind::Choice(ApiMethod::NAMES);

    fn from_attr(value: AttrValue) -> Option<Self> {
        value.as_str().and_then(ApiMethod::parse)
    }

    fn to_attr(&self) -> AttrValue {
        AttrValue::from(self.as_str())
    }
}

impl ToDocument for ApiMethod {
    fn to_document(&self) -> Result<Value> {
        Ok(Value::from(self.as_str()))
    }
}

schema! {
    /// Describes a request the amis runtime sends.
    ///
    /// A new descriptor carries the runtime's own defaults (`dataType`,
    /// `qsOptions`, `replaceData`) so they show up in exported documents.
    pub struct AmisApi {
        method: ApiMethod => "method",
        url: Template => "url",
        /// Request body; a data-mapping string or an object.
        data: TextOrMap => "data",
        /// `json`, `form` or `form-data`.
        data_type: String => "dataType",
        qs_options: TextOrMap => "qsOptions",
        headers: Mapping => "headers",
        /// Only send when this expression holds.
        send_on: Expression => "sendOn",
        /// Milliseconds during which identical requests reuse the last response.
        cache: i64 => "cache",
        request_adaptor: String => "requestAdaptor",
        adaptor: String => "adaptor",
        /// Replace the current data with the response instead of merging.
        replace_data: bool => "replaceData",
        /// `blob` for downloads.
        response_type: String => "responseType",
        auto_refresh: bool => "autoRefresh",
        response_data: Mapping => "responseData",
        track_expression: String => "trackExpression",
        /// `success` / `failed` toast texts.
        messages: Mapping => "messages",
    }
}

fn default_qs_options() -> Mapping {
    let mut options = Mapping::new();
    options.insert("arrayFormat".to_string(), Value::from("indices"));
    options.insert("encodeValuesOnly".to_string(), Value::Bool(true));
    options
}

impl Default for AmisApi {
    fn default() -> Self {
        Self {
            method: None,
            url: None,
            data: None,
            data_type: Some("json".to_string()),
            qs_options: Some(TextOrMap::Map(default_qs_options())),
            headers: None,
            send_on: None,
            cache: None,
            request_adaptor: None,
            adaptor: None,
            replace_data: Some(false),
            response_type: None,
            auto_refresh: None,
            response_data: None,
            track_expression: None,
            messages: None,
            extra: Extension::new(),
        }
    }
}

impl AmisApi {
    pub fn new(method: ApiMethod, url: impl Into<Template>) -> Self {
        Self {
            method: Some(method),
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn get(url: impl Into<Template>) -> Self {
        Self::new(ApiMethod::Get, url)
    }

    pub fn post(url: impl Into<Template>) -> Self {
        Self::new(ApiMethod::Post, url)
    }

    pub fn put(url: impl Into<Template>) -> Self {
        Self::new(ApiMethod::Put, url)
    }

    pub fn delete(url: impl Into<Template>) -> Self {
        Self::new(ApiMethod::Delete, url)
    }
}

schema! {
    /// The envelope amis expects from a backend: `status` 0 means success.
    pub struct ApiOut {
        status: i64 => "status",
        msg: String => "msg",
        data: Mapping => "data",
    }
}

impl Default for ApiOut {
    fn default() -> Self {
        Self {
            status: Some(0),
            msg: Some(String::new()),
            data: None,
            extra: Extension::new(),
        }
    }
}

impl ApiOut {
    pub fn success(data: Mapping) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    pub fn failure(status: i64, msg: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            msg: Some(msg.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AmisError;
    use crate::schema::{Schema, Update};
    use crate::types::mapping;
    use serde_json::json;

    #[test]
    fn test_defaults_are_emitted() {
        let api = AmisApi::default();
        assert_eq!(
            api.to_document().unwrap(),
            json!({
                "dataType": "json",
                "qsOptions": {"arrayFormat": "indices", "encodeValuesOnly": true},
                "replaceData": false
            })
        );
    }

    #[test]
    fn test_clearing_a_default_removes_it() {
        let mut api = AmisApi::default();
        api.set("qsOptions", AttrValue::null()).unwrap();
        api.set("replace_data", AttrValue::null()).unwrap();

        let doc = api.to_document().unwrap();
        assert!(doc.get("qsOptions").is_none());
        assert!(doc.get("replaceData").is_none());
        assert_eq!(doc["dataType"], json!("json"));
    }

    #[test]
    fn test_method_must_be_known() {
        let mut api = AmisApi::get("/api/users");
        let err = api.set("method", "patch".into()).unwrap_err();

        match err {
            AmisError::Validation {
                field,
                expected,
                received,
            } => {
                assert_eq!(field, "method");
                assert_eq!(expected, "one of get, post, put, delete");
                assert_eq!(received, "string");
            }
            other => panic!("Expected Validation, got {other:?}"),
        }
        assert_eq!(api.method, Some(ApiMethod::Get));
    }

    #[test]
    fn test_method_rejected_when_absent_stays_absent() {
        let mut api = AmisApi::default();
        assert!(api.set("method", 1.into()).is_err());
        assert!(api.method.is_none());
        assert!(api.to_document().unwrap().get("method").is_none());
    }

    #[test]
    fn test_wire_shape() {
        let mut api = AmisApi::post("/api/users/${id}");
        api.update_from_mapping(mapping(json!({
            "sendOn": "${id}",
            "cache": 2000,
            "requestAdaptor": "return api;",
            "headers": {"X-Token": "${token}"},
        })).unwrap())
        .unwrap();

        assert_eq!(
            api.to_document().unwrap(),
            json!({
                "method": "post",
                "url": "/api/users/${id}",
                "dataType": "json",
                "qsOptions": {"arrayFormat": "indices", "encodeValuesOnly": true},
                "headers": {"X-Token": "${token}"},
                "sendOn": "${id}",
                "cache": 2000,
                "requestAdaptor": "return api;",
                "replaceData": false
            })
        );
    }

    #[test]
    fn test_cache_rejects_text() {
        let mut api = AmisApi::default();
        let err = api.set("cache", "2000".into()).unwrap_err();
        assert!(matches!(err, AmisError::Validation { received: "string", .. }));
    }

    #[test]
    fn test_api_out() {
        let ok = ApiOut::success(mapping(json!({"total": 3})).unwrap());
        assert_eq!(
            ok.to_document().unwrap(),
            json!({"status": 0, "msg": "", "data": {"total": 3}})
        );

        let failed = ApiOut::failure(404, "not found");
        assert_eq!(
            failed.to_document().unwrap(),
            json!({"status": 404, "msg": "not found"})
        );
    }
}
