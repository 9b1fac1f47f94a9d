//! Value types shared by node attributes.
//!
//! Most amis attributes accept more than one shape: a `body` can be a string,
//! a single component, a list of components or a raw object. Each such union
//! is an enum here, with the conversions the by-name API needs.

use crate::attributes::{AttrType, AttrValue, AttributeKind};
use crate::document::ToDocument;
use crate::error::{AmisError, Result};
use crate::nodes::{AmisApi, Tpl};
use crate::schema::{AnyNode, Schema};
use indexmap::IndexMap;
use serde_json::Value;

/// An expression evaluated by the amis runtime (e.g. `"${count > 1}"`).
/// Never interpreted here.
pub type Expression = String;

/// A free-form JSON object.
pub type Mapping = serde_json::Map<String, Value>;

/// An object whose values may be nodes (e.g. an action's `args` carrying a
/// dialog body). Nodes are written with all of their own attributes.
pub type NodeMap = IndexMap<String, AttrValue>;

/// Literal text, a `tpl` node, or a raw object.
#[derive(Debug, Clone, PartialEq)]
pub enum Template {
    Text(String),
    Tpl(Box<Tpl>),
    Map(Mapping),
}

impl From<&str> for Template {
    fn from(text: &str) -> Self {
        Template::Text(text.to_string())
    }
}

impl From<String> for Template {
    fn from(text: String) -> Self {
        Template::Text(text)
    }
}

impl From<Tpl> for Template {
    fn from(tpl: Tpl) -> Self {
        Template::Tpl(Box::new(tpl))
    }
}

impl From<Mapping> for Template {
    fn from(map: Mapping) -> Self {
        Template::Map(map)
    }
}

impl AttrType for Template {
    const KIND: AttributeKind = AttributeKind::Template;

    fn from_attr(value: AttrValue) -> Option<Self> {
        match value {
            AttrValue::Json(Value::String(text)) => Some(Template::Text(text)),
            AttrValue::Json(Value::Object(map)) => Some(Template::Map(map)),
            AttrValue::Node(node) => node.downcast::<Tpl>().map(Template::Tpl),
            _ => None,
        }
    }

    fn to_attr(&self) -> AttrValue {
        match self {
            Template::Text(text) => AttrValue::from(text.as_str()),
            Template::Tpl(tpl) => AttrValue::Node(AnyNode::new(tpl.as_ref().clone())),
            Template::Map(map) => AttrValue::from(map.clone()),
        }
    }
}

impl ToDocument for Template {
    fn to_document(&self) -> Result<Value> {
        match self {
            Template::Text(text) => Ok(Value::String(text.clone())),
            Template::Tpl(tpl) => tpl.as_ref().to_document(),
            Template::Map(map) => Ok(Value::Object(map.clone())),
        }
    }
}

/// Content of a container slot (`body`, `aside`, `toolbar`, `remark`).
///
/// Nodes are held as [`AnyNode`], so whatever concrete type is placed here is
/// serialized with all of its own attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Text(String),
    Node(AnyNode),
    List(Vec<SchemaNode>),
    Map(Mapping),
}

impl SchemaNode {
    fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(SchemaNode::Text(text)),
            Value::Object(map) => Some(SchemaNode::Map(map)),
            Value::Array(items) => items
                .into_iter()
                .map(SchemaNode::from_json)
                .collect::<Option<Vec<_>>>()
                .map(SchemaNode::List),
            _ => None,
        }
    }
}

impl From<&str> for SchemaNode {
    fn from(text: &str) -> Self {
        SchemaNode::Text(text.to_string())
    }
}

impl From<String> for SchemaNode {
    fn from(text: String) -> Self {
        SchemaNode::Text(text)
    }
}

impl From<AnyNode> for SchemaNode {
    fn from(node: AnyNode) -> Self {
        SchemaNode::Node(node)
    }
}

impl From<Vec<AnyNode>> for SchemaNode {
    fn from(nodes: Vec<AnyNode>) -> Self {
        SchemaNode::List(nodes.into_iter().map(SchemaNode::Node).collect())
    }
}

impl From<Vec<SchemaNode>> for SchemaNode {
    fn from(items: Vec<SchemaNode>) -> Self {
        SchemaNode::List(items)
    }
}

impl From<Mapping> for SchemaNode {
    fn from(map: Mapping) -> Self {
        SchemaNode::Map(map)
    }
}

impl AttrType for SchemaNode {
    const KIND: AttributeKind = AttributeKind::Schema;

    fn from_attr(value: AttrValue) -> Option<Self> {
        match value {
            AttrValue::Json(json) => SchemaNode::from_json(json),
            AttrValue::Node(node) => Some(SchemaNode::Node(node)),
            AttrValue::List(items) => items
                .into_iter()
                .map(SchemaNode::from_attr)
                .collect::<Option<Vec<_>>>()
                .map(SchemaNode::List),
            AttrValue::Float(_) => None,
            map @ AttrValue::Map(_) => map.into_json().and_then(SchemaNode::from_json),
        }
    }

    fn to_attr(&self) -> AttrValue {
        match self {
            SchemaNode::Text(text) => AttrValue::from(text.as_str()),
            SchemaNode::Node(node) => AttrValue::Node(node.clone()),
            SchemaNode::List(items) => AttrValue::List(items.iter().map(AttrType::to_attr).collect()),
            SchemaNode::Map(map) => AttrValue::from(map.clone()),
        }
    }
}

impl ToDocument for SchemaNode {
    fn to_document(&self) -> Result<Value> {
        match self {
            SchemaNode::Text(text) => Ok(Value::String(text.clone())),
            SchemaNode::Node(node) => node.to_document(),
            SchemaNode::List(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    item.to_document()
                        .map_err(|err| err.at(&format!("[{index}]")))
                })
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            SchemaNode::Map(map) => Ok(Value::Object(map.clone())),
        }
    }
}

/// Where a component fetches data from: a URL, a full descriptor, or a raw
/// object.
#[derive(Debug, Clone, PartialEq)]
pub enum Api {
    Url(String),
    Api(Box<AmisApi>),
    Map(Mapping),
}

impl From<&str> for Api {
    fn from(url: &str) -> Self {
        Api::Url(url.to_string())
    }
}

impl From<String> for Api {
    fn from(url: String) -> Self {
        Api::Url(url)
    }
}

impl From<AmisApi> for Api {
    fn from(api: AmisApi) -> Self {
        Api::Api(Box::new(api))
    }
}

impl From<Mapping> for Api {
    fn from(map: Mapping) -> Self {
        Api::Map(map)
    }
}

impl AttrType for Api {
    const KIND: AttributeKind = AttributeKind::Api;

    fn from_attr(value: AttrValue) -> Option<Self> {
        match value {
            AttrValue::Json(Value::String(url)) => Some(Api::Url(url)),
            AttrValue::Json(Value::Object(map)) => Some(Api::Map(map)),
            AttrValue::Node(node) => node.downcast::<AmisApi>().map(Api::Api),
            _ => None,
        }
    }

    fn to_attr(&self) -> AttrValue {
        match self {
            Api::Url(url) => AttrValue::from(url.as_str()),
            Api::Api(api) => AttrValue::Node(AnyNode::new(api.as_ref().clone())),
            Api::Map(map) => AttrValue::from(map.clone()),
        }
    }
}

impl ToDocument for Api {
    fn to_document(&self) -> Result<Value> {
        match self {
            Api::Url(url) => Ok(Value::String(url.clone())),
            Api::Api(api) => api.as_ref().to_document(),
            Api::Map(map) => Ok(Value::Object(map.clone())),
        }
    }
}

/// A flag that may also be decided at runtime by an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoolOrExpr {
    Bool(bool),
    Expr(Expression),
}

impl From<bool> for BoolOrExpr {
    fn from(flag: bool) -> Self {
        BoolOrExpr::Bool(flag)
    }
}

impl From<&str> for BoolOrExpr {
    fn from(expr: &str) -> Self {
        BoolOrExpr::Expr(expr.to_string())
    }
}

impl From<String> for BoolOrExpr {
    fn from(expr: String) -> Self {
        BoolOrExpr::Expr(expr)
    }
}

impl AttrType for BoolOrExpr {
    const KIND: AttributeKind = AttributeKind::FlagOrExpression;

    fn from_attr(value: AttrValue) -> Option<Self> {
        match value {
            AttrValue::Json(Value::Bool(flag)) => Some(BoolOrExpr::Bool(flag)),
            AttrValue::Json(Value::String(expr)) => Some(BoolOrExpr::Expr(expr)),
            _ => None,
        }
    }

    fn to_attr(&self) -> AttrValue {
        match self {
            BoolOrExpr::Bool(flag) => AttrValue::from(*flag),
            BoolOrExpr::Expr(expr) => AttrValue::from(expr.as_str()),
        }
    }
}

impl ToDocument for BoolOrExpr {
    fn to_document(&self) -> Result<Value> {
        Ok(match self {
            BoolOrExpr::Bool(flag) => Value::Bool(*flag),
            BoolOrExpr::Expr(expr) => Value::String(expr.clone()),
        })
    }
}

/// A data-mapping string or an object.
#[derive(Debug, Clone, PartialEq)]
pub enum TextOrMap {
    Text(String),
    Map(Mapping),
}

impl From<&str> for TextOrMap {
    fn from(text: &str) -> Self {
        TextOrMap::Text(text.to_string())
    }
}

impl From<String> for TextOrMap {
    fn from(text: String) -> Self {
        TextOrMap::Text(text)
    }
}

impl From<Mapping> for TextOrMap {
    fn from(map: Mapping) -> Self {
        TextOrMap::Map(map)
    }
}

impl AttrType for TextOrMap {
    const KIND: AttributeKind = AttributeKind::TextOrMapping;

    fn from_attr(value: AttrValue) -> Option<Self> {
        match value {
            AttrValue::Json(Value::String(text)) => Some(TextOrMap::Text(text)),
            AttrValue::Json(Value::Object(map)) => Some(TextOrMap::Map(map)),
            _ => None,
        }
    }

    fn to_attr(&self) -> AttrValue {
        match self {
            TextOrMap::Text(text) => AttrValue::from(text.as_str()),
            TextOrMap::Map(map) => AttrValue::from(map.clone()),
        }
    }
}

impl ToDocument for TextOrMap {
    fn to_document(&self) -> Result<Value> {
        Ok(match self {
            TextOrMap::Text(text) => Value::String(text.clone()),
            TextOrMap::Map(map) => Value::Object(map.clone()),
        })
    }
}

/// Builds a [`Mapping`] from a `json!` object literal.
///
/// # Errors
///
/// Returns [`AmisError::Validation`] if `value` is not an object.
pub fn mapping(value: Value) -> Result<Mapping> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(AmisError::validation(
            "mapping",
            AttributeKind::Mapping.describe(),
            AttrValue::Json(other).shape(),
        )),
    }
}
