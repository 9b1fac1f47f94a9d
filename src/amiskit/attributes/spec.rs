//! Attribute specifications.
//!
//! This module defines the schema for declared attributes: which names
//! address them and what kinds of values they hold.

/// The semantic kind of a declared attribute.
///
/// The kind decides which value shapes are accepted when the attribute is set
/// by name, and how the expectation is phrased in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Plain string (also used for opaque expressions)
    Text,

    /// Boolean
    Flag,

    /// Whole number (e.g., `cache` in milliseconds)
    Integer,

    /// Free-form object
    Mapping,

    /// One of a closed set of strings (e.g., `method`)
    Choice(&'static [&'static str]),

    /// Boolean, or an expression evaluated by the runtime
    FlagOrExpression,

    /// String (data-mapping expression) or object
    TextOrMapping,

    /// Literal text, a structured template node, or an object
    Template,

    /// Text, any node, an object, or a list of those
    Schema,

    /// URL string, API descriptor, or object
    Api,
}

impl AttributeKind {
    /// Human readable description of the accepted shapes.
    pub fn describe(&self) -> String {
        match self {
            AttributeKind::Text => "a string".to_string(),
            AttributeKind::Flag => "a boolean".to_string(),
            AttributeKind::Integer => "an integer".to_string(),
            AttributeKind::Mapping => "an object".to_string(),
            AttributeKind::Choice(options) => format!("one of {}", options.join(", ")),
            AttributeKind::FlagOrExpression => "a boolean or an expression string".to_string(),
            AttributeKind::TextOrMapping => "a string or an object".to_string(),
            AttributeKind::Template => "a string, a template node or an object".to_string(),
            AttributeKind::Schema => {
                "a string, a node, an object or a list of those".to_string()
            }
            AttributeKind::Api => "a URL string, an API descriptor or an object".to_string(),
        }
    }
}

/// Specification for a single declared attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSpec {
    /// Internal identifier, the Rust field name (e.g., "visible_on")
    pub name: &'static str,

    /// Name used in serialized documents (e.g., "visibleOn")
    pub wire: &'static str,

    /// The kind of value this attribute holds
    pub kind: AttributeKind,
}

impl AttributeSpec {
    pub const fn new(name: &'static str, wire: &'static str, kind: AttributeKind) -> Self {
        Self { name, wire, kind }
    }

    /// True if `name` is either the internal identifier or the wire name.
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.wire == name
    }

    /// True if the wire name differs from the internal identifier.
    pub fn is_aliased(&self) -> bool {
        self.name != self.wire
    }
}

/// Look up a spec by internal or wire name.
pub fn find_spec<'a>(
    specs: &[&'a AttributeSpec],
    name: &str,
) -> Option<&'a AttributeSpec> {
    specs.iter().copied().find(|spec| spec.matches(name))
}
