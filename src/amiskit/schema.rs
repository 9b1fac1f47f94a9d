//! The node abstraction.
//!
//! Every amis component, API descriptor and event action is a [`Schema`]: an
//! attribute container that knows its declared attributes, stores anything
//! else in an [`Extension`] map, and serializes itself to a JSON document.
//!
//! Concrete node types are generated by the `schema!` macro; this module holds
//! the trait they implement, the [`AnyNode`] handle used wherever a field may
//! hold "any node", and the [`Update`] bulk-mutation API.

use crate::attributes::{find_spec, AttrValue, AttributeSpec, Extension};
use crate::document;
use crate::error::Result;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// An attribute container that can be exported as an amis document.
pub trait Schema: fmt::Debug + Send + Sync + 'static {
    /// The amis component tag this type stands for (`"tpl"`, `"page"`), if
    /// it has a fixed one.
    fn type_tag(&self) -> Option<&'static str>;

    /// Declared attributes, shared base group first.
    fn attributes(&self) -> Vec<&'static AttributeSpec>;

    /// Reads an attribute by internal or wire name.
    ///
    /// Declared attributes return their current value, or `None` while
    /// absent. Any other name is looked up in the extension map.
    fn get(&self, name: &str) -> Option<AttrValue>;

    /// Writes an attribute by internal or wire name.
    ///
    /// Declared attributes are validated against their kind; `null` makes
    /// them absent again. Any other name is stored in the extension map as-is.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AmisError::Validation`] if a declared attribute is
    /// given a shape its kind does not permit. The attribute keeps its
    /// previous value.
    fn set(&mut self, name: &str, value: AttrValue) -> Result<()>;

    fn extension(&self) -> &Extension;

    fn extension_mut(&mut self) -> &mut Extension;

    /// Builds the JSON document for this node and everything below it.
    ///
    /// Absent declared attributes are omitted, present ones are emitted under
    /// their wire names, and extension attributes follow in insertion order.
    fn to_document(&self) -> Result<Value>;

    fn clone_node(&self) -> AnyNode;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Compact JSON text of [`Schema::to_document`].
    fn to_text(&self) -> Result<String> {
        document::encode(&self.to_document()?, false)
    }

    /// Indented JSON text of [`Schema::to_document`].
    fn to_text_pretty(&self) -> Result<String> {
        document::encode(&self.to_document()?, true)
    }

    /// True if `name` addresses one of this type's declared attributes.
    fn declares(&self, name: &str) -> bool {
        find_spec(&self.attributes(), name).is_some()
    }

    /// Wraps this node in a type-erased handle.
    fn into_node(self) -> AnyNode
    where
        Self: Sized,
    {
        AnyNode::new(self)
    }
}

/// An owned node of any concrete type.
///
/// Serialization and attribute access go through the node's own
/// implementation, so a [`crate::Tpl`] stored here still emits `tpl` and
/// `className` even though the holder only knows it as "a node".
pub struct AnyNode(Box<dyn Schema>);

impl AnyNode {
    pub fn new<T: Schema>(node: T) -> Self {
        AnyNode(Box::new(node))
    }

    /// True if the wrapped node is a `T`.
    pub fn is<T: Schema>(&self) -> bool {
        self.0.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Schema>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Schema>(&mut self) -> Option<&mut T> {
        self.0.as_any_mut().downcast_mut::<T>()
    }

    /// Unwraps the node as a `T`, or `None` if it is some other type.
    pub fn downcast<T: Schema>(self) -> Option<Box<T>> {
        self.0.into_any().downcast::<T>().ok()
    }
}

impl Deref for AnyNode {
    type Target = dyn Schema;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl DerefMut for AnyNode {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.0
    }
}

impl Clone for AnyNode {
    fn clone(&self) -> Self {
        self.0.clone_node()
    }
}

impl fmt::Debug for AnyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// Two handles are equal when they produce the same document.
impl PartialEq for AnyNode {
    fn eq(&self, other: &Self) -> bool {
        match (self.0.to_document(), other.0.to_document()) {
            (Ok(left), Ok(right)) => left == right,
            _ => false,
        }
    }
}

impl Serialize for AnyNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let doc = self.0.to_document().map_err(serde::ser::Error::custom)?;
        doc.serialize(serializer)
    }
}

/// Result of offering a value to a type's declared attributes.
pub(crate) enum Assign {
    Done,
    Undeclared(AttrValue),
}

/// Bulk attribute updates.
///
/// Keys are applied one by one through [`Schema::set`]. The first key that
/// fails validation stops the call; keys before it stay applied and keys
/// after it are not attempted.
pub trait Update: Schema {
    /// Sets every `(name, value)` pair, in iteration order.
    ///
    /// ```ignore
    /// tpl.update_from_mapping(serde_json::Map::from_iter([
    ///     ("id".to_string(), json!("greeting")),
    ///     ("className".to_string(), json!("text-info")),
    /// ]))?;
    /// ```
    fn update_from_mapping<I, K, V>(&mut self, mapping: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<AttrValue>,
    {
        for (key, value) in mapping {
            let key = key.as_ref();
            tracing::trace!(attribute = key, "updating attribute");
            self.set(key, value.into())?;
        }
        Ok(self)
    }

    /// Fixed-size form used by the `update!` macro.
    fn update_from_fields<const N: usize>(
        &mut self,
        fields: [(&str, AttrValue); N],
    ) -> Result<&mut Self> {
        self.update_from_mapping(fields)
    }
}

impl<T: Schema + ?Sized> Update for T {}
