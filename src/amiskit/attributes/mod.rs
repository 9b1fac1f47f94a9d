//! # Attribute System
//!
//! Every node is an attribute container with two kinds of attributes:
//!
//! - **Declared** attributes: typed `Option<T>` fields with a fixed internal
//!   name, a wire name (the key the amis runtime reads) and a semantic kind.
//!   `None` means "absent" and is never serialized.
//! - **Extension** attributes: any other key a caller sets. They are stored in
//!   an ordered [`Extension`] map, never validated, and always serialized.
//!
//! This module provides the pieces shared by all node types:
//!
//! - **Specifications**: [`AttributeSpec`] / [`AttributeKind`] describe a declared
//!   attribute (what names address it, what shapes it accepts)
//! - **Dynamic values**: [`AttrValue`] is what the by-name API traffics in
//! - **Typed conversion**: [`AttrType`] converts between [`AttrValue`] and the
//!   field types, rejecting shapes the kind does not permit
//!
//! ## Kinds
//!
//! | Kind | Rust type | Accepts |
//! |------|-----------|---------|
//! | `Text` | `String`, `Expression` | string |
//! | `Flag` | `bool` | boolean |
//! | `Integer` | `i64` | integer |
//! | `Mapping` | `Mapping`, `NodeMap` | object (`NodeMap` values may be nodes) |
//! | `Choice` | `ApiMethod`, `MergeMode` | one of a fixed set of strings |
//! | `FlagOrExpression` | `BoolOrExpr` | boolean or string |
//! | `TextOrMapping` | `TextOrMap` | string or object |
//! | `Template` | `Template` | string, node or object |
//! | `Schema` | `SchemaNode` | string, node, object or a list of those |
//! | `Api` | `Api` | string, API descriptor or object |
//!
//! ## Usage
//!
//! ```ignore
//! // Declared: validated, addressed by internal or wire name
//! tpl.set("className", "text-danger".into())?;
//! tpl.set("class_name", "text-danger".into())?;
//!
//! // Undeclared: goes to the extension map as-is
//! tpl.set("wrapperComponent", "h1".into())?;
//!
//! // Clearing: null makes a declared attribute absent again
//! tpl.set("className", AttrValue::null())?;
//! ```

mod convert;
mod extension;
mod spec;
mod value;

pub(crate) use convert::decode;
pub use convert::AttrType;
pub use extension::Extension;
pub use spec::{find_spec, AttributeKind, AttributeSpec};
pub use value::AttrValue;
