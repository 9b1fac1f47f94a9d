//! # Amiskit Architecture
//!
//! Amiskit is a **typed model of amis UI schemas**. Pages are built as trees of
//! Rust structs, edited in place, and exported as the JSON documents the amis
//! browser runtime renders. Nothing here interprets what the runtime
//! evaluates: expressions, data mappings and actions are opaque strings.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Shell Rendering (render.rs, config.rs, envelope crate)     │
//! │  - Wraps an exported Page in an HTML document               │
//! │  - Templates resolved by name from a TemplateSource         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Nodes (nodes/*.rs, types.rs)                               │
//! │  - Page, Tpl, AmisNode, AmisApi, Event, ApiOut              │
//! │  - Union values: Template, SchemaNode, Api, ...             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Node Machinery (schema.rs, macros.rs, document.rs)         │
//! │  - Schema trait, AnyNode handle, Update trait               │
//! │  - Generated by-name access and JSON export                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Attributes (attributes/)                                   │
//! │  - AttributeSpec table, AttrValue, strict AttrType checks   │
//! │  - Extension map for undeclared attributes                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Export Contract
//!
//! For every node, at every depth:
//!
//! - A declared attribute that is absent (`None`) is left out, never `null`.
//! - A declared attribute is written under its wire name (`visibleOn`), never
//!   its Rust name (`visible_on`).
//! - Extension attributes are always written, after the declared ones, in the
//!   order they were first set.
//! - A node stored as "any node" is written as what it really is: a [`Tpl`]
//!   inside a [`SchemaNode`] keeps its `tpl` and `className`.
//!
//! ## Example
//!
//! ```rust
//! use amiskit::{AmisApi, Page, Schema, Tpl};
//!
//! let mut greeting = Tpl::new("Hello ${name}");
//! amiskit::update!(greeting, class_name = "lead", visible_on = "${name}").unwrap();
//!
//! let page = Page {
//!     title: Some("Welcome".into()),
//!     init_api: Some(AmisApi::get("/api/me").into()),
//!     body: Some(greeting.into_node().into()),
//!     ..Page::default()
//! };
//!
//! let json = page.to_text().unwrap();
//! assert!(json.starts_with(r#"{"type":"page","title":"Welcome","body":{"type":"tpl""#));
//! ```
//!
//! ## Module Overview
//!
//! - [`attributes`]: Attribute specs, dynamic values and the extension map
//! - [`schema`]: The [`Schema`] trait, [`AnyNode`] and [`Update`]
//! - [`nodes`]: Concrete node types
//! - [`types`]: Union value types and aliases
//! - [`document`]: JSON export of attribute values
//! - [`render`]: HTML shell rendering
//! - [`config`]: `amis.json` configuration
//! - [`error`]: Error types

#[macro_use]
mod macros;

pub mod attributes;
pub mod config;
pub mod document;
pub mod error;
pub mod nodes;
pub mod render;
pub mod schema;
pub mod types;

pub use attributes::{AttrValue, AttributeKind, AttributeSpec, Extension};
pub use config::AmisConfig;
pub use error::{AmisError, Result};
pub use nodes::{AmisApi, AmisNode, ApiMethod, ApiOut, Event, MergeMode, NodeBase, Page, Tpl};
pub use render::RenderOptions;
pub use schema::{AnyNode, Schema, Update};
pub use types::{Api, BoolOrExpr, Expression, Mapping, NodeMap, SchemaNode, Template, TextOrMap};

pub use envelope::{DirSource, MemorySource, Shell, StaticSource, TemplateSource};
