//! Concrete node types.
//!
//! | Type | `type` | Role |
//! |------|--------|------|
//! | [`AmisNode`] | caller sets | any component without a dedicated struct |
//! | [`Tpl`] | `tpl` | template text |
//! | [`Page`] | `page` | root of an exported document |
//! | [`AmisApi`] | none | remote call descriptor |
//! | [`Event`] | none | one action of an event handler |
//! | [`ApiOut`] | none | response envelope a backend returns to amis |

mod api;
mod base;
mod event;
mod page;
mod tpl;

pub use api::{AmisApi, ApiMethod, ApiOut};
pub use base::{AmisNode, NodeBase};
pub use event::{Event, MergeMode};
pub use page::Page;
pub use tpl::Tpl;
