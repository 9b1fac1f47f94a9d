use crate::attributes::{AttrType, AttrValue, AttributeKind, Extension};
use crate::document::ToDocument;
use crate::error::Result;
use crate::types::{BoolOrExpr, Mapping, NodeMap};
use serde_json::Value;

/// How an action's `data` combines with the data already in scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeMode {
    #[default]
    Merge,
    Override,
}

impl MergeMode {
    pub const NAMES: &'static [&'static str] = &["merge", "override"];

    pub fn as_str(&self) -> &'static str {
        match self {
            MergeMode::Merge => "merge",
            MergeMode::Override => "override",
        }
    }
}

impl AttrType for MergeMode {
    const KIND: AttributeKind = AttributeKind::Choice(MergeMode::NAMES);

    fn from_attr(value: AttrValue) -> Option<Self> {
        match value.as_str()? {
            "merge" => Some(MergeMode::Merge),
            "override" => Some(MergeMode::Override),
            _ => None,
        }
    }

    fn to_attr(&self) -> AttrValue {
        AttrValue::from(self.as_str())
    }
}

impl ToDocument for MergeMode {
    fn to_document(&self) -> Result<Value> {
        Ok(Value::from(self.as_str()))
    }
}

schema! {
    /// One action run by an event handler (see
    /// [`super::NodeBase::add_event_actions`]).
    pub struct Event {
        /// `toast`, `ajax`, `reload`, `setValue`, ...
        action_type: String => "actionType",
        /// Action arguments; may carry nodes (a dialog body, a drawer).
        args: NodeMap => "args",
        data: Mapping => "data",
        data_merge_mode: MergeMode => "dataMergeMode",
        prevent_default: BoolOrExpr => "preventDefault",
        stop_propagation: BoolOrExpr => "stopPropagation",
        /// Run only when this holds.
        expression: BoolOrExpr => "expression",
        output_var: String => "outputVar",
        /// Keep running later actions if this one fails.
        ignore_error: bool => "ignoreError",
    }
}

impl Default for Event {
    fn default() -> Self {
        Self {
            action_type: None,
            args: None,
            data: None,
            data_merge_mode: Some(MergeMode::Merge),
            prevent_default: Some(BoolOrExpr::Bool(false)),
            stop_propagation: Some(BoolOrExpr::Bool(false)),
            expression: None,
            output_var: None,
            ignore_error: Some(false),
            extra: Extension::new(),
        }
    }
}

impl Event {
    pub fn new(action_type: &str) -> Self {
        Self {
            action_type: Some(action_type.to_string()),
            ..Self::default()
        }
    }
}
