//! Scalar value payloads and the value shapes a condition can take

use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal entered by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl Default for ScalarValue {
    fn default() -> Self {
        ScalarValue::Text(String::new())
    }
}

impl ScalarValue {
    /// True for the empty string a fresh payload starts with
    pub fn is_blank(&self) -> bool {
        matches!(self, ScalarValue::Text(s) if s.is_empty())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ScalarValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Bool(b) => write!(f, "{}", b),
            ScalarValue::Number(n) => write!(f, "{}", n),
            ScalarValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        ScalarValue::Text(s.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        ScalarValue::Text(s)
    }
}

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        ScalarValue::Bool(b)
    }
}

impl From<i64> for ScalarValue {
    fn from(n: i64) -> Self {
        ScalarValue::Number(n.into())
    }
}

/// A typed literal; `type_tag` always equals the selected field's type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuePayload {
    pub type_tag: String,
    pub value: ScalarValue,
}

impl ValuePayload {
    pub fn new(type_tag: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        Self {
            type_tag: type_tag.into(),
            value: value.into(),
        }
    }

    /// Fresh blank payload for a field of type `type_tag`
    pub fn empty_for(type_tag: &str) -> Self {
        Self {
            type_tag: type_tag.to_string(),
            value: ScalarValue::default(),
        }
    }
}

/// Which payload of a condition a scalar edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueSlot {
    Value,
    From,
    To,
}

/// The mutually-exclusive value layouts of a condition
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValueShape {
    /// No value fields, as for null checks or an unset operator
    #[default]
    None,
    Single(ValuePayload),
    Range {
        from: Option<ValuePayload>,
        to: Option<ValuePayload>,
    },
    /// Change tracking over a lookback window
    Lookback {
        lookback: Option<String>,
        range_field: Option<String>,
    },
}

impl ValueShape {
    /// Short name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            ValueShape::None => "none",
            ValueShape::Single(_) => "value",
            ValueShape::Range { .. } => "range",
            ValueShape::Lookback { .. } => "lookback",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ValueShape::None)
    }

    /// Payload held in `slot`, if this shape carries it
    pub fn slot(&self, slot: ValueSlot) -> Option<&ValuePayload> {
        match (self, slot) {
            (ValueShape::Single(v), ValueSlot::Value) => Some(v),
            (ValueShape::Range { from, .. }, ValueSlot::From) => from.as_ref(),
            (ValueShape::Range { to, .. }, ValueSlot::To) => to.as_ref(),
            _ => None,
        }
    }

    /// Every payload present, in wire order
    pub fn payloads(&self) -> impl Iterator<Item = &ValuePayload> {
        let (a, b) = match self {
            ValueShape::Single(v) => (Some(v), None),
            ValueShape::Range { from, to } => (from.as_ref(), to.as_ref()),
            _ => (None, None),
        };
        a.into_iter().chain(b)
    }
}
