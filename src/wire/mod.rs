//! JSON wire format
//!
//! # Shape
//!
//! ```text
//! group:     { "<disc>": "...GroupCondition", "operator": "AND"|"OR", "conditions": [node, ...] }
//! condition: { "<disc>": "<operator tag>", "fieldName": "...", "operation": "<operator key>",
//!              "value"?: payload, "from"?: payload, "to"?: payload,
//!              "lookback"?: "...", "rangeField"?: "...", "queryable"?: true }
//! payload:   { "<type key>": "<field type>", "value": string | number | bool }
//! ```
//!
//! Presence of a key encodes the value shape to the downstream evaluator, so
//! unset keys are left out rather than written as `null`. Unknown keys on
//! input are ignored. Operator tags are written in the namespace named by
//! [`WireFormat::operator_tag_prefix`].

mod deserializer;
mod serializer;


pub use deserializer::{from_value, is_group_tag};
pub use serializer::{group_to_value, to_value};

use crate::config::WireFormat;
use crate::error::{FilterError, Result};
use crate::expression::{ExpressionNode, GroupNode};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Serialize a node to a compact JSON string
pub fn to_json_string(node: &ExpressionNode, format: &WireFormat) -> String {
    to_value(node, format).to_string()
}

/// Parse a node from a JSON string
pub fn from_json_str(json: &str, format: &WireFormat) -> Result<ExpressionNode> {
    let value: Value = serde_json::from_str(json)?;
    from_value(&value, format)
}

/// Parse a document whose root must be a group
pub fn group_from_value(value: &Value, format: &WireFormat) -> Result<GroupNode> {
    match from_value(value, format)? {
        ExpressionNode::Group(group) => Ok(group),
        ExpressionNode::Condition(_) => Err(FilterError::RootNotGroup),
    }
}

impl Serialize for ExpressionNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        to_value(self, &WireFormat::default()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ExpressionNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        from_value(&value, &WireFormat::default()).map_err(D::Error::custom)
    }
}

impl Serialize for GroupNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        group_to_value(self, &WireFormat::default()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GroupNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        group_from_value(&value, &WireFormat::default()).map_err(D::Error::custom)
    }
}
