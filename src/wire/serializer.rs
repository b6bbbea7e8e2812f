//! In-memory tree to wire JSON

use crate::config::WireFormat;
use crate::expression::{ConditionNode, ExpressionNode, GroupNode, ScalarValue, ValuePayload, ValueShape};
use serde_json::{Map, Value};

pub(crate) const KEY_OPERATOR: &str = "operator";
pub(crate) const KEY_CONDITIONS: &str = "conditions";
pub(crate) const KEY_FIELD_NAME: &str = "fieldName";
pub(crate) const KEY_OPERATION: &str = "operation";
pub(crate) const KEY_VALUE: &str = "value";
pub(crate) const KEY_FROM: &str = "from";
pub(crate) const KEY_TO: &str = "to";
pub(crate) const KEY_LOOKBACK: &str = "lookback";
pub(crate) const KEY_RANGE_FIELD: &str = "rangeField";
pub(crate) const KEY_QUERYABLE: &str = "queryable";

/// Map a node onto its wire JSON; unset fields are omitted, never `null`
pub fn to_value(node: &ExpressionNode, format: &WireFormat) -> Value {
    match node {
        ExpressionNode::Condition(c) => condition_to_value(c, format),
        ExpressionNode::Group(g) => group_to_value(g, format),
    }
}

pub fn group_to_value(group: &GroupNode, format: &WireFormat) -> Value {
    let mut map = Map::new();
    map.insert(format.discriminant_key.clone(), Value::String(group.tag.clone()));
    map.insert(
        KEY_OPERATOR.to_string(),
        Value::String(group.operator.as_str().to_string()),
    );
    let children = group
        .children
        .iter()
        .map(|child| to_value(child, format))
        .collect();
    map.insert(KEY_CONDITIONS.to_string(), Value::Array(children));
    Value::Object(map)
}

fn condition_to_value(c: &ConditionNode, format: &WireFormat) -> Value {
    let mut map = Map::new();
    map.insert(
        format.discriminant_key.clone(),
        Value::String(format.operator_tag_to_wire(&c.tag).into_owned()),
    );
    map.insert(KEY_FIELD_NAME.to_string(), Value::String(c.field_name.clone()));
    map.insert(KEY_OPERATION.to_string(), Value::String(c.operation_key.clone()));

    match &c.shape {
        ValueShape::None => {}
        ValueShape::Single(payload) => {
            map.insert(KEY_VALUE.to_string(), payload_to_value(payload, format));
        }
        ValueShape::Range { from, to } => {
            if let Some(from) = from {
                map.insert(KEY_FROM.to_string(), payload_to_value(from, format));
            }
            if let Some(to) = to {
                map.insert(KEY_TO.to_string(), payload_to_value(to, format));
            }
        }
        ValueShape::Lookback {
            lookback,
            range_field,
        } => {
            if let Some(lookback) = lookback {
                map.insert(KEY_LOOKBACK.to_string(), Value::String(lookback.clone()));
            }
            if let Some(range_field) = range_field {
                map.insert(KEY_RANGE_FIELD.to_string(), Value::String(range_field.clone()));
            }
        }
    }

    if c.queryable {
        map.insert(KEY_QUERYABLE.to_string(), Value::Bool(true));
    }
    Value::Object(map)
}

fn payload_to_value(payload: &ValuePayload, format: &WireFormat) -> Value {
    let mut map = Map::new();
    map.insert(format.value_type_key.clone(), Value::String(payload.type_tag.clone()));
    let value = match &payload.value {
        ScalarValue::Text(s) => Value::String(s.clone()),
        ScalarValue::Number(n) => Value::Number(n.clone()),
        ScalarValue::Bool(b) => Value::Bool(*b),
    };
    map.insert(KEY_VALUE.to_string(), value);
    Value::Object(map)
}
