//! Wire JSON to in-memory tree

use crate::config::{WireFormat, GROUP_MARKER};
use crate::error::{Result, WireError};
use crate::expression::{
    ConditionNode, ExpressionNode, GroupNode, GroupOperator, NodePath, ScalarValue, ValuePayload,
    ValueShape, MAX_DEPTH,
};
use crate::operator::find_by_tag;
use crate::wire::serializer::{
    KEY_CONDITIONS, KEY_FIELD_NAME, KEY_FROM, KEY_LOOKBACK, KEY_OPERATION, KEY_OPERATOR,
    KEY_QUERYABLE, KEY_RANGE_FIELD, KEY_TO, KEY_VALUE,
};
use serde_json::{Map, Value};

/// Whether a wire discriminant names a group
pub fn is_group_tag(tag: &str) -> bool {
    tag.contains(GROUP_MARKER)
}

/// Map wire JSON onto a node
///
/// Discriminants that match no known operator are kept verbatim; they show up
/// later as a validation error, not here.
pub fn from_value(value: &Value, format: &WireFormat) -> Result<ExpressionNode> {
    Ok(node_from_value(value, format, &NodePath::root())?)
}

fn node_from_value(
    value: &Value,
    format: &WireFormat,
    at: &NodePath,
) -> std::result::Result<ExpressionNode, WireError> {
    if at.depth() > MAX_DEPTH {
        return Err(WireError::TooDeep(MAX_DEPTH));
    }
    let map = value
        .as_object()
        .ok_or_else(|| WireError::NotAnObject(at.to_string()))?;
    let tag = required_str(map, &format.discriminant_key, at)?;

    if is_group_tag(tag) {
        group_from_map(tag, map, format, at).map(ExpressionNode::Group)
    } else {
        condition_from_map(tag, map, format, at).map(ExpressionNode::Condition)
    }
}

fn group_from_map(
    tag: &str,
    map: &Map<String, Value>,
    format: &WireFormat,
    at: &NodePath,
) -> std::result::Result<GroupNode, WireError> {
    let operator = required_str(map, KEY_OPERATOR, at)?;
    let operator: GroupOperator = operator.parse().map_err(WireError::UnknownGroupOperator)?;

    let children = match present(map, KEY_CONDITIONS) {
        None => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| node_from_value(item, format, &at.child(idx)))
            .collect::<std::result::Result<Vec<_>, _>>()?,
        Some(_) => return Err(wrong_type(KEY_CONDITIONS, at, "an array")),
    };

    Ok(GroupNode {
        tag: tag.to_string(),
        operator,
        children,
    })
}

fn condition_from_map(
    tag: &str,
    map: &Map<String, Value>,
    format: &WireFormat,
    at: &NodePath,
) -> std::result::Result<ConditionNode, WireError> {
    let tag = format.operator_tag_from_wire(tag);
    if !tag.is_empty() && find_by_tag(&tag).is_none() {
        tracing::warn!(discriminant = %tag, at = %at, "preserving unknown condition discriminant");
    }

    let field_name = optional_str(map, KEY_FIELD_NAME, at)?.unwrap_or_default();
    let operation_key = optional_str(map, KEY_OPERATION, at)?.unwrap_or_default();
    let queryable = match present(map, KEY_QUERYABLE) {
        None => false,
        Some(Value::Bool(b)) => *b,
        Some(_) => return Err(wrong_type(KEY_QUERYABLE, at, "a boolean")),
    };

    Ok(ConditionNode {
        tag: tag.into_owned(),
        field_name: field_name.to_string(),
        operation_key: operation_key.to_string(),
        shape: shape_from_map(map, format, at)?,
        queryable,
    })
}

fn shape_from_map(
    map: &Map<String, Value>,
    format: &WireFormat,
    at: &NodePath,
) -> std::result::Result<ValueShape, WireError> {
    let value = present(map, KEY_VALUE)
        .map(|v| payload_from_value(v, KEY_VALUE, format, at))
        .transpose()?;
    let from = present(map, KEY_FROM)
        .map(|v| payload_from_value(v, KEY_FROM, format, at))
        .transpose()?;
    let to = present(map, KEY_TO)
        .map(|v| payload_from_value(v, KEY_TO, format, at))
        .transpose()?;
    let lookback = optional_str(map, KEY_LOOKBACK, at)?.map(str::to_string);
    let range_field = optional_str(map, KEY_RANGE_FIELD, at)?.map(str::to_string);

    let mut shapes: Vec<ValueShape> = Vec::with_capacity(1);
    if let Some(value) = value {
        shapes.push(ValueShape::Single(value));
    }
    if from.is_some() || to.is_some() {
        shapes.push(ValueShape::Range { from, to });
    }
    if lookback.is_some() || range_field.is_some() {
        shapes.push(ValueShape::Lookback {
            lookback,
            range_field,
        });
    }

    match shapes.len() {
        0 => Ok(ValueShape::None),
        1 => Ok(shapes.remove(0)),
        _ => Err(WireError::ConflictingShapes {
            at: at.to_string(),
            first: shapes[0].name(),
            second: shapes[1].name(),
        }),
    }
}

fn payload_from_value(
    value: &Value,
    key: &str,
    format: &WireFormat,
    at: &NodePath,
) -> std::result::Result<ValuePayload, WireError> {
    let map = value
        .as_object()
        .ok_or_else(|| wrong_type(key, at, "an object"))?;
    let type_tag = required_str(map, &format.value_type_key, at)?;
    let scalar = match map.get(KEY_VALUE) {
        None => {
            return Err(WireError::MissingKey {
                key: format!("{}.{}", key, KEY_VALUE),
                at: at.to_string(),
            })
        }
        Some(Value::String(s)) => ScalarValue::Text(s.clone()),
        Some(Value::Number(n)) => ScalarValue::Number(n.clone()),
        Some(Value::Bool(b)) => ScalarValue::Bool(*b),
        Some(_) => return Err(wrong_type(key, at, "a string, number or boolean value")),
    };
    Ok(ValuePayload {
        type_tag: type_tag.to_string(),
        value: scalar,
    })
}

/// Value under `key`, treating `null` as absent
fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

fn optional_str<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    at: &NodePath,
) -> std::result::Result<Option<&'a str>, WireError> {
    match present(map, key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(wrong_type(key, at, "a string")),
    }
}

fn required_str<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    at: &NodePath,
) -> std::result::Result<&'a str, WireError> {
    optional_str(map, key, at)?.ok_or_else(|| WireError::MissingKey {
        key: key.to_string(),
        at: at.to_string(),
    })
}

fn wrong_type(key: &str, at: &NodePath, expected: &'static str) -> WireError {
    WireError::WrongType {
        key: key.to_string(),
        at: at.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;
    use serde_json::json;

    fn read(value: Value) -> Result<ExpressionNode> {
        from_value(&value, &WireFormat::default())
    }

    fn wire_err(value: Value) -> WireError {
        match read(value) {
            Err(FilterError::Wire(e)) => e,
            other => panic!("expected wire error, got {:?}", other),
        }
    }

    #[test]
    fn test_is_group_tag() {
        assert!(is_group_tag("a.b.GroupCondition"));
        assert!(!is_group_tag("a.b.Equals"));
    }

    #[test]
    fn test_read_between() {
        let node = read(json!({
            "@bean": "com.cyoda.core.conditions.queryable.Between",
            "fieldName": "amount",
            "operation": "BETWEEN",
            "from": {"@type": "java.lang.Integer", "value": 1},
            "to": {"@type": "java.lang.Integer", "value": 9}
        }))
        .unwrap();
        let c = node.as_condition().unwrap();
        assert_eq!(c.operation_key, "BETWEEN");
        assert_eq!(
            c.shape,
            ValueShape::Range {
                from: Some(ValuePayload::new("java.lang.Integer", 1i64)),
                to: Some(ValuePayload::new("java.lang.Integer", 9i64)),
            }
        );
        assert!(!c.queryable);
    }

    #[test]
    fn test_unknown_discriminant_preserved() {
        let node = read(json!({
            "@bean": "com.example.conditions.SoundsLike",
            "fieldName": "name",
            "operation": "SOUNDS_LIKE",
            "value": {"@type": "java.lang.String", "value": "smith"}
        }))
        .unwrap();
        assert_eq!(node.tag(), "com.example.conditions.SoundsLike");
        assert!(!node.is_group());
    }

    #[test]
    fn test_group_substring_match() {
        let node = read(json!({
            "@bean": "com.cyoda.core.conditions.GroupCondition",
            "operator": "OR",
            "conditions": [{"@bean": "x.y.NotNull", "fieldName": "a", "operation": "NOT_NULL"}]
        }))
        .unwrap();
        let group = node.as_group().unwrap();
        assert_eq!(group.tag, "com.cyoda.core.conditions.GroupCondition");
        assert_eq!(group.operator, GroupOperator::Or);
        assert_eq!(group.children.len(), 1);
    }

    #[test]
    fn test_missing_conditions_is_empty_group() {
        let node = read(json!({"@bean": "GroupCondition", "operator": "AND"})).unwrap();
        assert!(node.as_group().unwrap().children.is_empty());
    }

    #[test]
    fn test_nulls_treated_as_absent() {
        let node = read(json!({
            "@bean": "x.IsNull",
            "fieldName": "a",
            "operation": "IS_NULL",
            "value": null,
            "queryable": null
        }))
        .unwrap();
        assert_eq!(node.as_condition().unwrap().shape, ValueShape::None);
    }

    #[test]
    fn test_conflicting_shapes_rejected() {
        let err = wire_err(json!({
            "@bean": "x.Equals",
            "value": {"@type": "t", "value": "a"},
            "lookback": "3"
        }));
        assert_eq!(
            err,
            WireError::ConflictingShapes {
                at: "/".to_string(),
                first: "value",
                second: "lookback",
            }
        );
    }

    #[test]
    fn test_malformed_documents() {
        assert!(matches!(wire_err(json!([])), WireError::NotAnObject(_)));
        assert!(matches!(
            wire_err(json!({"fieldName": "a"})),
            WireError::MissingKey { .. }
        ));
        assert!(matches!(
            wire_err(json!({"@bean": "GroupCondition", "operator": "XOR"})),
            WireError::UnknownGroupOperator(_)
        ));
        assert!(matches!(
            wire_err(json!({"@bean": "GroupCondition", "operator": "AND", "conditions": {}})),
            WireError::WrongType { .. }
        ));
        assert!(matches!(
            wire_err(json!({"@bean": "x.Equals", "value": {"@type": "t", "value": [1]}})),
            WireError::WrongType { .. }
        ));
        assert!(matches!(
            wire_err(json!({"@bean": "x.Equals", "value": {"@type": "t"}})),
            WireError::MissingKey { .. }
        ));
    }

    #[test]
    fn test_error_location_points_at_child() {
        let err = wire_err(json!({
            "@bean": "GroupCondition",
            "operator": "AND",
            "conditions": [{"@bean": "x.Equals"}, {"@bean": 5}]
        }));
        assert_eq!(
            err,
            WireError::WrongType {
                key: "@bean".to_string(),
                at: "/1".to_string(),
                expected: "a string",
            }
        );
    }

    #[test]
    fn test_depth_limit() {
        let mut doc = json!({"@bean": "x.Equals"});
        for _ in 0..=MAX_DEPTH {
            doc = json!({"@bean": "GroupCondition", "operator": "AND", "conditions": [doc]});
        }
        assert_eq!(wire_err(doc), WireError::TooDeep(MAX_DEPTH));
    }
}
