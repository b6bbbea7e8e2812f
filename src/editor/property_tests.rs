//! Property tests for the tree editor
//!
//! Feature: report-filter-core
//! Property 4: Choosing a field resets operator and value
//! Property 5: Choosing an operator sets the value shape its flags call for
//! Property 6: New conditions land before the first child group
//! Property 7: New groups are appended
//!
//! Reset policies must hold for every operator regardless of the prior state
//! of the condition.

use proptest::prelude::*;

use crate::config::{ColumnCatalog, ColumnInfo};
use crate::expression::{ConditionNode, ExpressionNode, GroupNode, GroupOperator, ValueShape, ValueSlot};
use crate::operator::all;

// ═══════════════════════════════════════════════════════════════════════════
// Strategy generators for property tests
// ═══════════════════════════════════════════════════════════════════════════

fn columns() -> ColumnCatalog {
    ColumnCatalog::new(vec![
        ColumnInfo::new("name", "java.lang.String"),
        ColumnInfo::new("amount", "java.math.BigDecimal"),
        ColumnInfo::new("created", "java.time.LocalDate"),
        ColumnInfo::new("active", "java.lang.Boolean"),
    ])
}

fn field_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("name".to_string()),
        Just("amount".to_string()),
        Just("created".to_string()),
        Just("active".to_string()),
        Just("unknown".to_string()),
    ]
}

fn operator_key_strategy() -> impl Strategy<Value = String> {
    (0..all().len()).prop_map(|idx| all()[idx].key.to_string())
}

/// A condition in an arbitrary prior state reached through edits
fn condition_strategy() -> impl Strategy<Value = ConditionNode> {
    (
        field_strategy(),
        operator_key_strategy(),
        prop::option::of("[a-z0-9]{0,6}"),
        prop::option::of(0u32..30),
    )
        .prop_map(|(field, key, value, lookback)| {
            let cols = columns();
            let mut c = ConditionNode::new();
            c.set_field_name(field, &cols);
            c.set_operation(key, &cols);
            if let Some(v) = value {
                c.set_scalar_value(ValueSlot::Value, v, &cols);
            }
            if let Some(n) = lookback {
                c.set_lookback(n);
            }
            c
        })
}

/// Child layout as group (true) / condition (false) flags
fn layout_strategy() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 0..8)
}

fn group_from_layout(layout: &[bool]) -> GroupNode {
    let children = layout
        .iter()
        .map(|&is_group| {
            if is_group {
                ExpressionNode::Group(GroupNode::new())
            } else {
                ExpressionNode::Condition(ConditionNode::new())
            }
        })
        .collect();
    GroupNode::with_children(GroupOperator::And, children)
}

// ═══════════════════════════════════════════════════════════════════════════
// Property Tests
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    /// Choosing a field always clears the operator and every value
    #[test]
    fn prop_set_field_resets(mut c in condition_strategy(), field in field_strategy()) {
        let cols = columns();
        c.set_field_name(field.clone(), &cols);
        prop_assert_eq!(&c.field_name, &field);
        prop_assert_eq!(c.operation_key.as_str(), "");
        match &c.shape {
            ValueShape::Single(payload) => {
                prop_assert!(payload.value.is_blank());
                prop_assert_eq!(payload.type_tag.as_str(), cols.type_of(&field));
            }
            other => prop_assert!(false, "unexpected shape {:?}", other),
        }
    }

    /// The shape after choosing an operator follows only its flags
    #[test]
    fn prop_set_operation_shape(mut c in condition_strategy(), key in operator_key_strategy()) {
        let cols = columns();
        c.set_operation(key.clone(), &cols);
        let def = crate::operator::lookup_by_key(&key);
        let type_tag = cols.type_of(&c.field_name).to_string();

        prop_assert_eq!(&c.tag, &def.serialization_tag);
        prop_assert_eq!(c.queryable, key == "EQUALS");

        if def.is_range {
            match &c.shape {
                ValueShape::Range { from: Some(f), to: Some(t) } => {
                    prop_assert_eq!(&f.type_tag, &type_tag);
                    prop_assert_eq!(&t.type_tag, &type_tag);
                    prop_assert!(f.value.is_blank() && t.value.is_blank());
                }
                other => prop_assert!(false, "expected range, got {:?}", other),
            }
        } else if def.disable_value_field {
            prop_assert_eq!(&c.shape, &ValueShape::None);
        } else if def.is_change_tracking {
            prop_assert_eq!(
                &c.shape,
                &ValueShape::Lookback {
                    lookback: Some("0".to_string()),
                    range_field: Some("false".to_string()),
                }
            );
        } else {
            match &c.shape {
                ValueShape::Single(p) => prop_assert_eq!(&p.type_tag, &type_tag),
                other => prop_assert!(false, "expected single value, got {:?}", other),
            }
        }
    }

    /// New conditions land before the first nested group and nothing else moves
    #[test]
    fn prop_insert_condition_order(layout in layout_strategy()) {
        let mut g = group_from_layout(&layout);
        let idx = g.insert_condition();

        let expected_idx = layout.iter().position(|&is_group| is_group).unwrap_or(layout.len());
        prop_assert_eq!(idx, expected_idx);

        let mut expected = layout.clone();
        expected.insert(expected_idx, false);
        let actual: Vec<bool> = g.children.iter().map(ExpressionNode::is_group).collect();
        prop_assert_eq!(actual, expected);
    }

    /// New groups always go last
    #[test]
    fn prop_insert_group_appends(layout in layout_strategy()) {
        let mut g = group_from_layout(&layout);
        let idx = g.insert_group();
        prop_assert_eq!(idx, layout.len());
        prop_assert!(g.children.last().map(ExpressionNode::is_group).unwrap_or(false));
    }
}
