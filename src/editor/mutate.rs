//! In-place editing primitives
//!
//! These implement the reset policies that keep a condition consistent with
//! its field and operator: choosing a field clears the operator and values,
//! choosing an operator rebuilds the value shape from the operator's flags.

use crate::config::ColumnCatalog;
use crate::error::{FilterError, Result};
use crate::expression::{
    ConditionNode, ExpressionNode, GroupNode, GroupOperator, NodePath, ScalarValue, ValuePayload,
    ValueShape, ValueSlot,
};
use crate::operator::{lookup_by_key, EQUALS_KEY};

/// Lookback written when a change-tracking operator is chosen
pub const DEFAULT_LOOKBACK: &str = "0";
/// Range-field flag written when a change-tracking operator is chosen
pub const DEFAULT_RANGE_FIELD: &str = "false";

impl GroupNode {
    /// Insert a blank condition ahead of the first nested group
    ///
    /// Conditions stay contiguous in front of groups. Returns the index the
    /// new condition landed at.
    pub fn insert_condition(&mut self) -> usize {
        let node = ExpressionNode::Condition(ConditionNode::new());
        match self.children.iter().position(ExpressionNode::is_group) {
            Some(idx) => {
                self.children.insert(idx, node);
                idx
            }
            None => {
                self.children.push(node);
                self.children.len() - 1
            }
        }
    }

    /// Append a new group (with its one blank condition) at the end
    pub fn insert_group(&mut self) -> usize {
        self.children.push(ExpressionNode::Group(GroupNode::new()));
        self.children.len() - 1
    }

    /// Remove and return the child at `index`
    pub fn remove_child(&mut self, index: usize) -> Option<ExpressionNode> {
        if index < self.children.len() {
            Some(self.children.remove(index))
        } else {
            None
        }
    }

    pub fn set_operator(&mut self, operator: GroupOperator) {
        self.operator = operator;
    }
}

impl ConditionNode {
    /// Select a field; clears the operator and every value field
    pub fn set_field_name(&mut self, field_name: impl Into<String>, columns: &ColumnCatalog) {
        self.field_name = field_name.into();
        self.operation_key.clear();
        self.reset_value_shape(columns);
    }

    /// Select an operator; updates the discriminant and rebuilds the value shape
    pub fn set_operation(&mut self, key: impl Into<String>, columns: &ColumnCatalog) {
        self.operation_key = key.into();
        let def = lookup_by_key(&self.operation_key);
        self.tag = def.serialization_tag.clone();
        self.queryable = self.operation_key == EQUALS_KEY;
        self.reset_value_shape(columns);
    }

    /// Drop all value fields and rebuild the shape the operator calls for
    pub fn reset_value_shape(&mut self, columns: &ColumnCatalog) {
        let def = lookup_by_key(&self.operation_key);
        let type_tag = columns.type_of(&self.field_name);

        self.shape = if def.is_range {
            ValueShape::Range {
                from: Some(ValuePayload::empty_for(type_tag)),
                to: Some(ValuePayload::empty_for(type_tag)),
            }
        } else if def.disable_value_field {
            ValueShape::None
        } else if def.is_change_tracking {
            ValueShape::Lookback {
                lookback: Some(DEFAULT_LOOKBACK.to_string()),
                range_field: Some(DEFAULT_RANGE_FIELD.to_string()),
            }
        } else {
            ValueShape::Single(ValuePayload::empty_for(type_tag))
        };
    }

    /// Set the literal held in `slot`
    ///
    /// An absent slot is first initialised from the field's blank payload. A
    /// slot that belongs to another shape replaces the current shape, so a
    /// condition never carries two shapes at once.
    pub fn set_scalar_value(
        &mut self,
        slot: ValueSlot,
        raw: impl Into<ScalarValue>,
        columns: &ColumnCatalog,
    ) {
        let raw = raw.into();
        let type_tag = columns.type_of(&self.field_name);
        let blank = || ValuePayload::empty_for(type_tag);

        let carries_slot = matches!(
            (slot, &self.shape),
            (ValueSlot::Value, ValueShape::Single(_))
                | (ValueSlot::From | ValueSlot::To, ValueShape::Range { .. })
        );
        if !carries_slot {
            self.shape = match slot {
                ValueSlot::Value => ValueShape::Single(blank()),
                ValueSlot::From | ValueSlot::To => ValueShape::Range { from: None, to: None },
            };
        }

        match (slot, &mut self.shape) {
            (ValueSlot::Value, ValueShape::Single(payload)) => payload.value = raw,
            (ValueSlot::From, ValueShape::Range { from, .. }) => {
                from.get_or_insert_with(blank).value = raw
            }
            (ValueSlot::To, ValueShape::Range { to, .. }) => {
                to.get_or_insert_with(blank).value = raw
            }
            _ => {}
        }
    }

    /// Set the lookback window, switching to the lookback shape if needed
    pub fn set_lookback(&mut self, raw: impl ToString) {
        let raw = raw.to_string();
        match &mut self.shape {
            ValueShape::Lookback { lookback, .. } => *lookback = Some(raw),
            shape => {
                *shape = ValueShape::Lookback {
                    lookback: Some(raw),
                    range_field: None,
                }
            }
        }
    }

    /// Set the "compare against range field" flag of a change-tracking condition
    pub fn set_range_field(&mut self, enabled: bool) {
        let flag = enabled.to_string();
        match &mut self.shape {
            ValueShape::Lookback { range_field, .. } => *range_field = Some(flag),
            shape => {
                *shape = ValueShape::Lookback {
                    lookback: None,
                    range_field: Some(flag),
                }
            }
        }
    }
}

/// Remove the node at `path` from its parent group
pub(crate) fn remove_at(root: &mut GroupNode, group: &NodePath, index: usize) -> Result<ExpressionNode> {
    let target = root.group_at_mut(group)?;
    let len = target.children.len();
    target
        .remove_child(index)
        .ok_or_else(|| FilterError::ChildIndexOutOfRange {
            path: group.clone(),
            index,
            len,
        })
}
