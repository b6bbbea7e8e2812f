//! Edit commands accepted by the reducer

use crate::expression::{GroupOperator, NodePath, ScalarValue, ValueSlot};
use serde::{Deserialize, Serialize};

/// One user edit, addressed by node path from the root group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EditCommand {
    /// "Add condition" on the group at `group`
    InsertCondition { group: Vec<usize> },
    /// "Add group" on the group at `group`
    InsertGroup { group: Vec<usize> },
    RemoveChild { group: Vec<usize>, index: usize },
    SetGroupOperator {
        group: Vec<usize>,
        operator: GroupOperator,
    },
    SetFieldName {
        condition: Vec<usize>,
        field_name: String,
    },
    SetOperation { condition: Vec<usize>, key: String },
    SetScalarValue {
        condition: Vec<usize>,
        slot: ValueSlot,
        value: ScalarValue,
    },
    SetLookback { condition: Vec<usize>, lookback: String },
    SetRangeField { condition: Vec<usize>, enabled: bool },
}

impl EditCommand {
    /// Path of the node the command targets
    pub fn target(&self) -> NodePath {
        match self {
            EditCommand::InsertCondition { group }
            | EditCommand::InsertGroup { group }
            | EditCommand::RemoveChild { group, .. }
            | EditCommand::SetGroupOperator { group, .. } => NodePath::from_slice(group),
            EditCommand::SetFieldName { condition, .. }
            | EditCommand::SetOperation { condition, .. }
            | EditCommand::SetScalarValue { condition, .. }
            | EditCommand::SetLookback { condition, .. }
            | EditCommand::SetRangeField { condition, .. } => NodePath::from_slice(condition),
        }
    }

    /// Stable name for logging
    pub fn name(&self) -> &'static str {
        match self {
            EditCommand::InsertCondition { .. } => "insert_condition",
            EditCommand::InsertGroup { .. } => "insert_group",
            EditCommand::RemoveChild { .. } => "remove_child",
            EditCommand::SetGroupOperator { .. } => "set_group_operator",
            EditCommand::SetFieldName { .. } => "set_field_name",
            EditCommand::SetOperation { .. } => "set_operation",
            EditCommand::SetScalarValue { .. } => "set_scalar_value",
            EditCommand::SetLookback { .. } => "set_lookback",
            EditCommand::SetRangeField { .. } => "set_range_field",
        }
    }
}
