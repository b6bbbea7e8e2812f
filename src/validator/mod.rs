//! Structural validation of filter trees
//!
//! Validation never fails: it reports flags per node so the host can show
//! inline errors while the user keeps editing, and gate submission on
//! `has_errors`.

use crate::expression::{ConditionNode, ExpressionNode, GroupNode, NodePath, ValueShape};
use crate::operator::{find_by_key, MATCHES_PATTERN_KEY};
use regex::Regex;
use serde::Serialize;

/// Problems found on one condition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionErrors {
    pub missing_field: bool,
    /// Operator unset, unknown, or not matching the node's discriminant
    pub missing_operation: bool,
    /// Pattern operator whose value is not a valid regular expression
    pub invalid_pattern: bool,
}

impl ConditionErrors {
    pub fn any(&self) -> bool {
        self.missing_field || self.missing_operation || self.invalid_pattern
    }
}

/// Problems found on one group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupErrors {
    pub empty_children: bool,
}

impl GroupErrors {
    pub fn any(&self) -> bool {
        self.empty_children
    }
}

/// Aggregated result for a whole tree; only nodes with errors are listed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub has_errors: bool,
    pub conditions: Vec<(NodePath, ConditionErrors)>,
    pub groups: Vec<(NodePath, GroupErrors)>,
}

impl ValidationReport {
    pub fn condition(&self, path: &NodePath) -> Option<&ConditionErrors> {
        self.conditions.iter().find(|(p, _)| p == path).map(|(_, e)| e)
    }

    pub fn group(&self, path: &NodePath) -> Option<&GroupErrors> {
        self.groups.iter().find(|(p, _)| p == path).map(|(_, e)| e)
    }

    pub fn error_count(&self) -> usize {
        self.conditions.len() + self.groups.len()
    }
}

pub fn validate_condition(c: &ConditionNode) -> ConditionErrors {
    let missing_operation = match find_by_key(&c.operation_key) {
        Some(def) => def.serialization_tag != c.tag,
        None => true,
    };
    ConditionErrors {
        missing_field: c.field_name.is_empty(),
        missing_operation,
        invalid_pattern: has_invalid_pattern(c),
    }
}

/// Only the root group is checked for emptiness; nested empty groups pass
pub fn validate_group(g: &GroupNode, is_root: bool) -> GroupErrors {
    GroupErrors {
        empty_children: is_root && g.children.is_empty(),
    }
}

/// Validate every node below and including `root`
pub fn validate_tree(root: &GroupNode) -> ValidationReport {
    let mut report = ValidationReport::default();
    walk_group(root, NodePath::root(), true, &mut report);
    report.has_errors = report.error_count() > 0;
    report
}

/// Convenience for hosts that only need the submit gate
pub fn has_errors(root: &GroupNode) -> bool {
    validate_tree(root).has_errors
}

fn walk_group(group: &GroupNode, path: NodePath, is_root: bool, report: &mut ValidationReport) {
    let errors = validate_group(group, is_root);
    if errors.any() {
        report.groups.push((path.clone(), errors));
    }

    for (idx, child) in group.children.iter().enumerate() {
        let child_path = path.child(idx);
        match child {
            ExpressionNode::Condition(c) => {
                let errors = validate_condition(c);
                if errors.any() {
                    report.conditions.push((child_path, errors));
                }
            }
            ExpressionNode::Group(g) => walk_group(g, child_path, false, report),
        }
    }
}

fn has_invalid_pattern(c: &ConditionNode) -> bool {
    if c.operation_key != MATCHES_PATTERN_KEY {
        return false;
    }
    match &c.shape {
        ValueShape::Single(payload) => match payload.value.as_text() {
            Some(pattern) => Regex::new(pattern).is_err(),
            None => false,
        },
        _ => false,
    }
}
