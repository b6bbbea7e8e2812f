//! Expression tree nodes

use crate::config::GROUP_MARKER;
use crate::error::{FilterError, Result};
use crate::expression::path::NodePath;
use crate::expression::value::ValueShape;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a group combines its children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupOperator {
    #[default]
    And,
    Or,
}

impl GroupOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupOperator::And => "AND",
            GroupOperator::Or => "OR",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            GroupOperator::And => GroupOperator::Or,
            GroupOperator::Or => GroupOperator::And,
        }
    }
}

impl fmt::Display for GroupOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupOperator {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "AND" => Ok(GroupOperator::And),
            "OR" => Ok(GroupOperator::Or),
            other => Err(other.to_string()),
        }
    }
}

/// Leaf comparing one field against a value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConditionNode {
    /// Wire discriminant, normally the active operator's serialization tag
    pub tag: String,
    pub field_name: String,
    pub operation_key: String,
    pub shape: ValueShape,
    pub queryable: bool,
}

impl ConditionNode {
    /// Blank condition: no tag, field or operator
    pub fn new() -> Self {
        Self::default()
    }
}

/// Composite combining its children with AND/OR
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupNode {
    /// Wire discriminant, kept verbatim for round-trips
    pub tag: String,
    pub operator: GroupOperator,
    pub children: Vec<ExpressionNode>,
}

impl Default for GroupNode {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupNode {
    /// New AND group holding exactly one blank condition
    pub fn new() -> Self {
        Self {
            tag: GROUP_MARKER.to_string(),
            operator: GroupOperator::And,
            children: vec![ExpressionNode::Condition(ConditionNode::new())],
        }
    }

    /// Group with the given children and the default tag
    pub fn with_children(operator: GroupOperator, children: Vec<ExpressionNode>) -> Self {
        Self {
            tag: GROUP_MARKER.to_string(),
            operator,
            children,
        }
    }

    /// Node at `path` relative to this group (the empty path is not a child)
    pub fn node_at(&self, path: &NodePath) -> Option<&ExpressionNode> {
        let (&first, rest) = path.indices().split_first()?;
        let mut node = self.children.get(first)?;
        for &idx in rest {
            node = node.as_group()?.children.get(idx)?;
        }
        Some(node)
    }

    /// Group at `path`; the empty path is this group
    pub fn group_at(&self, path: &NodePath) -> Result<&GroupNode> {
        if path.is_root() {
            return Ok(self);
        }
        self.node_at(path)
            .ok_or_else(|| FilterError::InvalidPath(path.clone()))?
            .as_group()
            .ok_or_else(|| FilterError::NotAGroup(path.clone()))
    }

    pub fn group_at_mut(&mut self, path: &NodePath) -> Result<&mut GroupNode> {
        let mut group = self;
        for &idx in path.indices() {
            group = match group.children.get_mut(idx) {
                Some(ExpressionNode::Group(g)) => g,
                Some(ExpressionNode::Condition(_)) => {
                    return Err(FilterError::NotAGroup(path.clone()))
                }
                None => return Err(FilterError::InvalidPath(path.clone())),
            };
        }
        Ok(group)
    }

    pub fn condition_at_mut(&mut self, path: &NodePath) -> Result<&mut ConditionNode> {
        let (parent, idx) = path
            .split_last()
            .ok_or_else(|| FilterError::NotACondition(path.clone()))?;
        let group = self
            .group_at_mut(&parent)
            .map_err(|_| FilterError::InvalidPath(path.clone()))?;
        match group.children.get_mut(idx) {
            Some(ExpressionNode::Condition(c)) => Ok(c),
            Some(ExpressionNode::Group(_)) => Err(FilterError::NotACondition(path.clone())),
            None => Err(FilterError::InvalidPath(path.clone())),
        }
    }

    /// Number of conditions in this group and all nested groups
    pub fn condition_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                ExpressionNode::Condition(_) => 1,
                ExpressionNode::Group(g) => g.condition_count(),
            })
            .sum()
    }
}

/// A node of the filter tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionNode {
    Condition(ConditionNode),
    Group(GroupNode),
}

impl ExpressionNode {
    pub fn is_group(&self) -> bool {
        matches!(self, ExpressionNode::Group(_))
    }

    /// Wire discriminant of this node
    pub fn tag(&self) -> &str {
        match self {
            ExpressionNode::Condition(c) => &c.tag,
            ExpressionNode::Group(g) => &g.tag,
        }
    }

    pub fn as_group(&self) -> Option<&GroupNode> {
        match self {
            ExpressionNode::Group(g) => Some(g),
            ExpressionNode::Condition(_) => None,
        }
    }

    pub fn as_condition(&self) -> Option<&ConditionNode> {
        match self {
            ExpressionNode::Condition(c) => Some(c),
            ExpressionNode::Group(_) => None,
        }
    }
}

impl From<ConditionNode> for ExpressionNode {
    fn from(node: ConditionNode) -> Self {
        ExpressionNode::Condition(node)
    }
}

impl From<GroupNode> for ExpressionNode {
    fn from(node: GroupNode) -> Self {
        ExpressionNode::Group(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GroupNode {
        // [C, G[C, G[C]], C]
        let inner = GroupNode::new();
        let mut middle = GroupNode::new();
        middle.children.push(inner.into());
        GroupNode::with_children(
            GroupOperator::Or,
            vec![
                ConditionNode::new().into(),
                middle.into(),
                ConditionNode::new().into(),
            ],
        )
    }

    #[test]
    fn test_new_condition_is_blank() {
        let c = ConditionNode::new();
        assert_eq!(c.tag, "");
        assert_eq!(c.field_name, "");
        assert_eq!(c.operation_key, "");
        assert!(c.shape.is_none());
        assert!(!c.queryable);
    }

    #[test]
    fn test_new_group_has_one_blank_condition() {
        let g = GroupNode::new();
        assert_eq!(g.tag, "GroupCondition");
        assert_eq!(g.operator, GroupOperator::And);
        assert_eq!(g.children, vec![ExpressionNode::Condition(ConditionNode::new())]);
    }

    #[test]
    fn test_is_group() {
        assert!(ExpressionNode::from(GroupNode::new()).is_group());
        assert!(!ExpressionNode::from(ConditionNode::new()).is_group());
    }

    #[test]
    fn test_navigation() {
        let tree = sample();
        assert!(tree.node_at(&NodePath::from([1, 1])).unwrap().is_group());
        assert!(tree.node_at(&NodePath::from([1, 1, 0])).unwrap().as_condition().is_some());
        assert!(tree.node_at(&NodePath::from([0, 0])).is_none());
        assert!(tree.node_at(&NodePath::from([7])).is_none());
        assert!(tree.node_at(&NodePath::root()).is_none());
        assert_eq!(tree.condition_count(), 4);
    }

    #[test]
    fn test_mut_lookup_errors() {
        let mut tree = sample();
        assert!(matches!(
            tree.group_at_mut(&NodePath::from([0])),
            Err(FilterError::NotAGroup(_))
        ));
        assert!(matches!(
            tree.group_at_mut(&NodePath::from([9])),
            Err(FilterError::InvalidPath(_))
        ));
        assert!(matches!(
            tree.condition_at_mut(&NodePath::from([1])),
            Err(FilterError::NotACondition(_))
        ));
        assert!(matches!(
            tree.condition_at_mut(&NodePath::root()),
            Err(FilterError::NotACondition(_))
        ));
        assert!(tree.condition_at_mut(&NodePath::from([1, 0])).is_ok());
        assert!(tree.group_at(&NodePath::root()).is_ok());
    }

    #[test]
    fn test_group_operator_text() {
        assert_eq!("OR".parse::<GroupOperator>(), Ok(GroupOperator::Or));
        assert!("or".parse::<GroupOperator>().is_err());
        assert_eq!(GroupOperator::And.toggled(), GroupOperator::Or);
        assert_eq!(GroupOperator::Or.to_string(), "OR");
    }
}
