//! Pure reducer over filter trees

use crate::config::ColumnCatalog;
use crate::editor::command::EditCommand;
use crate::editor::mutate::remove_at;
use crate::error::{FilterError, Result};
use crate::expression::{GroupNode, NodePath, MAX_DEPTH};

/// Apply `command` to `tree`, returning the edited copy
///
/// The input tree is never modified, so callers can keep it for undo.
pub fn apply(tree: &GroupNode, command: &EditCommand, columns: &ColumnCatalog) -> Result<GroupNode> {
    let mut next = tree.clone();
    apply_in_place(&mut next, command, columns)?;
    Ok(next)
}

/// Apply `command` directly to `root`
///
/// On error `root` is left unchanged: every command resolves its target before
/// mutating anything.
pub fn apply_in_place(root: &mut GroupNode, command: &EditCommand, columns: &ColumnCatalog) -> Result<()> {
    let target = command.target();
    tracing::debug!(command = command.name(), target = %target, "applying edit");

    match command {
        EditCommand::InsertCondition { .. } => {
            root.group_at_mut(&target)?.insert_condition();
        }
        EditCommand::InsertGroup { .. } => {
            // the new group's blank condition sits two levels below the target
            let group = root.group_at_mut(&target)?;
            if target.depth() + 1 >= MAX_DEPTH {
                return Err(FilterError::NestingTooDeep {
                    path: target,
                    max: MAX_DEPTH,
                });
            }
            group.insert_group();
        }
        EditCommand::RemoveChild { index, .. } => {
            remove_at(root, &target, *index)?;
        }
        EditCommand::SetGroupOperator { operator, .. } => {
            root.group_at_mut(&target)?.set_operator(*operator);
        }
        EditCommand::SetFieldName { field_name, .. } => {
            root.condition_at_mut(&target)?
                .set_field_name(field_name.as_str(), columns);
        }
        EditCommand::SetOperation { key, .. } => {
            root.condition_at_mut(&target)?
                .set_operation(key.as_str(), columns);
        }
        EditCommand::SetScalarValue { slot, value, .. } => {
            root.condition_at_mut(&target)?
                .set_scalar_value(*slot, value.clone(), columns);
        }
        EditCommand::SetLookback { lookback, .. } => {
            root.condition_at_mut(&target)?.set_lookback(lookback);
        }
        EditCommand::SetRangeField { enabled, .. } => {
            root.condition_at_mut(&target)?.set_range_field(*enabled);
        }
    }
    Ok(())
}

/// Apply a sequence of commands, stopping at the first failure
pub fn apply_all<'a, I>(tree: &GroupNode, commands: I, columns: &ColumnCatalog) -> Result<GroupNode>
where
    I: IntoIterator<Item = &'a EditCommand>,
{
    let mut next = tree.clone();
    for command in commands {
        apply_in_place(&mut next, command, columns)?;
    }
    Ok(next)
}

/// Path of the condition most recently inserted into the group at `group`
///
/// Mirrors the placement rule of `insert_condition`: the new condition sits
/// just before the first nested group, or last when there is none.
pub fn inserted_condition_path(tree: &GroupNode, group: &NodePath) -> Result<NodePath> {
    let target = tree.group_at(group)?;
    let idx = match target.children.iter().position(|c| c.is_group()) {
        Some(first_group) => first_group.saturating_sub(1),
        None => target.children.len().saturating_sub(1),
    };
    Ok(group.child(idx))
}
