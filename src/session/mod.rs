//! Edit session exposed to the host
//!
//! Holds the column catalog and the current tree for one editing dialog,
//! runs commands through the reducer, keeps undo/redo history and notifies
//! the host after every change.

use crate::config::{ColumnCatalog, WireFormat};
use crate::editor::{apply, EditCommand};
use crate::error::Result;
use crate::expression::GroupNode;
use crate::operator::{lookup_applicable, ApplicableOperators};
use crate::validator::{validate_tree, ValidationReport};
use crate::wire::{group_from_value, group_to_value};
use std::collections::VecDeque;

/// Callback invoked with the new tree and its validation result
pub type ChangeListener = Box<dyn FnMut(&GroupNode, &ValidationReport)>;

/// Undo entries kept before the oldest is dropped
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

pub struct EditSession {
    columns: ColumnCatalog,
    root: GroupNode,
    undo: VecDeque<GroupNode>,
    redo: Vec<GroupNode>,
    history_limit: usize,
    on_change: Option<ChangeListener>,
}

impl EditSession {
    /// Start a fresh tree: an AND group with one blank condition
    pub fn new(columns: ColumnCatalog) -> Self {
        Self::open(columns, GroupNode::new())
    }

    /// Resume editing an existing tree
    pub fn open(columns: ColumnCatalog, root: GroupNode) -> Self {
        Self {
            columns,
            root,
            undo: VecDeque::new(),
            redo: Vec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            on_change: None,
        }
    }

    /// Resume editing a persisted tree
    pub fn from_json(columns: ColumnCatalog, json: &str, format: &WireFormat) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let root = group_from_value(&value, format)?;
        Ok(Self::open(columns, root))
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut(&GroupNode, &ValidationReport) + 'static,
    {
        self.on_change = Some(Box::new(listener));
    }

    pub fn root(&self) -> &GroupNode {
        &self.root
    }

    pub fn columns(&self) -> &ColumnCatalog {
        &self.columns
    }

    /// Operators to offer for `field_name`; unknown fields get the whole catalog
    pub fn operators_for(&self, field_name: &str) -> ApplicableOperators {
        let type_short = self
            .columns
            .find(field_name)
            .map(|c| c.type_short.as_str())
            .unwrap_or("");
        lookup_applicable(type_short)
    }

    /// Apply one edit; on error the session is unchanged and nobody is notified
    pub fn dispatch(&mut self, command: &EditCommand) -> Result<&GroupNode> {
        let next = apply(&self.root, command, &self.columns).map_err(|err| {
            tracing::debug!(command = command.name(), error = %err, "edit rejected");
            err
        })?;
        let previous = std::mem::replace(&mut self.root, next);
        self.push_undo(previous);
        self.redo.clear();
        self.notify();
        Ok(&self.root)
    }

    /// Replace the whole tree, e.g. when the host loads another report
    pub fn replace(&mut self, root: GroupNode) {
        let previous = std::mem::replace(&mut self.root, root);
        self.push_undo(previous);
        self.redo.clear();
        self.notify();
    }

    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo.pop_back() else {
            return false;
        };
        let current = std::mem::replace(&mut self.root, previous);
        self.redo.push(current);
        tracing::debug!(undo_depth = self.undo.len(), "undo");
        self.notify();
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.root, next);
        self.push_undo(current);
        tracing::debug!(redo_depth = self.redo.len(), "redo");
        self.notify();
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Validation result for the current tree
    pub fn errors(&self) -> ValidationReport {
        validate_tree(&self.root)
    }

    /// Whether the host may submit the current tree
    pub fn can_submit(&self) -> bool {
        !self.errors().has_errors
    }

    pub fn to_value(&self, format: &WireFormat) -> serde_json::Value {
        group_to_value(&self.root, format)
    }

    pub fn to_json(&self, format: &WireFormat) -> String {
        self.to_value(format).to_string()
    }

    /// Give up the edited tree
    pub fn into_root(self) -> GroupNode {
        self.root
    }

    fn push_undo(&mut self, tree: GroupNode) {
        if self.history_limit == 0 {
            return;
        }
        if self.undo.len() >= self.history_limit {
            self.undo.pop_front();
        }
        self.undo.push_back(tree);
    }

    fn notify(&mut self) {
        let report = validate_tree(&self.root);
        tracing::debug!(has_errors = report.has_errors, "filter tree changed");
        if let Some(listener) = self.on_change.as_mut() {
            listener(&self.root, &report);
        }
    }
}

impl std::fmt::Debug for EditSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSession")
            .field("columns", &self.columns.len())
            .field("root", &self.root)
            .field("undo", &self.undo.len())
            .field("redo", &self.redo.len())
            .finish()
    }
}
