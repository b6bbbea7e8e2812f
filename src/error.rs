//! Error types for the report filter core

use crate::expression::NodePath;
use thiserror::Error;

/// Main error type for the report filter core
///
/// Malformed trees are never reported through this type; they surface as
/// flags from the validator. These errors cover addressing mistakes made by
/// the host and documents that cannot be read as a filter at all.
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("No node at path {0}")]
    InvalidPath(NodePath),

    #[error("Node at path {0} is not a group")]
    NotAGroup(NodePath),

    #[error("Node at path {0} is not a condition")]
    NotACondition(NodePath),

    #[error("Child index {index} out of range for group at {path} ({len} children)")]
    ChildIndexOutOfRange {
        path: NodePath,
        index: usize,
        len: usize,
    },

    #[error("Cannot add a group under {path}: nesting is limited to {max} levels")]
    NestingTooDeep { path: NodePath, max: usize },

    #[error("Root of a filter tree must be a group")]
    RootNotGroup,

    #[error("Malformed filter document: {0}")]
    Wire(#[from] WireError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons a JSON document cannot be mapped onto an expression node
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("expected a JSON object at {0}")]
    NotAnObject(String),

    #[error("missing required key '{key}' at {at}")]
    MissingKey { key: String, at: String },

    #[error("key '{key}' at {at} must be {expected}")]
    WrongType {
        key: String,
        at: String,
        expected: &'static str,
    },

    #[error("unknown group operator '{0}' (expected AND or OR)")]
    UnknownGroupOperator(String),

    #[error("condition at {at} carries more than one value shape ({first} and {second})")]
    ConflictingShapes {
        at: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("expression nesting exceeds maximum depth of {0}")]
    TooDeep(usize),
}

/// Result type alias for the report filter core
pub type Result<T> = std::result::Result<T, FilterError>;
