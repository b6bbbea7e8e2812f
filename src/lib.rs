//! Report Filter Core - filter expression trees for report conditions
//!
//! This crate models a boolean filter as a tree of AND/OR groups holding
//! field comparisons, edits it under the rules that keep each condition
//! consistent with its field and operator, validates it for submission, and
//! maps it to and from the JSON consumed by the backend condition evaluator.
//!
//! Everything here is synchronous and in-memory. A tree has a single writer;
//! hosts that share one across threads must serialize access themselves.
//!
//! # Example
//!
//! ```
//! use report_filter_core::{ColumnCatalog, ColumnInfo, EditCommand, EditSession, ValueSlot, WireFormat};
//!
//! let columns = ColumnCatalog::new(vec![ColumnInfo::new("name", "java.lang.String")]);
//! let mut session = EditSession::new(columns);
//! session.dispatch(&EditCommand::SetFieldName { condition: vec![0], field_name: "name".into() }).unwrap();
//! session.dispatch(&EditCommand::SetOperation { condition: vec![0], key: "EQUALS".into() }).unwrap();
//! session.dispatch(&EditCommand::SetScalarValue {
//!     condition: vec![0],
//!     slot: ValueSlot::Value,
//!     value: "acme".into(),
//! }).unwrap();
//!
//! assert!(session.can_submit());
//! let json = session.to_json(&WireFormat::default());
//! assert!(json.contains("\"queryable\":true"));
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod expression;
pub mod operator;
pub mod session;
pub mod validator;
pub mod wire;

pub use config::{ColumnCatalog, ColumnInfo, WireFormat};
pub use editor::{apply, EditCommand};
pub use error::{FilterError, Result, WireError};
pub use expression::{
    ConditionNode, ExpressionNode, GroupNode, GroupOperator, NodePath, ScalarValue, ValuePayload,
    ValueShape, ValueSlot, MAX_DEPTH,
};
pub use operator::{lookup_applicable, lookup_by_key, OperatorDefinition};
pub use session::EditSession;
pub use validator::{validate_tree, ValidationReport};
