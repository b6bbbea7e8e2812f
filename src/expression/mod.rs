//! Filter expression model
//!
//! A filter is a tree of AND/OR groups whose leaves are field comparisons.
//! The root of an editable tree is always a group.

mod node;
mod path;
mod value;

pub use node::*;
pub use path::*;
pub use value::*;
