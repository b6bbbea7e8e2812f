//! Tree editor
//!
//! Editing is expressed two ways: in-place primitives on the node types, and
//! a pure reducer `apply(tree, command) -> tree` built on top of them for
//! hosts that want undo/redo.

mod command;
mod mutate;
mod reducer;

#[cfg(test)]
mod property_tests;

pub use command::*;
pub use mutate::{DEFAULT_LOOKBACK, DEFAULT_RANGE_FIELD};
pub use reducer::*;
