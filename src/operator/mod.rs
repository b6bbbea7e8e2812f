//! Operator catalog
//!
//! A fixed table of comparison operators together with the flags that decide
//! which value shape a condition takes once an operator is chosen.

mod cache;
mod catalog;


pub use cache::*;
pub use catalog::*;
