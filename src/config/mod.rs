//! Configuration supplied by the host
//!
//! The host provides the column catalog once per edit session and may override
//! the JSON key names used on the wire.

mod column;
mod wire_format;

pub use column::*;
pub use wire_format::*;
