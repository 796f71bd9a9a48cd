//! Fallible-result model
//!
//! - `code` - errno-backed error classification
//! - `status` - result of an operation with an optional causal chain
//! - `status_or` - a value or an error status
//! - `compose` - short-circuiting composition over any of the above

pub mod code;
pub mod compose;
pub mod status;
pub mod status_or;
