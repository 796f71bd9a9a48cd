//! Value primitives with explicit ownership and identity
//!
//! - `invariant` - programmer-error assertions
//! - `opaque_value` - tagged wrappers that never mix with each other
//! - `unique_value` - exclusively owned values with exactly-once cleanup
//! - `span` - non-owning views over contiguous storage

pub mod invariant;
pub mod opaque_value;
pub mod span;
pub mod unique_value;
