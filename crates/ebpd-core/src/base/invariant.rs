//! Programmer-error assertions
//!
//! The `invariant!` family documents preconditions that are not data
//! dependent. A failure implies a logic error by the caller that should be
//! statically preventable but cannot be statically verified. Failures are
//! fatal in builds with `debug_assertions` and compiled out otherwise.
//!
//! Recoverable failures never go through these macros; they are returned as
//! [`Status`](crate::Status) values.
//!
//! The checked expression is not evaluated in release builds, so it must be
//! free of side effects:
//!
//! ```
//! use ebpd_core::invariant;
//!
//! fn pop(stack: &mut Vec<u32>) -> u32 {
//!     invariant!(!stack.is_empty(), "pop from an empty stack");
//!     stack.pop().unwrap_or_default()
//! }
//!
//! assert_eq!(7, pop(&mut vec![7]));
//! ```

/// Assert that `pred` holds.
#[macro_export]
macro_rules! invariant {
    ($pred:expr $(,)?) => {
        ::core::debug_assert!($pred, "invariant violated: {}", ::core::stringify!($pred))
    };
    ($pred:expr, $($arg:tt)+) => {
        ::core::debug_assert!($pred, $($arg)+)
    };
}
