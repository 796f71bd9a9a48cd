//! # ebpd-core
//!
//! Foundation primitives shared by the ebpd syscall, map and loader layers.
//!
//! This crate provides:
//! - A fallible-result model: [`Code`], [`Status`], [`StatusOr`] and the
//!   short-circuiting [`return_if_error!`] / [`assign_or_return!`] operators
//! - Strict-ownership value wrappers: [`OpaqueValue`], [`UniqueValue`] and
//!   [`Span`]
//! - POSIX consumers of both: errno capture, typed file descriptors and
//!   automatically closing [`UniqueFileDescriptor`]s

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod base;
pub mod error;
pub mod posix;

pub use base::opaque_value::OpaqueValue;
pub use base::span::{Span, SpanMut, make_span, make_span_mut};
pub use base::unique_value::{Cleanup, UniqueValue};
pub use error::code::Code;
pub use error::compose::{Fallible, FromStatus};
pub use error::status::Status;
pub use error::status_or::StatusOr;
pub use posix::unique_file_descriptor::UniqueFileDescriptor;

#[doc(hidden)]
pub use pastey as __pastey;

/// Crate-level result type for code that prefers the native `?` operator
pub type Result<T> = std::result::Result<T, Status>;
