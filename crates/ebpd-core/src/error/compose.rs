//! Short-circuiting composition of fallible operations
//!
//! [`return_if_error!`](crate::return_if_error) and
//! [`assign_or_return!`](crate::assign_or_return) evaluate an expression
//! once and return its error status from the enclosing function right away,
//! so a chain of fallible calls needs no manual branching:
//!
//! ```
//! use ebpd_core::{Code, Status, StatusOr, assign_or_return, return_if_error};
//!
//! fn validate(x: i32) -> Status {
//!     if x < 0 {
//!         return Status::with_text(Code::from_errno(libc::EINVAL), "negative");
//!     }
//!     Status::OK
//! }
//!
//! fn double(x: i32) -> StatusOr<i32> {
//!     StatusOr::from_value(x * 2)
//! }
//!
//! fn pipeline(x: i32) -> StatusOr<i32> {
//!     return_if_error!(validate(x));
//!     let a = assign_or_return!(double(x));
//!     let b = assign_or_return!(double(a));
//!     StatusOr::from_value(a + b)
//! }
//!
//! assert_eq!(&6, pipeline(1).value());
//! assert_eq!("negative", pipeline(-1).status().text());
//! ```
//!
//! Functions returning `Result<_, Status>` may use the native `?` operator on
//! [`Fallible::into_result`] instead; the contract is the same.

use crate::error::status::Status;
use crate::error::status_or::StatusOr;

/// Capability required by the composition operators: anything that can
/// report an error status and otherwise yields a value.
pub trait Fallible {
    /// Value produced on success.
    type Value;

    fn is_error(&self) -> bool;

    fn is_ok(&self) -> bool {
        !self.is_error()
    }

    /// Ok status on success, the error status otherwise.
    fn status(&self) -> Status;

    /// Split into the value or the exact error status.
    ///
    /// # Errors
    /// Returns the error status carried by `self`.
    fn into_result(self) -> Result<Self::Value, Status>;
}

impl Fallible for Status {
    type Value = ();

    fn is_error(&self) -> bool {
        Self::is_error(self)
    }

    fn status(&self) -> Status {
        self.clone()
    }

    fn into_result(self) -> Result<(), Status> {
        Self::into_result(self)
    }
}

impl<T> Fallible for StatusOr<T> {
    type Value = T;

    fn is_error(&self) -> bool {
        Self::is_error(self)
    }

    fn status(&self) -> Status {
        Self::status(self)
    }

    fn into_result(self) -> Result<T, Status> {
        Self::into_result(self)
    }
}

impl<T> Fallible for Result<T, Status> {
    type Value = T;

    fn is_error(&self) -> bool {
        self.is_err()
    }

    fn status(&self) -> Status {
        self.as_ref().err().cloned().unwrap_or_default()
    }

    fn into_result(self) -> Self {
        self
    }
}

/// Return types the composition operators can propagate an error status
/// into.
pub trait FromStatus {
    fn from_status(status: Status) -> Self;
}

impl FromStatus for Status {
    fn from_status(status: Status) -> Self {
        status
    }
}

impl<T> FromStatus for StatusOr<T> {
    fn from_status(status: Status) -> Self {
        Self::from_status(status)
    }
}

impl<T, E: From<Status>> FromStatus for Result<T, E> {
    fn from_status(status: Status) -> Self {
        Err(E::from(status))
    }
}

/// Evaluate a [`Fallible`] expression once and return its error status from
/// the enclosing function if it failed. A success value is discarded.
///
/// The enclosing function may return [`Status`], [`StatusOr`] or any
/// `Result<_, E>` with `E: From<Status>`.
#[macro_export]
macro_rules! return_if_error {
    ($expr:expr $(,)?) => {
        if let ::core::result::Result::Err(status) = $crate::Fallible::into_result($expr) {
            return $crate::error::compose::FromStatus::from_status(status);
        }
    };
}

/// Evaluate a [`Fallible`] expression once; on success evaluate to its value,
/// on error return the error status from the enclosing function.
///
/// Works both for new bindings and for overwriting existing places:
///
/// ```
/// use ebpd_core::{StatusOr, assign_or_return};
///
/// fn sum(input: StatusOr<i32>) -> StatusOr<i32> {
///     let mut a = 0;
///     a = assign_or_return!(input.clone());
///     let b: i32 = assign_or_return!(input.clone());
///     StatusOr::from_value(a + b)
/// }
///
/// assert_eq!(&66, sum(StatusOr::from_value(33)).value());
/// ```
#[macro_export]
macro_rules! assign_or_return {
    ($expr:expr $(,)?) => {
        match $crate::Fallible::into_result($expr) {
            ::core::result::Result::Ok(value) => value,
            ::core::result::Result::Err(status) => {
                return $crate::error::compose::FromStatus::from_status(status);
            }
        }
    };
}
