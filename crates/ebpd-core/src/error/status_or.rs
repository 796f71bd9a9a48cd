//! A value or the error status explaining its absence

use crate::error::status::Status;

/// Result of an operation that produces a `T` on success.
///
/// Exactly one of a value or an error [`Status`] is present. Like `Status`,
/// this type assumes errors are rare: the ok path is as cheap as holding a
/// bare `T`.
///
/// ```
/// use ebpd_core::{Code, Status, StatusOr};
///
/// fn parse(bar: i32) -> StatusOr<u32> {
///     match u32::try_from(bar) {
///         Ok(value) => StatusOr::from_value(value),
///         Err(_) => Status::with_text(Code::from_errno(libc::EINVAL), "negative bar").into(),
///     }
/// }
///
/// assert_eq!(&7, parse(7).value());
/// assert_eq!("negative bar", parse(-1).status().text());
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct StatusOr<T> {
    inner: Result<T, Status>,
}

impl<T> StatusOr<T> {
    /// Successful result holding `value`.
    pub const fn from_value(value: T) -> Self {
        Self { inner: Ok(value) }
    }

    /// Failed result. `status` must be an error; an ok status is not a way
    /// to express success.
    #[must_use]
    pub fn from_status(status: Status) -> Self {
        crate::invariant!(status.is_error(), "StatusOr built from an ok status");
        Self { inner: Err(status) }
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.inner.is_ok()
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.inner.is_err()
    }

    /// The ok status when a value is present, the stored error otherwise.
    #[must_use]
    pub fn status(&self) -> Status {
        match &self.inner {
            Ok(_) => Status::OK,
            Err(status) => status.clone(),
        }
    }

    /// Borrow the value.
    ///
    /// # Panics
    /// Panics if this result holds an error.
    #[must_use]
    pub fn value(&self) -> &T {
        match &self.inner {
            Ok(value) => value,
            Err(status) => value_of_error(status),
        }
    }

    /// Mutably borrow the value.
    ///
    /// # Panics
    /// Panics if this result holds an error.
    pub fn value_mut(&mut self) -> &mut T {
        match &mut self.inner {
            Ok(value) => value,
            Err(status) => value_of_error(status),
        }
    }

    /// Take the value.
    ///
    /// # Panics
    /// Panics if this result holds an error.
    pub fn into_value(self) -> T {
        match self.inner {
            Ok(value) => value,
            Err(status) => value_of_error(&status),
        }
    }

    /// Convert into a `Result` for use with the `?` operator.
    ///
    /// # Errors
    /// Returns the error status when no value is present.
    pub fn into_result(self) -> Result<T, Status> {
        self.inner
    }

    /// Borrow as a `Result`.
    ///
    /// # Errors
    /// Returns the error status when no value is present.
    pub const fn as_result(&self) -> Result<&T, &Status> {
        self.inner.as_ref()
    }

    /// Map the value, keeping an error untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> StatusOr<U> {
        StatusOr {
            inner: self.inner.map(f),
        }
    }
}

#[cold]
#[track_caller]
fn value_of_error(status: &Status) -> ! {
    panic!("invariant violated: value of a StatusOr holding {status}")
}

impl<T> From<Status> for StatusOr<T> {
    fn from(status: Status) -> Self {
        Self::from_status(status)
    }
}

impl<T> From<Result<T, Status>> for StatusOr<T> {
    fn from(result: Result<T, Status>) -> Self {
        match result {
            Ok(value) => Self::from_value(value),
            Err(status) => Self::from_status(status),
        }
    }
}

impl<T> From<StatusOr<T>> for Result<T, Status> {
    fn from(status_or: StatusOr<T>) -> Self {
        status_or.inner
    }
}
