//! Result of an operation that may encounter an error

use crate::error::code::Code;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use std::io;

/// The canonical ok status, returned by reference from [`Status::nested`].
static OK_STATUS: Status = Status::OK;

/// Describes the outcome of an operation.
///
/// A status is either ok, or an error carrying a [`Code`], descriptive text
/// and the status that caused it. Errors are assumed to be uncommon: an ok
/// status holds no allocation, while the error path carries a heap detail
/// record.
///
/// ```
/// use ebpd_core::{Code, Status};
///
/// fn check(bar: i32) -> Status {
///     if bar > 0 {
///         return Status::OK;
///     }
///     Status::with_text(Code::from_errno(libc::EINVAL), "negative bar encountered")
/// }
///
/// assert!(check(10).is_ok());
/// let status = check(-1);
/// assert_eq!("negative bar encountered", status.text());
/// ```
///
/// Equality compares the code and text only; the causal chain is ignored.
#[derive(Default)]
pub struct Status {
    detail: Option<Box<Detail>>,
}

struct Detail {
    code: Code,
    text: String,
    nested: Status,
}

impl Status {
    /// The ok status.
    pub const OK: Self = Self { detail: None };

    /// Status for `code` with no text and no cause. Both ok and error codes
    /// are accepted.
    #[must_use]
    pub fn new(code: Code) -> Self {
        if code.is_ok() {
            return Self::OK;
        }
        Self::with_nested(code, String::new(), Self::OK)
    }

    /// Error status with descriptive text.
    ///
    /// Only error statuses carry text; `code` must be an error code.
    #[must_use]
    pub fn with_text(code: Code, text: impl Into<String>) -> Self {
        Self::with_nested(code, text, Self::OK)
    }

    /// Error status with descriptive text caused by `nested`.
    ///
    /// Used to report a higher-level error while keeping the original
    /// diagnostic. `code` must be an error code.
    #[must_use]
    pub fn with_nested(code: Code, text: impl Into<String>, nested: Self) -> Self {
        crate::invariant!(code.is_error(), "an ok status carries no text or cause");
        if code.is_ok() {
            return Self::OK;
        }
        Self {
            detail: Some(Box::new(Detail {
                code,
                text: text.into(),
                nested,
            })),
        }
    }

    /// Report a new error caused by `self`.
    #[must_use]
    pub fn wrap(self, code: Code, text: impl Into<String>) -> Self {
        Self::with_nested(code, text, self)
    }

    #[must_use]
    pub fn code(&self) -> Code {
        self.detail.as_ref().map_or(Code::OK, |detail| detail.code)
    }

    /// Descriptive text, empty for ok statuses.
    #[must_use]
    pub fn text(&self) -> &str {
        self.detail.as_ref().map_or("", |detail| detail.text.as_str())
    }

    /// The status that caused this one, or the ok status when there is no
    /// cause. Never absent.
    #[must_use]
    pub fn nested(&self) -> &Self {
        self.detail.as_ref().map_or(&OK_STATUS, |detail| &detail.nested)
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.detail.is_none()
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        !self.is_ok()
    }

    /// Iterate over the error chain, starting with `self`. Empty for ok
    /// statuses.
    pub fn chain(&self) -> Chain<'_> {
        Chain {
            next: self.is_error().then_some(self),
        }
    }

    /// The innermost error of the chain, or `self` when ok.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        self.chain().last().unwrap_or(self)
    }

    /// Convert into a `Result` for use with the `?` operator.
    ///
    /// # Errors
    /// Returns `self` when it is an error status.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_ok() { Ok(()) } else { Err(self) }
    }
}

/// Iterator over a causal chain, proximate error first.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a Status>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Status;

    fn next(&mut self) -> Option<&'a Status> {
        let current = self.next?;
        let nested = current.nested();
        self.next = nested.is_error().then_some(nested);
        Some(current)
    }
}

// Clone and drop walk the chain iteratively so depth is bounded by the heap.
impl Clone for Status {
    fn clone(&self) -> Self {
        let links: Vec<&Self> = self.chain().collect();
        links.into_iter().rev().fold(Self::OK, |nested, link| Self {
            detail: Some(Box::new(Detail {
                code: link.code(),
                text: link.text().to_owned(),
                nested,
            })),
        })
    }
}

impl Drop for Status {
    fn drop(&mut self) {
        let mut next = self.detail.take();
        while let Some(mut detail) = next {
            next = detail.nested.detail.take();
        }
    }
}

impl PartialEq for Status {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code() && self.text() == other.text()
    }
}

impl Eq for Status {}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text().is_empty() {
            write!(f, "{}", self.code())
        } else {
            write!(f, "{}: {}", self.code(), self.text())
        }
    }
}

impl fmt::Debug for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(detail) = &self.detail else {
            return f.write_str("Status(OK)");
        };
        let mut debug = f.debug_struct("Status");
        debug.field("code", &detail.code).field("text", &detail.text);
        if detail.nested.is_error() {
            debug.field("nested", &detail.nested);
        }
        debug.finish()
    }
}

impl std::error::Error for Status {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        let nested = self.nested();
        nested
            .is_error()
            .then_some(nested as &(dyn std::error::Error + 'static))
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let nested = self.nested();
        let fields = if nested.is_error() { 4 } else { 3 };
        let mut state = serializer.serialize_struct("Status", fields)?;
        state.serialize_field("code", &self.code())?;
        state.serialize_field("name", &self.code().name())?;
        state.serialize_field("text", self.text())?;
        if nested.is_error() {
            state.serialize_field("nested", nested)?;
        } else {
            state.skip_field("nested")?;
        }
        state.end()
    }
}

impl From<nix::errno::Errno> for Status {
    fn from(errno: nix::errno::Errno) -> Self {
        let code = match Code::from(errno) {
            code if code.is_ok() => Code::from_errno(libc::EIO),
            code => code,
        };
        Self::new(code)
    }
}

impl From<io::Error> for Status {
    fn from(err: io::Error) -> Self {
        let code = err
            .raw_os_error()
            .filter(|errno| *errno != 0)
            .unwrap_or(libc::EIO);
        Self::with_text(Code::from_errno(code), err.to_string())
    }
}

impl From<Status> for io::Error {
    fn from(status: Status) -> Self {
        let kind = Self::from_raw_os_error(status.code().value()).kind();
        Self::new(kind, status)
    }
}
