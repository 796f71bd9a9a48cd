//! Error classification codes

use nix::errno::Errno;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Copyable classification of an operation outcome.
///
/// A `Code` wraps a platform errno value. Zero, [`Code::OK`], is the only
/// success value; every other value is an error.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Code(i32);

impl Code {
    /// The success code.
    pub const OK: Self = Self(0);

    /// Code for the errno constant `errno`.
    #[must_use]
    pub const fn from_errno(errno: i32) -> Self {
        Self(errno)
    }

    /// Raw errno value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn is_ok(self) -> bool {
        self.0 == Self::OK.0
    }

    #[must_use]
    pub const fn is_error(self) -> bool {
        !self.is_ok()
    }

    /// The code as a nix errno.
    #[must_use]
    pub fn errno(self) -> Errno {
        Errno::from_raw(self.0)
    }

    /// Symbolic name, e.g. `ENOENT`.
    #[must_use]
    pub fn name(self) -> String {
        if self.is_ok() {
            return "OK".to_string();
        }
        match self.errno() {
            Errno::UnknownErrno => format!("E{}", self.0),
            errno => format!("{errno:?}"),
        }
    }

    /// Platform description of the code.
    #[must_use]
    pub fn message(self) -> &'static str {
        if self.is_ok() {
            return "success";
        }
        self.errno().desc()
    }
}

impl From<Errno> for Code {
    fn from(errno: Errno) -> Self {
        Self(errno as i32)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ok() {
            f.write_str("OK")
        } else {
            write!(f, "{} ({})", self.name(), self.message())
        }
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code({})", self.name())
    }
}
