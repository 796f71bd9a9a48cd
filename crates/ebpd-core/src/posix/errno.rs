//! errno capture
//!
//! Call these immediately after the failing libc call; any intervening call
//! may overwrite errno.

use crate::{Code, Status};
use nix::errno::Errno;

/// The thread's current errno as a [`Code`].
#[must_use]
pub fn capture_errno_as_code() -> Code {
    let errno = Errno::last_raw();
    tracing::trace!(errno, "captured errno");
    Code::from_errno(errno)
}

/// The thread's current errno as an error [`Status`] described by `text`.
#[must_use]
pub fn capture_errno_as_status(text: &str) -> Status {
    Status::with_text(capture_errno_as_code(), text)
}

/// Capture errno as a status described by `text` if `failed`, otherwise
/// return the ok status.
///
/// ```
/// use ebpd_core::posix::{FileDescriptor, ok_status_or_capture_errno_if};
///
/// let fd = FileDescriptor::new(-1);
/// let rv = unsafe { libc::close(fd.get()) };
/// let status = ok_status_or_capture_errno_if(rv == -1, "close() failed");
/// assert_eq!(libc::EBADF, status.code().value());
/// ```
#[must_use]
pub fn ok_status_or_capture_errno_if(failed: bool, text: &str) -> Status {
    if failed {
        capture_errno_as_status(text)
    } else {
        Status::OK
    }
}
