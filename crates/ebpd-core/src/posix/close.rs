//! close(2)

use crate::Status;
use crate::posix::errno::ok_status_or_capture_errno_if;
use crate::posix::file_descriptor::FileDescriptor;

/// Close `fd`.
///
/// See `man 2 close`. The descriptor is released even when an error is
/// reported, so the call must not be retried.
#[must_use]
pub fn close(fd: FileDescriptor) -> Status {
    #[allow(unsafe_code)]
    // SAFETY: close(2) has no memory safety requirements.
    let rv = unsafe { libc::close(fd.get()) };
    ok_status_or_capture_errno_if(rv == -1, "close() failed")
}
