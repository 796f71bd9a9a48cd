//! File descriptors closed automatically on scope exit

use crate::base::unique_value::{Cleanup, UniqueValue};
use crate::posix::close::close;
use crate::posix::file_descriptor::{FileDescriptor, is_well_formed};
use std::os::fd::{IntoRawFd, OwnedFd};

/// Closes descriptors held by a [`UniqueFileDescriptor`].
#[derive(Debug)]
pub enum CloseFileDescriptor {}

impl Cleanup<FileDescriptor> for CloseFileDescriptor {
    fn cleanup(fd: FileDescriptor) {
        let status = close(fd);
        // Nothing to return the failure to from a destructor.
        if status.is_error() {
            tracing::warn!(fd = fd.get(), error = %status, "failed to close file descriptor");
        }
    }

    fn is_well_formed(fd: &FileDescriptor) -> bool {
        is_well_formed(*fd)
    }
}

/// An owned, movable [`FileDescriptor`] closed when dropped or overwritten.
///
/// Holding a malformed descriptor such as
/// [`INVALID_FILE_DESCRIPTOR`](crate::posix::INVALID_FILE_DESCRIPTOR) is an
/// invariant violation.
///
/// ```no_run
/// use ebpd_core::UniqueFileDescriptor;
/// use ebpd_core::posix::FileDescriptor;
///
/// {
///     let fd = UniqueFileDescriptor::new(FileDescriptor::new(3));
///     assert_eq!(3, fd.get().get());
/// } // `fd` leaves scope and is closed here
/// ```
pub type UniqueFileDescriptor = UniqueValue<FileDescriptor, CloseFileDescriptor>;

impl From<OwnedFd> for UniqueFileDescriptor {
    fn from(fd: OwnedFd) -> Self {
        let fd = FileDescriptor::new(fd.into_raw_fd());
        tracing::trace!(fd = fd.get(), "adopted file descriptor");
        Self::new(fd)
    }
}

#[cfg(test)]
mod tests {
    use super::UniqueFileDescriptor;
    use crate::posix::file_descriptor::{FileDescriptor, INVALID_FILE_DESCRIPTOR};
    use serial_test::serial;
    use std::os::fd::OwnedFd;

    #[allow(unsafe_code)]
    fn pipe() -> (FileDescriptor, FileDescriptor) {
        let mut fds = [0i32; 2];
        // SAFETY: `fds` has room for the two descriptors pipe(2) writes.
        let rv = unsafe { libc::pipe(fds.as_mut_ptr()) };
        assert_eq!(0, rv);
        (FileDescriptor::new(fds[0]), FileDescriptor::new(fds[1]))
    }

    #[allow(unsafe_code)]
    fn is_open(fd: FileDescriptor) -> bool {
        // SAFETY: F_GETFD only inspects the descriptor table.
        unsafe { libc::fcntl(fd.get(), libc::F_GETFD) != -1 }
    }

    #[test]
    fn default_is_empty() {
        let fd = UniqueFileDescriptor::default();
        assert!(!fd.has_value());
    }

    #[test]
    #[should_panic(expected = "malformed")]
    fn invalid_descriptor_is_fatal() {
        let _ = UniqueFileDescriptor::new(INVALID_FILE_DESCRIPTOR);
    }

    #[test]
    #[serial(fd)]
    fn drop_closes_descriptor() {
        let (read, write) = pipe();
        {
            let _read = UniqueFileDescriptor::new(read);
            let _write = UniqueFileDescriptor::new(write);
            assert!(is_open(read));
            assert!(is_open(write));
        }
        assert!(!is_open(read));
        assert!(!is_open(write));
    }

    #[test]
    #[serial(fd)]
    fn move_keeps_descriptor_open() {
        let (read, write) = pipe();
        let _write = UniqueFileDescriptor::new(write);
        let mut a = UniqueFileDescriptor::new(read);
        let b = a.take();
        drop(a);
        assert!(is_open(read));
        drop(b);
        assert!(!is_open(read));
    }

    #[test]
    #[serial(fd)]
    fn overwrite_closes_previous_descriptor() {
        let (read, write) = pipe();
        let mut holder = UniqueFileDescriptor::new(read);
        holder.replace(UniqueFileDescriptor::new(write));
        assert!(!is_open(read));
        assert!(is_open(write));
        drop(holder);
        assert!(!is_open(write));
    }

    #[test]
    #[serial(fd)]
    fn release_leaves_descriptor_open() {
        let (read, write) = pipe();
        let released = UniqueFileDescriptor::new(read).release();
        assert_eq!(Some(read), released);
        assert!(is_open(read));
        let _read = UniqueFileDescriptor::new(read);
        let _write = UniqueFileDescriptor::new(write);
    }

    #[test]
    #[serial(fd)]
    fn adopts_owned_descriptors() {
        let file = std::fs::File::open("/dev/null").unwrap();
        let fd = UniqueFileDescriptor::from(OwnedFd::from(file));
        let raw = *fd.get();
        assert!(is_open(raw));
        drop(fd);
        assert!(!is_open(raw));
    }
}
