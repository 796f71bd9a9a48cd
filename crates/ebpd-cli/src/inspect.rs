//! Open a path into an owned descriptor and report on it

use ebpd_core::posix::{FileDescriptor, ok_status_or_capture_errno_if};
use ebpd_core::{Code, Status, StatusOr, UniqueFileDescriptor, assign_or_return, return_if_error};
use serde::Serialize;
use std::ffi::CString;
use std::mem::MaybeUninit;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

/// What `ebpd open` learned about a path
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub path: String,
    pub fd: i32,
    pub size: u64,
}

/// Open `path` read-only. The descriptor is closed when the returned holder
/// is dropped.
#[allow(unsafe_code)]
pub fn open_read_only(path: &Path) -> StatusOr<UniqueFileDescriptor> {
    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return Status::with_text(Code::from_errno(libc::EINVAL), "path contains a NUL byte").into();
    };
    // SAFETY: `c_path` is a valid NUL-terminated string.
    let rv = unsafe { libc::open(c_path.as_ptr(), libc::O_RDONLY | libc::O_CLOEXEC) };
    return_if_error!(ok_status_or_capture_errno_if(rv == -1, "open() failed"));
    tracing::debug!(fd = rv, path = %path.display(), "opened");
    StatusOr::from_value(UniqueFileDescriptor::new(FileDescriptor::new(rv)))
}

/// Size in bytes of the file behind `fd`
#[allow(unsafe_code)]
pub fn file_size(fd: &UniqueFileDescriptor) -> StatusOr<u64> {
    let mut stat = MaybeUninit::<libc::stat>::uninit();
    // SAFETY: fstat(2) fills `stat` on success.
    let rv = unsafe { libc::fstat(fd.get().get(), stat.as_mut_ptr()) };
    return_if_error!(ok_status_or_capture_errno_if(rv == -1, "fstat() failed"));
    // SAFETY: fstat(2) succeeded, so `stat` is initialized.
    let stat = unsafe { stat.assume_init() };
    StatusOr::from_value(u64::try_from(stat.st_size).unwrap_or_default())
}

/// Open `path`, stat it and close it again
pub fn inspect(path: &Path) -> StatusOr<Inspection> {
    let fd = match open_read_only(path).into_result() {
        Ok(fd) => fd,
        Err(status) => {
            let code = status.code();
            return status
                .wrap(code, format!("cannot inspect {}", path.display()))
                .into();
        }
    };
    let size = assign_or_return!(file_size(&fd));

    StatusOr::from_value(Inspection {
        path: path.display().to_string(),
        fd: fd.get().get(),
        size,
    })
}
