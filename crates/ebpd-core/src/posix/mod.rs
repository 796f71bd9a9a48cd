//! POSIX consumers of the status and ownership primitives
//!
//! - `errno` - turn the thread's errno into codes and statuses
//! - `file_descriptor` - strongly typed descriptor handles
//! - `close` - close(2) returning a status
//! - `unique_file_descriptor` - descriptors closed on scope exit

pub mod close;
pub mod errno;
pub mod file_descriptor;
pub mod unique_file_descriptor;

pub use self::close::close;
pub use self::errno::{capture_errno_as_code, capture_errno_as_status, ok_status_or_capture_errno_if};
pub use self::file_descriptor::{FileDescriptor, INVALID_FILE_DESCRIPTOR, is_well_formed};
pub use self::unique_file_descriptor::{CloseFileDescriptor, UniqueFileDescriptor};
