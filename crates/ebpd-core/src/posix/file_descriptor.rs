//! Strongly typed POSIX file descriptors

crate::define_opaque_value! {
    /// A POSIX file descriptor.
    ///
    /// ```
    /// use ebpd_core::posix::FileDescriptor;
    ///
    /// let fd = FileDescriptor::new(0);
    /// assert_eq!(0, fd.get());
    /// ```
    pub FileDescriptor(i32);
}

/// Canonical invalid descriptor. Any negative value is invalid; prefer this
/// one.
pub const INVALID_FILE_DESCRIPTOR: FileDescriptor = FileDescriptor::new(-1);

/// Whether `fd` looks like a valid descriptor.
///
/// No attempt is made to ask the kernel; such a check would race with other
/// threads closing or reusing the descriptor.
#[must_use]
pub const fn is_well_formed(fd: FileDescriptor) -> bool {
    fd.get() >= 0
}
