//! Tagged wrappers for values that must be treated as opaque data
//!
//! Typically these are integers whose numeric value is meaningless to the
//! code carrying them; POSIX file descriptors are the common example. Only
//! equality and an ordering for associative containers are provided.
//! Arithmetic and bitwise operators are intentionally absent.
//!
//! ```
//! use ebpd_core::define_opaque_value;
//! use std::collections::BTreeMap;
//!
//! define_opaque_value! {
//!     /// Employee identifier.
//!     pub EmployeeId(u32);
//! }
//!
//! let id = EmployeeId::new(5);
//! assert_eq!(5, id.get());
//!
//! let mut reviews = BTreeMap::new();
//! reviews.insert(id, "outstanding");
//! assert_eq!(Some(&"outstanding"), reviews.get(&EmployeeId::new(5)));
//! ```
//!
//! Two opaque types wrapping the same representation never mix:
//!
//! ```compile_fail
//! use ebpd_core::define_opaque_value;
//!
//! define_opaque_value! { pub EmployeeId(i32); }
//! define_opaque_value! { pub RoomNumber(i32); }
//!
//! let mut id = EmployeeId::new(1);
//! id = RoomNumber::new(1);
//! ```
//!
//! ```compile_fail
//! use ebpd_core::define_opaque_value;
//!
//! define_opaque_value! { pub EmployeeId(i32); }
//! define_opaque_value! { pub RoomNumber(i32); }
//!
//! assert!(EmployeeId::new(1) == RoomNumber::new(1));
//! ```
//!
//! No arithmetic and no implicit conversion from the raw value:
//!
//! ```compile_fail
//! use ebpd_core::define_opaque_value;
//!
//! define_opaque_value! { pub EmployeeId(i32); }
//!
//! let next = EmployeeId::new(1) + EmployeeId::new(1);
//! ```
//!
//! ```compile_fail
//! use ebpd_core::define_opaque_value;
//!
//! define_opaque_value! { pub EmployeeId(i32); }
//!
//! let id: EmployeeId = 9.into();
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A `T` that is only comparable with other values carrying the same `Tag`.
///
/// `Tag` is a compile-time discriminator with no runtime representation.
/// Prefer [`define_opaque_value!`](crate::define_opaque_value) over naming
/// tag types by hand.
#[repr(transparent)]
pub struct OpaqueValue<T, Tag> {
    value: T,
    _tag: PhantomData<fn() -> Tag>,
}

impl<T, Tag> OpaqueValue<T, Tag> {
    /// Wrap `value`. There is no implicit conversion in either direction.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self {
            value,
            _tag: PhantomData,
        }
    }

    /// Borrow the wrapped value.
    #[must_use]
    pub const fn as_inner(&self) -> &T {
        &self.value
    }

    /// Unwrap into the raw value. Avoid when possible.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: Copy, Tag> OpaqueValue<T, Tag> {
    /// Copy out the raw value. Avoid when possible.
    #[must_use]
    pub const fn get(&self) -> T {
        self.value
    }
}

impl<T: Clone, Tag> Clone for OpaqueValue<T, Tag> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<T: Copy, Tag> Copy for OpaqueValue<T, Tag> {}

impl<T: PartialEq, Tag> PartialEq for OpaqueValue<T, Tag> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq, Tag> Eq for OpaqueValue<T, Tag> {}

// Ordering exists for use as a key in associative containers. It assumes the
// wrapped domain is totally ordered and carries no other meaning.
impl<T: PartialOrd, Tag> PartialOrd for OpaqueValue<T, Tag> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<T: Ord, Tag> Ord for OpaqueValue<T, Tag> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T: Hash, Tag> Hash for OpaqueValue<T, Tag> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T: Default, Tag> Default for OpaqueValue<T, Tag> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug, Tag> fmt::Debug for OpaqueValue<T, Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = std::any::type_name::<Tag>();
        let name = tag.rsplit("::").next().unwrap_or(tag);
        f.debug_tuple(name.strip_suffix("Tag").unwrap_or(name))
            .field(&self.value)
            .finish()
    }
}

/// Define a new [`OpaqueValue`] type named `$name` wrapping `$ty`.
///
/// A unique uninhabited tag type `<$name>Tag` is generated next to the alias
/// so that types defined with the same representation cannot be mixed.
#[macro_export]
macro_rules! define_opaque_value {
    ($(#[$meta:meta])* $vis:vis $name:ident($ty:ty) $(;)?) => {
        $crate::__pastey::paste! {
            #[doc = "Tag distinguishing [`" $name "`] from other opaque values."]
            #[derive(Debug)]
            $vis enum [<$name Tag>] {}

            $(#[$meta])*
            $vis type $name = $crate::OpaqueValue<$ty, [<$name Tag>]>;
        }
    };
}
