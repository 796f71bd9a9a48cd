//! Exclusively owned values with exactly-once cleanup
//!
//! [`UniqueValue`] provides `Box`-like ownership for plain values such as
//! integer handles. Unlike pointers, where null marks an invalid value, every
//! value of `T` may be valid, so emptiness is tracked separately.
//!
//! ```
//! use ebpd_core::{Cleanup, UniqueValue};
//!
//! struct Release;
//!
//! impl Cleanup<u32> for Release {
//!     fn cleanup(handle: u32) {
//!         println!("releasing handle {handle}");
//!     }
//! }
//!
//! {
//!     let handle: UniqueValue<u32, Release> = UniqueValue::new(7);
//!     assert_eq!(7, *handle);
//! } // `handle` leaves scope and is released here
//! ```
//!
//! Ownership is exclusive, so there is no way to copy a holder:
//!
//! ```compile_fail
//! use ebpd_core::{Cleanup, UniqueValue};
//!
//! struct Release;
//! impl Cleanup<u32> for Release {
//!     fn cleanup(_: u32) {}
//! }
//!
//! fn assert_clone<T: Clone>() {}
//! assert_clone::<UniqueValue<u32, Release>>();
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

/// Release action for values held by a [`UniqueValue`].
///
/// `cleanup` is only ever called with values that were held, and at most once
/// per value.
pub trait Cleanup<T> {
    /// Release `value`.
    fn cleanup(value: T);

    /// Whether `value` may be held at all. Holding a value for which this
    /// returns `false` is an invariant violation.
    fn is_well_formed(_value: &T) -> bool {
        true
    }
}

/// An exclusively owned, possibly empty `T` released through `C` when
/// dropped or overwritten.
///
/// The state machine is `Empty` / `Holding(value)`:
/// - moving a holder transfers the value and never runs cleanup
/// - assigning over a holding holder runs cleanup on the old value first
/// - dropping a holding holder runs cleanup exactly once
pub struct UniqueValue<T, C: Cleanup<T>> {
    value: Option<T>,
    _cleanup: PhantomData<fn(T) -> C>,
}

impl<T, C: Cleanup<T>> UniqueValue<T, C> {
    /// Create a holder owning `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        crate::invariant!(C::is_well_formed(&value), "holding a malformed value");
        Self {
            value: Some(value),
            _cleanup: PhantomData,
        }
    }

    /// Create an empty holder.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            value: None,
            _cleanup: PhantomData,
        }
    }

    /// Whether this holder owns a value.
    #[must_use]
    pub const fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Borrow the owned value.
    ///
    /// # Panics
    /// Panics if the holder is empty.
    #[must_use]
    pub fn get(&self) -> &T {
        match &self.value {
            Some(value) => value,
            None => panic!("invariant violated: access to an empty UniqueValue"),
        }
    }

    /// Borrow the owned value if there is one.
    #[must_use]
    pub const fn as_option(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Move ownership out into a new holder, leaving `self` empty.
    #[must_use]
    pub fn take(&mut self) -> Self {
        Self {
            value: self.value.take(),
            _cleanup: PhantomData,
        }
    }

    /// Adopt the state of `other`, releasing the currently owned value first.
    pub fn replace(&mut self, mut other: Self) {
        self.reset();
        self.value = other.value.take();
    }

    /// Release the owned value now, leaving `self` empty.
    pub fn reset(&mut self) {
        if let Some(value) = self.value.take() {
            crate::invariant!(C::is_well_formed(&value), "releasing a malformed value");
            C::cleanup(value);
        }
    }

    /// Give up ownership without running cleanup.
    #[must_use = "the released value is no longer cleaned up automatically"]
    pub fn release(mut self) -> Option<T> {
        self.value.take()
    }
}

impl<T, C: Cleanup<T>> Default for UniqueValue<T, C> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T, C: Cleanup<T>> Drop for UniqueValue<T, C> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T, C: Cleanup<T>> Deref for UniqueValue<T, C> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T: fmt::Debug, C: Cleanup<T>> fmt::Debug for UniqueValue<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => f.debug_tuple("UniqueValue").field(value).finish(),
            None => f.write_str("UniqueValue(<empty>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cleanup, UniqueValue};
    use proptest::prelude::*;
    use std::cell::RefCell;

    thread_local! {
        static CLEANUPS: RefCell<Vec<i32>> = const { RefCell::new(Vec::new()) };
    }

    struct Record;

    impl Cleanup<i32> for Record {
        fn cleanup(value: i32) {
            CLEANUPS.with(|c| c.borrow_mut().push(value));
        }

        fn is_well_formed(value: &i32) -> bool {
            *value >= 0
        }
    }

    type Handle = UniqueValue<i32, Record>;

    fn drain() -> Vec<i32> {
        CLEANUPS.with(|c| std::mem::take(&mut *c.borrow_mut()))
    }

    #[test]
    fn default_is_empty_and_never_cleaned() {
        drain();
        {
            let handle = Handle::default();
            assert!(!handle.has_value());
            assert_eq!(None, handle.as_option());
        }
        assert!(drain().is_empty());
    }

    #[test]
    fn drop_cleans_up_once() {
        drain();
        {
            let handle = Handle::new(10);
            assert!(handle.has_value());
            assert_eq!(10, *handle);
            assert_eq!(&10, handle.get());
        }
        assert_eq!(vec![10], drain());
    }

    #[test]
    fn move_transfers_without_cleanup() {
        drain();
        {
            let a = Handle::new(10);
            let b = a;
            let c = b;
            assert!(drain().is_empty());
            assert_eq!(10, *c);
        }
        assert_eq!(vec![10], drain());
    }

    #[test]
    fn take_leaves_source_empty() {
        drain();
        let mut a = Handle::new(4);
        let b = a.take();
        assert!(!a.has_value());
        assert_eq!(4, *b);
        drop(a);
        assert!(drain().is_empty());
        drop(b);
        assert_eq!(vec![4], drain());
    }

    #[test]
    #[allow(unused_assignments)]
    fn assignment_cleans_up_overwritten_value() {
        drain();
        {
            let a = Handle::new(10);
            let mut b = Handle::new(11);
            let mut c = Handle::empty();
            b = a;
            assert_eq!(vec![11], drain());
            c.replace(b);
            assert!(drain().is_empty());
            assert_eq!(10, *c);
        }
        assert_eq!(vec![10], drain());
    }

    #[test]
    fn moving_empty_values_never_cleans_up() {
        drain();
        {
            let mut a = Handle::empty();
            let b = a.take();
            let mut c = Handle::empty();
            c.replace(b);
            a.replace(Handle::empty());
            assert!(!c.has_value());
        }
        assert!(drain().is_empty());
    }

    #[test]
    fn replace_takes_source_state() {
        drain();
        let mut a = Handle::new(1);
        a.replace(Handle::new(2));
        assert_eq!(vec![1], drain());
        assert_eq!(2, *a);
        a.replace(Handle::empty());
        assert_eq!(vec![2], drain());
        assert!(!a.has_value());
    }

    #[test]
    fn reset_cleans_up_immediately() {
        drain();
        let mut a = Handle::new(8);
        a.reset();
        assert_eq!(vec![8], drain());
        a.reset();
        drop(a);
        assert!(drain().is_empty());
    }

    #[test]
    fn release_skips_cleanup() {
        drain();
        let a = Handle::new(12);
        assert_eq!(Some(12), a.release());
        assert!(drain().is_empty());
    }

    #[test]
    #[should_panic(expected = "empty UniqueValue")]
    fn deref_of_empty_is_fatal() {
        let handle = Handle::empty();
        let _value = *handle;
    }

    #[test]
    #[should_panic(expected = "malformed value")]
    fn holding_malformed_value_is_fatal() {
        let _ = Handle::new(-1);
    }

    #[test]
    fn debug_shows_state() {
        let handle = Handle::new(3);
        assert_eq!("UniqueValue(3)", format!("{handle:?}"));
        let empty = Handle::empty();
        assert_eq!("UniqueValue(<empty>)", format!("{empty:?}"));
        assert_eq!(Some(3), handle.release());
    }

    proptest! {
        #[test]
        fn every_held_value_is_cleaned_exactly_once(values in prop::collection::vec(0..1000i32, 0..16)) {
            drain();
            {
                let mut holder = Handle::empty();
                for value in &values {
                    holder = Handle::new(*value);
                }
                drop(holder);
            }
            prop_assert_eq!(values, drain());
        }
    }
}
