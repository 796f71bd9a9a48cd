//! Non-owning views over contiguous storage
//!
//! A span describes the half-open address range `[base, limit)` holding zero
//! or more values of a single type. It never owns memory; the storage must
//! outlive the span, which the lifetime parameter enforces for spans built
//! from slices.
//!
//! ```
//! use ebpd_core::{Span, make_span, make_span_mut};
//!
//! let mut samples = vec![0.0f64; 50];
//! let frozen = [1.0f64; 10];
//!
//! let mut writable = make_span_mut(&mut samples);
//! writable.as_mut_slice()[0] = 3.5;
//! let readable: Span<'_, f64> = writable.into();
//!
//! assert_eq!(50, readable.size());
//! assert!(!readable.is_empty());
//! assert_eq!(50 * std::mem::size_of::<f64>(), readable.byte_size());
//! assert_eq!(3.5, readable.as_slice()[0]);
//! assert_eq!(10, make_span(&frozen).size());
//! ```
//!
//! The conversion only goes from mutable to read-only:
//!
//! ```compile_fail
//! use ebpd_core::{SpanMut, make_span};
//!
//! let data = [1u8, 2, 3];
//! let writable: SpanMut<'_, u8> = make_span(&data).into();
//! ```

#![allow(unsafe_code)]

use std::fmt;
use std::marker::PhantomData;
use std::mem;

fn element_count<T>(base: *const T, limit: *const T) -> usize {
    assert!(!base.is_null(), "invariant violated: span base is null");
    assert!(!limit.is_null(), "invariant violated: span limit is null");
    assert!(base <= limit, "invariant violated: span bounds are inverted");
    (limit as usize - base as usize)
        .checked_div(mem::size_of::<T>())
        .unwrap_or(0)
}

/// Read-only view over `[base, limit)`.
///
/// The default span has null bounds and is empty; it is the only span whose
/// bounds may be null.
pub struct Span<'a, T> {
    base: *const T,
    len: usize,
    _storage: PhantomData<&'a [T]>,
}

impl<'a, T> Span<'a, T> {
    /// View the contents of `slice`.
    #[must_use]
    pub const fn from_slice(slice: &'a [T]) -> Self {
        Self {
            base: slice.as_ptr(),
            len: slice.len(),
            _storage: PhantomData,
        }
    }

    /// Build a span over `[base, limit)`.
    ///
    /// # Safety
    /// The range must lie within a single live allocation holding initialized
    /// `T`s that is not mutated for `'a`.
    ///
    /// # Panics
    /// Panics if either bound is null or `limit < base`.
    #[must_use]
    pub unsafe fn from_raw_parts(base: *const T, limit: *const T) -> Self {
        let len = element_count(base, limit);
        Self {
            base,
            len,
            _storage: PhantomData,
        }
    }

    /// Build a span starting at `base` holding `size` elements.
    ///
    /// # Safety
    /// Same requirements as [`Span::from_raw_parts`].
    ///
    /// # Panics
    /// Panics if `base` is null.
    #[must_use]
    pub unsafe fn from_base_and_size(base: *const T, size: usize) -> Self {
        assert!(!base.is_null(), "invariant violated: span base is null");
        Self {
            base,
            len: size,
            _storage: PhantomData,
        }
    }

    /// Pointer to the first element.
    #[must_use]
    pub const fn base(&self) -> *const T {
        self.base
    }

    /// Pointer one position past the last element.
    #[must_use]
    pub const fn limit(&self) -> *const T {
        self.base.wrapping_add(self.len)
    }

    /// Whether the span holds no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements in the span.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.len
    }

    /// Size of the span in bytes.
    #[must_use]
    pub const fn byte_size(&self) -> usize {
        self.len * mem::size_of::<T>()
    }

    /// The viewed elements.
    #[must_use]
    pub fn as_slice(&self) -> &'a [T] {
        if self.base.is_null() {
            return &[];
        }
        // SAFETY: non-null spans are built from a slice or from bounds the
        // caller vouched for in `from_raw_parts`/`from_base_and_size`.
        unsafe { std::slice::from_raw_parts(self.base, self.len) }
    }

    /// Iterate over the viewed elements.
    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.as_slice().iter()
    }
}

impl<T> Default for Span<'_, T> {
    fn default() -> Self {
        Self {
            base: std::ptr::null(),
            len: 0,
            _storage: PhantomData,
        }
    }
}

impl<T> Clone for Span<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Span<'_, T> {}

impl<T> fmt::Debug for Span<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Span")
            .field("base", &self.base)
            .field("size", &self.len)
            .finish()
    }
}

impl<'a, T> From<&'a [T]> for Span<'a, T> {
    fn from(slice: &'a [T]) -> Self {
        Self::from_slice(slice)
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for Span<'a, T> {
    fn from(array: &'a [T; N]) -> Self {
        Self::from_slice(array)
    }
}

impl<'a, T> From<&'a Vec<T>> for Span<'a, T> {
    fn from(vec: &'a Vec<T>) -> Self {
        Self::from_slice(vec)
    }
}

impl<'a, T> IntoIterator for Span<'a, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

// SAFETY: a span is a shared borrow of `[T]`.
unsafe impl<T: Sync> Send for Span<'_, T> {}
unsafe impl<T: Sync> Sync for Span<'_, T> {}

/// Mutable view over `[base, limit)`.
///
/// Converts into a read-only [`Span`] over the same range; there is no
/// conversion in the other direction.
pub struct SpanMut<'a, T> {
    base: *mut T,
    len: usize,
    _storage: PhantomData<&'a mut [T]>,
}

impl<'a, T> SpanMut<'a, T> {
    /// View the contents of `slice`.
    #[must_use]
    pub const fn from_slice(slice: &'a mut [T]) -> Self {
        Self {
            len: slice.len(),
            base: slice.as_mut_ptr(),
            _storage: PhantomData,
        }
    }

    /// Build a mutable span over `[base, limit)`.
    ///
    /// # Safety
    /// The range must lie within a single live allocation holding initialized
    /// `T`s that is not accessed through any other path for `'a`.
    ///
    /// # Panics
    /// Panics if either bound is null or `limit < base`.
    #[must_use]
    pub unsafe fn from_raw_parts(base: *mut T, limit: *mut T) -> Self {
        let len = element_count(base.cast_const(), limit.cast_const());
        Self {
            base,
            len,
            _storage: PhantomData,
        }
    }

    /// Build a mutable span starting at `base` holding `size` elements.
    ///
    /// # Safety
    /// Same requirements as [`SpanMut::from_raw_parts`].
    ///
    /// # Panics
    /// Panics if `base` is null.
    #[must_use]
    pub unsafe fn from_base_and_size(base: *mut T, size: usize) -> Self {
        assert!(!base.is_null(), "invariant violated: span base is null");
        Self {
            base,
            len: size,
            _storage: PhantomData,
        }
    }

    /// Pointer to the first element.
    #[must_use]
    pub const fn base(&self) -> *mut T {
        self.base
    }

    /// Pointer one position past the last element.
    #[must_use]
    pub const fn limit(&self) -> *mut T {
        self.base.wrapping_add(self.len)
    }

    /// Whether the span holds no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements in the span.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.len
    }

    /// Size of the span in bytes.
    #[must_use]
    pub const fn byte_size(&self) -> usize {
        self.len * mem::size_of::<T>()
    }

    /// Read-only view over the same range, borrowed from `self`.
    #[must_use]
    pub fn as_span(&self) -> Span<'_, T> {
        Span {
            base: self.base.cast_const(),
            len: self.len,
            _storage: PhantomData,
        }
    }

    /// The viewed elements.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.as_span().as_slice()
    }

    /// The viewed elements, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        if self.base.is_null() {
            return &mut [];
        }
        // SAFETY: see `Span::as_slice`; `&mut self` guarantees exclusivity.
        unsafe { std::slice::from_raw_parts_mut(self.base, self.len) }
    }

    /// Consume the span into the mutable slice it views.
    #[must_use]
    pub fn into_slice(self) -> &'a mut [T] {
        if self.base.is_null() {
            return &mut [];
        }
        // SAFETY: see `as_mut_slice`; `self` is consumed so the exclusive
        // borrow is handed over, not duplicated.
        unsafe { std::slice::from_raw_parts_mut(self.base, self.len) }
    }
}

impl<T> Default for SpanMut<'_, T> {
    fn default() -> Self {
        Self {
            base: std::ptr::null_mut(),
            len: 0,
            _storage: PhantomData,
        }
    }
}

impl<T> fmt::Debug for SpanMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpanMut")
            .field("base", &self.base)
            .field("size", &self.len)
            .finish()
    }
}

impl<'a, T> From<SpanMut<'a, T>> for Span<'a, T> {
    fn from(span: SpanMut<'a, T>) -> Self {
        Self {
            base: span.base.cast_const(),
            len: span.len,
            _storage: PhantomData,
        }
    }
}

impl<'a, T> From<&'a mut [T]> for SpanMut<'a, T> {
    fn from(slice: &'a mut [T]) -> Self {
        Self::from_slice(slice)
    }
}

impl<'a, T, const N: usize> From<&'a mut [T; N]> for SpanMut<'a, T> {
    fn from(array: &'a mut [T; N]) -> Self {
        Self::from_slice(array)
    }
}

impl<'a, T> From<&'a mut Vec<T>> for SpanMut<'a, T> {
    fn from(vec: &'a mut Vec<T>) -> Self {
        Self::from_slice(vec)
    }
}

// SAFETY: a mutable span is an exclusive borrow of `[T]`.
unsafe impl<T: Send> Send for SpanMut<'_, T> {}
unsafe impl<T: Sync> Sync for SpanMut<'_, T> {}

/// Span over the contents of `storage`.
#[must_use]
pub fn make_span<T, S>(storage: &S) -> Span<'_, T>
where
    S: AsRef<[T]> + ?Sized,
{
    Span::from_slice(storage.as_ref())
}

/// Mutable span over the contents of `storage`.
#[must_use]
pub fn make_span_mut<T, S>(storage: &mut S) -> SpanMut<'_, T>
where
    S: AsMut<[T]> + ?Sized,
{
    SpanMut::from_slice(storage.as_mut())
}

#[cfg(test)]
mod tests {
    use super::{Span, SpanMut, make_span, make_span_mut};

    #[test]
    fn default_span_is_null_and_empty() {
        let span: Span<'_, u64> = Span::default();
        assert!(span.base().is_null());
        assert!(span.limit().is_null());
        assert!(span.is_empty());
        assert_eq!(0, span.size());
        assert_eq!(0, span.byte_size());
        assert!(span.as_slice().is_empty());

        let mut span: SpanMut<'_, u64> = SpanMut::default();
        assert!(span.base().is_null());
        assert!(span.as_mut_slice().is_empty());
    }

    #[test]
    fn vec_span_sizes() {
        let data = vec![0u32; 50];
        let span = make_span(&data);
        assert_eq!(50, span.size());
        assert!(!span.is_empty());
        assert_eq!(200, span.byte_size());
        assert_eq!(data.as_ptr(), span.base());
        assert_eq!(data.as_ptr().wrapping_add(50), span.limit());
    }

    #[test]
    fn array_span_sizes() {
        let data = [7u16; 10];
        let span = Span::from(&data);
        assert_eq!(10, span.size());
        assert_eq!(20, span.byte_size());
        assert_eq!(70, span.iter().map(|v| u32::from(*v)).sum::<u32>());
    }

    #[test]
    fn empty_container_span_is_empty() {
        let data: Vec<u8> = Vec::new();
        let span = make_span(&data);
        assert!(span.is_empty());
        assert_eq!(span.base(), span.limit());
    }

    #[test]
    fn raw_parts_round_trip_bounds() {
        let data = [1i64, 2, 3, 4];
        let range = data.as_ptr_range();
        let span = unsafe { Span::from_raw_parts(range.start, range.end) };
        assert_eq!(4, span.size());
        assert_eq!(range.start, span.base());
        assert_eq!(range.end, span.limit());
        assert_eq!(&data, span.as_slice());

        let sub = unsafe { Span::from_base_and_size(data.as_ptr().wrapping_add(1), 2) };
        assert_eq!(&[2, 3], sub.as_slice());
    }

    #[test]
    #[should_panic(expected = "span base is null")]
    fn raw_parts_with_null_base_is_fatal() {
        let data = [1u8];
        let _ = unsafe { Span::from_raw_parts(std::ptr::null(), data.as_ptr()) };
    }

    #[test]
    #[should_panic(expected = "span limit is null")]
    fn raw_parts_with_null_limit_is_fatal() {
        let data = [1u8];
        let _ = unsafe { Span::from_raw_parts(data.as_ptr(), std::ptr::null()) };
    }

    #[test]
    #[should_panic(expected = "inverted")]
    fn raw_parts_with_inverted_bounds_is_fatal() {
        let data = [1u8, 2];
        let range = data.as_ptr_range();
        let _ = unsafe { Span::from_raw_parts(range.end, range.start) };
    }

    #[test]
    #[should_panic(expected = "span base is null")]
    fn mutable_raw_parts_with_null_base_is_fatal() {
        let mut data = [1u8];
        let limit = data.as_mut_ptr();
        let _ = unsafe { SpanMut::from_raw_parts(std::ptr::null_mut(), limit) };
    }

    #[test]
    fn mutable_span_writes_through() {
        let mut data = vec![0u8; 4];
        {
            let mut span = make_span_mut(&mut data);
            span.as_mut_slice().copy_from_slice(&[1, 2, 3, 4]);
            assert_eq!(4, span.as_span().size());
        }
        assert_eq!(vec![1, 2, 3, 4], data);

        let slice = SpanMut::from(&mut data).into_slice();
        slice[0] = 9;
        assert_eq!(9, data[0]);
    }

    #[test]
    fn mutable_span_converts_to_read_only() {
        let mut data = [5u32; 3];
        let base = data.as_ptr();
        let span: Span<'_, u32> = make_span_mut(&mut data).into();
        assert_eq!(base, span.base());
        assert_eq!(3, span.size());
        assert_eq!(15, span.into_iter().sum::<u32>());
    }

    #[test]
    fn zero_sized_elements_have_no_bytes() {
        let data = [(); 3];
        let span = make_span(&data);
        assert_eq!(3, span.size());
        assert_eq!(0, span.byte_size());
    }
}
