//! Exclusive-ownership pointer.
//!
//! This module encapsulates the `ptr` field of [`OwningPtr`], ensuring it is
//! only visible within this module. This visibility restriction guarantees the
//! safety invariant: **a present pointer always comes from `Box<T>` and no
//! other handle owns the same allocation**.
//!
//! # Safety Invariant
//!
//! The `ptr` field can only be filled by [`OwningPtr::from_box`] (which
//! creates it with `Box::into_raw`) or by [`OwningPtr::from_raw`] (whose
//! caller promises the same provenance). Afterwards the pointer is only ever
//! moved between handles by [`OwningPtr::take`], [`OwningPtr::swap`] and
//! [`OwningPtr::assign`], each of which leaves exactly one handle holding it.
//!
//! The [`OwningPtr::drop`] implementation relies on this invariant to safely
//! reconstruct the `Box` and release the memory exactly once.
//!
//! # Move assignment
//!
//! [`OwningPtr::assign`] swaps instead of "release the old object, adopt the
//! new one". The previously owned object ends up in the right-hand side and is
//! released when that handle goes away at the end of the call. Assigning a
//! handle's own contents back to it is therefore a no-op on the allocation.

use alloc::boxed::Box;
use core::{marker::PhantomData, ptr::NonNull};

/// A move-only handle owning at most one heap-allocated `T`.
///
/// The handle is either empty or the sole owner of an allocation made through
/// [`Box`]. Ownership can be handed to another handle, but never shared: the
/// type implements neither [`Clone`] nor [`Copy`].
///
/// Unlike [`Box`], an [`OwningPtr`] has an explicit empty state. Moving out
/// with [`OwningPtr::take`] leaves the source empty, and dereferencing an
/// empty handle panics instead of reading through a dangling pointer.
///
/// `T` may be unsized, so `OwningPtr<dyn Trait>` works the same way
/// `Box<dyn Trait>` does; build one with [`OwningPtr::from_box`].
pub struct OwningPtr<T: ?Sized> {
    /// Pointer to the owned allocation, or `None` when the handle is empty.
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists, whenever the field is `Some`:
    ///
    /// 1. The pointer was created from a `Box<T>` using `Box::into_raw`.
    /// 2. No other [`OwningPtr`] or [`Box`] owns the same allocation.
    /// 3. The pointee is initialized and has not been released, except during
    ///    the execution of the `Drop` implementation.
    ptr: Option<NonNull<T>>,

    /// Marker to tell the drop checker that we own a `T`
    _owns: PhantomData<T>,
}

impl<T> OwningPtr<T> {
    /// Allocates `value` on the heap and returns its owner.
    ///
    /// # Examples
    ///
    /// ```
    /// use anyslot_internals::OwningPtr;
    ///
    /// let ptr = OwningPtr::new(String::from("owned"));
    /// assert_eq!(ptr.as_str(), "owned");
    /// ```
    #[inline]
    #[must_use]
    pub fn new(value: T) -> Self {
        Self::from_box(Box::new(value))
    }

    /// Releases ownership of the allocation and returns the value it held.
    ///
    /// Returns `None` if the handle was empty.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> Option<T> {
        self.into_box().map(|boxed| *boxed)
    }
}

impl<T: ?Sized> OwningPtr<T> {
    /// Creates an empty handle. Nothing is allocated.
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            ptr: None,
            _owns: PhantomData,
        }
    }

    /// Takes ownership of an existing allocation.
    ///
    /// This never allocates: the [`Box`] is consumed and its allocation is
    /// adopted as-is.
    #[inline]
    #[must_use]
    pub fn from_box(boxed: Box<T>) -> Self {
        let ptr: *mut T = Box::into_raw(boxed);

        // SAFETY: `Box::into_raw` returns a non-null pointer
        let ptr: NonNull<T> = unsafe { NonNull::new_unchecked(ptr) };

        // The invariants of the `ptr` field hold:
        // 1. The pointer comes from `Box::into_raw`.
        // 2. The `Box` was consumed, so nothing else owns the allocation.
        // 3. A `Box` always points to an initialized value.
        Self {
            ptr: Some(ptr),
            _owns: PhantomData,
        }
    }

    /// Takes ownership of a raw pointer. A null pointer yields an empty
    /// handle.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. A non-null `ptr` was created by [`Box::into_raw`] for a `Box<T>`.
    /// 2. Nothing else will release or use the allocation afterwards.
    #[inline]
    #[must_use]
    pub unsafe fn from_raw(ptr: *mut T) -> Self {
        // Invariants 1 and 2 of the `ptr` field are guaranteed by the caller.
        // Invariant 3 follows from 1, since a `Box` is always initialized.
        Self {
            ptr: NonNull::new(ptr),
            _owns: PhantomData,
        }
    }

    /// Moves the owned allocation out into a new handle, leaving `self`
    /// empty.
    ///
    /// Nothing is allocated or released.
    #[inline]
    #[must_use]
    pub fn take(&mut self) -> Self {
        Self {
            ptr: self.ptr.take(),
            _owns: PhantomData,
        }
    }

    /// Makes `self` the owner of whatever `rhs` owns.
    ///
    /// The two handles are swapped, so the object `self` previously owned is
    /// released when `rhs` is dropped at the end of this call. Assigning a
    /// handle its own allocation back leaves it owning that allocation:
    ///
    /// ```
    /// use anyslot_internals::OwningPtr;
    ///
    /// let mut ptr = OwningPtr::new(7);
    /// let moved = ptr.take();
    /// ptr.assign(moved);
    /// assert_eq!(*ptr, 7);
    /// ```
    #[inline]
    pub fn assign(&mut self, mut rhs: Self) {
        self.swap(&mut rhs);
    }

    /// Exchanges the allocations owned by `self` and `other`.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.ptr, &mut other.ptr);
    }

    /// Returns `true` if the handle owns nothing.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ptr.is_none()
    }

    /// Returns a reference to the owned value, or `None` if the handle is
    /// empty. Ownership is not affected.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        let ptr = self.ptr?;

        // SAFETY: Converting the pointer to a shared reference is sound because:
        // - The pointer is non-null, aligned and points to an initialized `T`
        //   (invariants 1 and 3 of the `ptr` field)
        // - The allocation is owned by `self` alone (invariant 2), and the returned
        //   reference borrows `self`, so no mutable access can happen while it lives
        Some(unsafe { ptr.as_ref() })
    }

    /// Returns a mutable reference to the owned value, or `None` if the
    /// handle is empty.
    #[inline]
    #[must_use]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        let mut ptr = self.ptr?;

        // SAFETY: Converting the pointer to a mutable reference is sound because:
        // - The pointer is non-null, aligned and points to an initialized `T`
        //   (invariants 1 and 3 of the `ptr` field)
        // - The allocation is owned by `self` alone (invariant 2), and the returned
        //   reference mutably borrows `self`, so it is the only live access
        Some(unsafe { ptr.as_mut() })
    }

    /// Releases ownership of the allocation as a [`Box`] without freeing it.
    ///
    /// Returns `None` if the handle was empty.
    #[inline]
    #[must_use]
    pub fn into_box(mut self) -> Option<Box<T>> {
        let ptr = self.ptr.take()?;

        // SAFETY:
        // 1. The pointer comes from `Box::into_raw` (invariant 1 of the `ptr` field)
        // 2. Ownership moves into the new `Box`: `self` is now empty and will not
        //    release the allocation when it is dropped
        Some(unsafe { Box::from_raw(ptr.as_ptr()) })
    }
}

impl<T: ?Sized> Default for OwningPtr<T> {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: ?Sized> From<Box<T>> for OwningPtr<T> {
    #[inline]
    fn from(boxed: Box<T>) -> Self {
        Self::from_box(boxed)
    }
}

impl<T: ?Sized> core::ops::Deref for OwningPtr<T> {
    type Target = T;

    /// # Panics
    ///
    /// Panics if the handle is empty.
    #[inline]
    #[track_caller]
    fn deref(&self) -> &T {
        match self.get() {
            Some(value) => value,
            None => empty_dereference(),
        }
    }
}

impl<T: ?Sized> core::ops::DerefMut for OwningPtr<T> {
    /// # Panics
    ///
    /// Panics if the handle is empty.
    #[inline]
    #[track_caller]
    fn deref_mut(&mut self) -> &mut T {
        match self.get_mut() {
            Some(value) => value,
            None => empty_dereference(),
        }
    }
}

/// Fails fast on an attempt to read through an empty [`OwningPtr`].
#[cold]
#[track_caller]
fn empty_dereference() -> ! {
    panic!("dereferenced an empty OwningPtr")
}

impl<T: ?Sized> core::ops::Drop for OwningPtr<T> {
    #[inline]
    fn drop(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            // SAFETY:
            // 1. The pointer comes from `Box::into_raw` (invariant 1 of the `ptr` field)
            // 2. The allocation is owned by `self` alone and has not been released
            //    (invariants 2 and 3). The field was just cleared, so the pointer is
            //    not used again after this point.
            let boxed = unsafe { Box::from_raw(ptr.as_ptr()) };
            core::mem::drop(boxed);
        }
    }
}

impl<T: ?Sized + core::fmt::Debug> core::fmt::Debug for OwningPtr<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("OwningPtr").field(&value).finish(),
            None => f.write_str("OwningPtr(<empty>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{format, rc::Rc, string::String};
    use core::cell::Cell;

    use super::*;

    /// Counts how many times values sharing the same counter were dropped.
    struct DropCounter(Rc<Cell<usize>>);

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_owning_ptr_size() {
        assert_eq!(
            core::mem::size_of::<OwningPtr<u64>>(),
            core::mem::size_of::<usize>()
        );
        assert_eq!(
            core::mem::size_of::<OwningPtr<dyn core::fmt::Debug>>(),
            2 * core::mem::size_of::<usize>()
        );
    }

    #[test]
    fn test_send_sync_clone() {
        static_assertions::assert_not_impl_any!(OwningPtr<u32>: Send, Sync);
        static_assertions::assert_not_impl_any!(OwningPtr<String>: Copy, Clone);
    }

    #[test]
    fn test_empty() {
        let mut ptr = OwningPtr::<u32>::empty();
        assert!(ptr.is_empty());
        assert!(ptr.get().is_none());
        assert!(ptr.get_mut().is_none());
        assert!(ptr.into_inner().is_none());

        let ptr = OwningPtr::<u32>::default();
        assert!(ptr.into_box().is_none());
    }

    #[test]
    fn test_take_leaves_source_empty() {
        let drops = Rc::new(Cell::new(0));
        let mut first = OwningPtr::new(DropCounter(drops.clone()));
        let address = first.get().map(core::ptr::from_ref);

        let second = first.take();
        assert!(first.is_empty());
        assert!(!second.is_empty());
        assert_eq!(second.get().map(core::ptr::from_ref), address);
        assert_eq!(drops.get(), 0);

        drop(first);
        assert_eq!(drops.get(), 0);
        drop(second);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_assign_releases_previous_object_once() {
        let old_drops = Rc::new(Cell::new(0));
        let new_drops = Rc::new(Cell::new(0));

        let mut ptr = OwningPtr::new(DropCounter(old_drops.clone()));
        ptr.assign(OwningPtr::new(DropCounter(new_drops.clone())));
        assert_eq!(old_drops.get(), 1);
        assert_eq!(new_drops.get(), 0);

        drop(ptr);
        assert_eq!(old_drops.get(), 1);
        assert_eq!(new_drops.get(), 1);
    }

    #[test]
    fn test_self_move_assignment() {
        let drops = Rc::new(Cell::new(0));
        let mut ptr = OwningPtr::new(DropCounter(drops.clone()));
        let address = ptr.get().map(core::ptr::from_ref);

        let moved = ptr.take();
        ptr.assign(moved);
        assert_eq!(ptr.get().map(core::ptr::from_ref), address);
        assert_eq!(drops.get(), 0);

        ptr = ptr.take();
        assert_eq!(ptr.get().map(core::ptr::from_ref), address);
        assert_eq!(drops.get(), 0);

        drop(ptr);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_assign_empty_releases_object() {
        let drops = Rc::new(Cell::new(0));
        let mut ptr = OwningPtr::new(DropCounter(drops.clone()));
        ptr.assign(OwningPtr::empty());
        assert!(ptr.is_empty());
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_swap() {
        let mut left = OwningPtr::new(1_u8);
        let mut right = OwningPtr::empty();
        left.swap(&mut right);
        assert!(left.is_empty());
        assert_eq!(right.get(), Some(&1));
    }

    #[test]
    fn test_deref_and_mutation() {
        let mut ptr = OwningPtr::new(String::from("hello"));
        ptr.push_str(", world");
        assert_eq!(&*ptr, "hello, world");
        assert_eq!(ptr.into_inner().as_deref(), Some("hello, world"));
    }

    #[test]
    #[should_panic(expected = "dereferenced an empty OwningPtr")]
    fn test_deref_empty_panics() {
        let ptr = OwningPtr::<u32>::empty();
        let _value: u32 = *ptr;
    }

    #[test]
    fn test_from_raw() {
        let raw = Box::into_raw(Box::new(5_i64));
        // SAFETY: `raw` comes from `Box::into_raw` and is not used afterwards
        let ptr = unsafe { OwningPtr::from_raw(raw) };
        assert_eq!(ptr.get(), Some(&5));

        // SAFETY: A null pointer is always accepted
        let ptr = unsafe { OwningPtr::<i64>::from_raw(core::ptr::null_mut()) };
        assert!(ptr.is_empty());
    }

    #[test]
    fn test_unsized() {
        let boxed: Box<dyn core::fmt::Debug> = Box::new(12_u16);
        let ptr = OwningPtr::from(boxed);
        assert_eq!(format!("{:?}", ptr), "OwningPtr(12)");
        assert_eq!(
            format!("{:?}", OwningPtr::<u8>::empty()),
            "OwningPtr(<empty>)"
        );
    }
}
