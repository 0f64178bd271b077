//! Type-erased payload adapters.
//!
//! A [`Model`] is "a value of some type that only the value itself knows".
//! Every concrete payload type `T` gets its own adapter, [`ValueAdapter<T>`],
//! which stores exactly one `T` and reports `T` as its type tag. Stored in an
//! [`OwningPtr<dyn Model>`], the adapter can be deep-cloned and queried
//! without the caller knowing `T`.
//!
//! # Safety Invariant
//!
//! [`Model`] is sealed, and [`ValueAdapter`] is its only implementation. A
//! `ValueAdapter<T>` always reports `TypeId::of::<T>()` from
//! [`Model::payload_type_id`]. So whenever a `dyn Model` reports the tag of
//! `T`, the object behind it is a `ValueAdapter<T>`, which is what the
//! unchecked downcasts on `dyn Model` rely on.

use alloc::boxed::Box;
use core::any::TypeId;

use crate::owning::OwningPtr;

/// Module keeping [`Sealed`](sealed::Sealed) unnameable outside the crate.
mod sealed {
    /// Supertrait of [`Model`](super::Model) that only this crate can
    /// implement.
    pub trait Sealed: 'static {}

    impl<T: Clone + 'static> Sealed for super::ValueAdapter<T> {}
}

/// A value of an erased type.
///
/// This trait is sealed and cannot be implemented outside of this crate. Use
/// [`ValueAdapter::new`] to create a model for a concrete value.
pub trait Model: sealed::Sealed {
    /// Creates an independently owned copy of this model.
    ///
    /// The copy is a new allocation of the same concrete adapter type, holding
    /// a clone of the payload. Mutating one never affects the other.
    fn clone_model(&self) -> OwningPtr<dyn Model>;

    /// Returns the [`TypeId`] of the payload.
    fn payload_type_id(&self) -> TypeId;

    /// Returns the [`core::any::type_name`] of the payload.
    fn payload_type_name(&self) -> &'static str;
}

/// Adapter storing one payload of type `T` behind the [`Model`] interface.
pub struct ValueAdapter<T: 'static> {
    /// The actual payload
    value: T,
}

impl<T: Clone + 'static> ValueAdapter<T> {
    /// Wraps `value` in an adapter.
    #[inline]
    #[must_use]
    pub fn new(value: T) -> Self {
        Self { value }
    }

    /// Moves the adapter to the heap and erases its payload type.
    #[inline]
    #[must_use]
    pub fn into_erased(self) -> OwningPtr<dyn Model> {
        let boxed: Box<dyn Model> = Box::new(self);
        OwningPtr::from_box(boxed)
    }
}

impl<T: Clone + 'static> Model for ValueAdapter<T> {
    fn clone_model(&self) -> OwningPtr<dyn Model> {
        Self::new(self.value.clone()).into_erased()
    }

    #[inline]
    fn payload_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    #[inline]
    fn payload_type_name(&self) -> &'static str {
        core::any::type_name::<T>()
    }
}

impl dyn Model {
    /// Returns `true` if the payload is exactly of type `T`.
    ///
    /// No conversions are considered: a model holding an `i32` is not an
    /// `i64`, and a model holding a `&'static str` is not a `String`.
    #[inline]
    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        self.payload_type_id() == TypeId::of::<T>()
    }

    /// Returns a reference to the payload if it is exactly of type `T`.
    #[inline]
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        if self.is::<T>() {
            // SAFETY:
            // 1. We just checked that the payload type is `T`
            Some(unsafe { self.downcast_ref_unchecked::<T>() })
        } else {
            None
        }
    }

    /// Returns a mutable reference to the payload if it is exactly of type
    /// `T`.
    #[inline]
    #[must_use]
    pub fn downcast_mut<T: 'static>(&mut self) -> Option<&mut T> {
        if self.is::<T>() {
            // SAFETY:
            // 1. We just checked that the payload type is `T`
            Some(unsafe { self.downcast_mut_unchecked::<T>() })
        } else {
            None
        }
    }

    /// Accesses the payload as a reference to `T` without checking the type.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The payload is of type `T` (can be verified with
    ///    [`is::<T>()`](Self::is)).
    #[inline]
    #[must_use]
    pub unsafe fn downcast_ref_unchecked<T: 'static>(&self) -> &T {
        // Debug assertion to catch type mismatches in case of bugs
        debug_assert_eq!(self.payload_type_id(), TypeId::of::<T>());

        let ptr: *const ValueAdapter<T> = core::ptr::from_ref(self).cast::<ValueAdapter<T>>();

        // SAFETY: The pointer comes from a valid reference, and the object behind
        // it is a `ValueAdapter<T>`: `Model` is sealed, `ValueAdapter` is its only
        // implementation, and the caller guarantees the tag is that of `T`. The
        // returned reference borrows `self`.
        let adapter: &ValueAdapter<T> = unsafe { &*ptr };
        &adapter.value
    }

    /// Accesses the payload as a mutable reference to `T` without checking
    /// the type.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The payload is of type `T` (can be verified with
    ///    [`is::<T>()`](Self::is)).
    #[inline]
    #[must_use]
    pub unsafe fn downcast_mut_unchecked<T: 'static>(&mut self) -> &mut T {
        // Debug assertion to catch type mismatches in case of bugs
        debug_assert_eq!(self.payload_type_id(), TypeId::of::<T>());

        let ptr: *mut ValueAdapter<T> = core::ptr::from_mut(self).cast::<ValueAdapter<T>>();

        // SAFETY: The object behind the pointer is a `ValueAdapter<T>` for the same
        // reasons as in `downcast_ref_unchecked`. The pointer comes from a mutable
        // reference, so the returned reference is the only live access.
        let adapter: &mut ValueAdapter<T> = unsafe { &mut *ptr };
        &mut adapter.value
    }
}

impl OwningPtr<dyn Model> {
    /// Unwraps the payload if it is exactly of type `T`, releasing the
    /// adapter's allocation.
    ///
    /// Returns the handle unchanged if the payload has another type or the
    /// handle is empty.
    pub fn downcast_into<T: 'static>(self) -> Result<T, Self> {
        match self.into_box() {
            Some(boxed) if boxed.is::<T>() => {
                let ptr: *mut ValueAdapter<T> = Box::into_raw(boxed).cast::<ValueAdapter<T>>();

                // SAFETY:
                // 1. The pointer comes from `Box::into_raw` of a `Box<dyn Model>`.
                // 2. The concrete object is a `ValueAdapter<T>`, as the tag was just
                //    checked and `Model` is sealed, so layout and drop glue match the
                //    original allocation.
                let adapter: Box<ValueAdapter<T>> = unsafe { Box::from_raw(ptr) };
                Ok(adapter.value)
            }
            Some(boxed) => Err(Self::from_box(boxed)),
            None => Err(Self::empty()),
        }
    }
}
