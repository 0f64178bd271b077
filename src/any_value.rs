use core::any::{TypeId, type_name};

use anyslot_internals::{Model, OwningPtr, ValueAdapter};

use crate::error::ValueError;

/// A single value of any [`Clone`] type, stored behind a uniform handle.
///
/// The payload is kept on the heap inside a per-type adapter. Its type is
/// checked on every extraction and must match exactly; see
/// [`AnyValue::value`].
///
/// Cloning an [`AnyValue`] clones the payload into a new allocation, so a
/// clone never observes mutations of the original and vice versa.
///
/// # Examples
///
/// ```
/// use anyslot::{AnyValue, ValueError};
///
/// let mut value = AnyValue::new('c');
/// value.set(1_i32);
/// assert_eq!(value.as_i32(), Ok(1));
///
/// value.set("1243");
/// assert_eq!(value.value::<&str>(), Ok(&"1243"));
/// assert!(matches!(value.as_i32(), Err(ValueError::TypeMismatch { .. })));
/// ```
pub struct AnyValue {
    /// Owner of the adapter holding the payload.
    ///
    /// Non-empty after every constructor and assignment. It only becomes
    /// empty when the value is moved out with [`AnyValue::take`].
    slot: OwningPtr<dyn Model>,
}

impl AnyValue {
    /// Stores `value` in a new container.
    ///
    /// This allocates one adapter holding `value`.
    #[must_use]
    pub fn new<T>(value: T) -> Self
    where
        T: Clone + 'static,
    {
        tracing::trace!(type_name = type_name::<T>(), "storing value");

        Self {
            slot: ValueAdapter::new(value).into_erased(),
        }
    }

    /// Replaces the stored value with `value`, which may be of another type.
    ///
    /// The new adapter is fully built before the old one is released. This
    /// also works on an empty container.
    pub fn set<T>(&mut self, value: T)
    where
        T: Clone + 'static,
    {
        let replacement = ValueAdapter::new(value).into_erased();

        tracing::trace!(
            from = self.describe(),
            to = type_name::<T>(),
            "replacing value"
        );

        self.slot.assign(replacement);
    }

    /// Moves the value into a new container, leaving `self` empty.
    ///
    /// Nothing is allocated or released. Afterwards every extraction from
    /// `self` fails with [`ValueError::Empty`] until a new value is assigned.
    ///
    /// # Examples
    ///
    /// ```
    /// use anyslot::{AnyValue, ValueError};
    ///
    /// let mut source = AnyValue::new(5_u8);
    /// let target = source.take();
    ///
    /// assert_eq!(target.value::<u8>(), Ok(&5));
    /// assert_eq!(source.value::<u8>(), Err(ValueError::Empty));
    /// ```
    #[must_use = "the moved-out value is dropped immediately if unused"]
    pub fn take(&mut self) -> Self {
        tracing::trace!(type_name = self.describe(), "moving value out");

        Self {
            slot: self.slot.take(),
        }
    }

    /// Returns a reference to the stored value if it is exactly of type `T`.
    ///
    /// The reference borrows the container, so it cannot outlive it or
    /// survive a reassignment.
    ///
    /// # Errors
    ///
    /// - [`ValueError::TypeMismatch`] if the stored value has any other type.
    /// - [`ValueError::Empty`] if the value was moved out.
    ///
    /// The container is unchanged in both cases.
    pub fn value<T: 'static>(&self) -> Result<&T, ValueError> {
        let model = self.slot.get().ok_or(ValueError::Empty)?;
        let stored = model.payload_type_name();

        model
            .downcast_ref::<T>()
            .ok_or_else(|| type_mismatch::<T>(stored))
    }

    /// Returns a mutable reference to the stored value if it is exactly of
    /// type `T`.
    ///
    /// # Errors
    ///
    /// The same as [`AnyValue::value`].
    pub fn value_mut<T: 'static>(&mut self) -> Result<&mut T, ValueError> {
        let model = self.slot.get_mut().ok_or(ValueError::Empty)?;
        let stored = model.payload_type_name();

        model
            .downcast_mut::<T>()
            .ok_or_else(|| type_mismatch::<T>(stored))
    }

    /// Returns a reference to the stored value, or `None` if the container
    /// is empty or holds another type.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.slot.get()?.downcast_ref::<T>()
    }

    /// Unwraps the stored value if it is exactly of type `T`.
    ///
    /// Returns `Err(self)` with the container unchanged otherwise.
    pub fn into_value<T: 'static>(self) -> Result<T, Self> {
        self.slot
            .downcast_into::<T>()
            .map_err(|slot| Self { slot })
    }

    /// Returns the stored `i32`.
    ///
    /// This is [`AnyValue::value`] specialized for `i32`, with the same exact
    /// match rule: an `i64`, `u32` or `i16` is a mismatch.
    ///
    /// # Errors
    ///
    /// The same as [`AnyValue::value`].
    pub fn as_i32(&self) -> Result<i32, ValueError> {
        self.value::<i32>().copied()
    }

    /// Returns `true` if the stored value is exactly of type `T`.
    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        self.slot.get().is_some_and(|model| model.is::<T>())
    }

    /// Returns `true` if the value was moved out of this container.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slot.is_empty()
    }

    /// Returns the [`TypeId`] of the stored value, or `None` if the container
    /// is empty.
    #[must_use]
    pub fn type_id(&self) -> Option<TypeId> {
        self.slot.get().map(|model| model.payload_type_id())
    }

    /// Returns the [`core::any::type_name`] of the stored value, or `None` if
    /// the container is empty.
    #[must_use]
    pub fn type_name(&self) -> Option<&'static str> {
        self.slot.get().map(|model| model.payload_type_name())
    }

    /// Type name used in log events.
    fn describe(&self) -> &'static str {
        self.type_name().unwrap_or("<empty>")
    }
}

#[cold]
fn type_mismatch<T: 'static>(stored: &'static str) -> ValueError {
    let requested = type_name::<T>();
    tracing::debug!(requested, stored, "rejected extraction");

    ValueError::TypeMismatch { requested, stored }
}

impl Clone for AnyValue {
    /// Deep-clones the stored value into a new allocation.
    ///
    /// Cloning an empty container yields another empty container.
    fn clone(&self) -> Self {
        let slot = match self.slot.get() {
            Some(model) => {
                tracing::trace!(type_name = model.payload_type_name(), "cloning value");
                model.clone_model()
            }
            None => OwningPtr::empty(),
        };

        Self { slot }
    }

    /// Replaces the stored value with a deep clone of `source`'s value.
    ///
    /// The clone is made before the old value is released, so a panicking
    /// [`Clone`] implementation leaves `self` untouched.
    fn clone_from(&mut self, source: &Self) {
        let replacement = source.clone();
        self.slot.assign(replacement.slot);
    }
}

impl TryFrom<&AnyValue> for i32 {
    type Error = ValueError;

    fn try_from(value: &AnyValue) -> Result<Self, Self::Error> {
        value.as_i32()
    }
}

impl core::fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.type_name() {
            Some(type_name) => f
                .debug_struct("AnyValue")
                .field("type_name", &type_name)
                .finish(),
            None => f.write_str("AnyValue(<empty>)"),
        }
    }
}
