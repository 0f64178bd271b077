/// Error returned when a value cannot be extracted from an
/// [`AnyValue`](crate::AnyValue).
///
/// Extraction never changes the container, so both variants are recoverable:
/// the caller can retry with another type or assign a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ValueError {
    /// The container holds a value of a different type than the one
    /// requested.
    ///
    /// Types must match exactly. Two types that convert into each other, such
    /// as `i32` and `i64`, are still a mismatch.
    #[error("type mismatch: requested `{requested}`, but the value holds `{stored}`")]
    TypeMismatch {
        /// [`core::any::type_name`] of the requested type.
        requested: &'static str,
        /// [`core::any::type_name`] of the stored type.
        stored: &'static str,
    },

    /// The container is empty because its value was moved out with
    /// [`AnyValue::take`](crate::AnyValue::take).
    #[error("the container is empty because its value was moved out")]
    Empty,
}
