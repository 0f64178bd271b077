//! Commonly used items for convenient importing.
//!
//! ```rust
//! use anyslot::prelude::*;
//!
//! let value = AnyValue::new(1.5_f64);
//! assert_eq!(value.value::<f64>(), Ok(&1.5));
//! assert!(matches!(
//!     value.value::<f32>(),
//!     Err(ValueError::TypeMismatch { .. })
//! ));
//! ```

pub use crate::{AnyValue, OwningPtr, ValueError};
