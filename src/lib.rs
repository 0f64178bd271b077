#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    clippy::as_ptr_cast_mut,
    clippy::ptr_as_ptr,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Extra checks on nightly
#![cfg_attr(nightly_extra_checks, feature(rustdoc_missing_doc_code_examples))]
#![cfg_attr(nightly_extra_checks, forbid(rustdoc::missing_doc_code_examples))]

//! A type-erased value container with exact-type extraction.
//!
//! ## Overview
//!
//! An [`AnyValue`] holds a single value of any type that implements
//! [`Clone`]. The concrete type is forgotten when the value goes in and is
//! checked again when it comes out: asking for the value as any type other
//! than the exact one stored fails with [`ValueError::TypeMismatch`]. There
//! are no conversions, so an `i32` never comes out as an `i64`.
//!
//! Containers behave like values, not like handles:
//!
//! - **Cloning is deep.** A clone owns its own copy of the payload. Mutating
//!   one never shows through the other.
//! - **Moving is explicit.** [`AnyValue::take`] moves the payload into a new
//!   container and leaves the source empty. An empty container can be
//!   assigned to or dropped; extracting from it fails with
//!   [`ValueError::Empty`].
//! - **Every allocation has one owner.** The payload lives in an
//!   [`OwningPtr`], which releases it exactly once.
//!
//! ## Quick Example
//!
//! ```
//! use anyslot::prelude::*;
//!
//! fn main() -> Result<(), ValueError> {
//!     let mut value = AnyValue::new(42_i32);
//!     assert_eq!(*value.value::<i32>()?, 42);
//!     assert!(value.value::<f64>().is_err());
//!
//!     value.set(String::from("hello"));
//!     let mut copy = value.clone();
//!     copy.value_mut::<String>()?.replace_range(.., "world");
//!
//!     assert_eq!(value.value::<String>()?, "hello");
//!     assert_eq!(copy.value::<String>()?, "world");
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Lifecycle transitions (storing, deep-cloning, replacing and moving out a
//! value) are reported as [`tracing`] events at `TRACE` level, and rejected
//! extractions at `DEBUG` level. The crate never installs a subscriber.
//!
//! ## Features
//!
//! - `std`: enables the `std` features of the dependencies. The
//!   crate itself only needs `core` and `alloc`.
//!
//! For implementation details, see the [`anyslot-internals`] crate.
//!
//! [`anyslot-internals`]: anyslot_internals

extern crate alloc;

mod any_value;
mod error;
pub mod prelude;

pub use anyslot_internals::OwningPtr;

pub use self::{any_value::AnyValue, error::ValueError};
