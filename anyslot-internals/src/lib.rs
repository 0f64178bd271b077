#![no_std]
#![forbid(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::missing_docs_in_private_items,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
#![allow(rustdoc::private_intra_doc_links)]
//! Internal implementation crate for [`anyslot`].
//!
//! # Overview
//!
//! This crate contains the low-level ownership and type-erasure primitives
//! that power the [`anyslot`] value container. The public crate only adds
//! the user-facing API and error reporting on top of them.
//!
//! **This crate is an implementation detail.** No semantic versioning guarantees
//! are provided. Users should depend on the [`anyslot`] crate, not this one.
//!
//! # Architecture
//!
//! - **[`owning`]**: [`OwningPtr`], a move-only handle that is the sole owner
//!   of one heap allocation. Moving ownership between handles swaps the
//!   pointers, so the released object is always the one the last owner held.
//! - **[`model`]**: The [`Model`] trait describing "a value of some erased
//!   type", and [`ValueAdapter`], its only implementation. An
//!   `OwningPtr<dyn Model>` is the storage slot of an `AnyValue`.
//!
//! # Safety Strategy
//!
//! Type erasure requires careful handling to maintain Rust's type safety
//! guarantees. When we recover a `&T` from a `&dyn Model`, we must be sure
//! that the concrete object behind the trait object really is a
//! `ValueAdapter<T>`.
//!
//! This crate maintains safety through:
//!
//! - **Module-based encapsulation**: the pointer inside [`OwningPtr`] is
//!   module-private, so its provenance invariant is verifiable in one file
//! - **A sealed trait**: [`Model`] cannot be implemented outside this crate,
//!   so the type tag it reports is always the one of the embedded payload
//! - **Documented unchecked contracts**: each `unsafe fn` states exactly when
//!   it can be called
//!
//! [`anyslot`]: https://docs.rs/anyslot/latest/anyslot/

extern crate alloc;

pub mod model;
pub mod owning;

pub use model::{Model, ValueAdapter};
pub use owning::OwningPtr;
