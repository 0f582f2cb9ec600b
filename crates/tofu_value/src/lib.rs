//! Tofu value cell and type registry.
//!
//! This crate contains the primitive every tofu container is built on:
//! - [`Kind`]: the closed registry of value kinds (`i32`, `cstr`, `bool`, ...)
//! - [`TofuValue`]: a kind tag plus an owned string payload, a mutability
//!   state, an identity hash and descriptive [`Attribute`] metadata
//! - [`hash64_seed`]: the seeded 64-bit hash shared with the bloom filter
//! - [`TofuError`]: the error taxonomy used by every tofu crate
//!
//! # Lifecycle
//!
//! | Operation | Rust form |
//! |-----------|-----------|
//! | create | [`TofuValue::create`] / [`TofuValue::new`] |
//! | create default | [`TofuValue::default`] |
//! | copy | [`Clone`] (deep) |
//! | move | [`TofuValue::take`] (source left vacated) |
//! | destroy | [`TofuValue::release`] (idempotent) or drop |
//!
//! Equality and ordering look at `(kind, payload)` only; attributes,
//! mutability and the hash slot never take part.

mod convert;
mod error;
mod hash;
mod kind;
mod text;
mod value;

pub use error::{TofuError, TofuResult};
pub use hash::{hash64, hash64_seed, mix64};
pub use kind::Kind;
pub use value::{Attribute, Mutability, TofuValue};
