//! Public API for the sixel-reductor crate.
//!
//! This module provides the high-level API: the [`SixelConverter`] builder
//! and the [`ReductorError`] unified error type.

mod builder;
mod error;

pub use builder::SixelConverter;
pub use error::ReductorError;
