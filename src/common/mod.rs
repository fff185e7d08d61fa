//! Shared value-model types and utilities.
//!
//! This module provides the building blocks the rest of the crate is made
//! of: the tagged [`Value`] universe with its total order, the
//! [`FieldPath`] addressing type, and the [`Timestamp`] and [`GeoPoint`]
//! scalar payloads.
//!
//! # Values
//!
//! A [`Value`] is one of ten kinds. Values of different kinds order by a
//! fixed kind rank; values of the same kind order structurally. Integers and
//! doubles share a rank and compare mathematically.
//!
//! ```rust,ignore
//! use halite::{val, vmap};
//!
//! let number = val!(42);
//! let text = val!("hello");
//! let nested = vmap! { "a": { "b": [1, 2, 3] } };
//! assert!(number < text); // numbers rank below strings
//! ```

mod constants;
mod field_path;
mod geo_point;
mod timestamp;
mod value;

pub use constants::*;
pub use field_path::*;
pub use geo_point::*;
pub use timestamp::*;
pub use value::*;

pub use im::OrdMap;

use parking_lot::RwLock;
use std::sync::Arc;

/// A shared, lockable cell. Used where a non-`Clone` payload must live
/// inside a `Clone` type.
pub type Atomic<T> = Arc<RwLock<T>>;

/// Wraps a value in an [`Atomic`] cell.
pub fn atomic<T>(t: T) -> Atomic<T> {
    Arc::new(RwLock::new(t))
}
