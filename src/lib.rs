//! # Halite - Document Value Model
//!
//! Halite is the value model at the core of an embedded, schemaless NoSQL
//! document store. It defines how field values are represented, ordered,
//! mutated and queried.
//!
//! ## Key Features
//!
//! - **Value algebra**: a tagged [`Value`](common::Value) universe (null,
//!   boolean, number, timestamp, string, bytes, reference, geo point, array,
//!   map) with a total order across kinds and a recursive structural order
//!   within each kind
//! - **Persistent documents**: [`ObjectValue`](collection::ObjectValue)
//!   layers path-addressed pending writes over an immutable base map with
//!   structural sharing, so every mutation yields a new snapshot without
//!   touching the old one
//! - **Field addressing**: [`FieldPath`](common::FieldPath) segments with
//!   prefix, pop and append operations and a canonical escaped dotted form
//! - **Array transforms**: idempotent
//!   [`ArrayTransform`](mutation::ArrayTransform) union and remove
//!   operations
//! - **Filters**: [`FieldFilter`](filter::FieldFilter) predicates
//!   (`<`, `<=`, `==`, `>`, `>=`, `in`, `array_contains`,
//!   `array_contains_any`) evaluated per document
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use halite::collection::ObjectValue;
//! use halite::common::FieldPath;
//! use halite::filter::{field, Operator};
//! use halite::{val, vmap};
//!
//! # fn main() -> halite::errors::HaliteResult<()> {
//! // Build a document state and mutate it without touching the original
//! let original = ObjectValue::try_from(vmap! { "a": { "b": 1 } })?;
//! let updated = original.set(&FieldPath::parse("a.b")?, val!(5))?;
//!
//! assert_eq!(original.get(&FieldPath::parse("a.b")?), Some(val!(1)));
//! assert_eq!(updated.get(&FieldPath::parse("a.b")?), Some(val!(5)));
//!
//! // Build a filter with the fluent API
//! let filter = field(FieldPath::parse("a.b")?).gt(3)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`collection`] - Documents, persistent object state and field masks
//! - [`common`] - Values, field paths, comparators and shared utilities
//! - [`errors`] - Error types and result definitions
//! - [`filter`] - Query filters evaluated against documents
//! - [`mutation`] - Idempotent array transforms
//!
//! ## Concurrency
//!
//! Every public type is an immutable value: mutators return fresh values and
//! never touch shared state, so snapshots can be read from any number of
//! threads without synchronization.

pub mod collection;
pub mod common;
pub mod errors;
pub mod filter;
pub mod mutation;

pub use common::{FieldPath, GeoPoint, Timestamp, Value};
