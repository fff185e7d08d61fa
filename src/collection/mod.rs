//! Documents and persistent document state.
//!
//! This module provides the document-side half of the value model: the
//! [`ObjectValue`] overlay engine that layers pending writes over a server
//! snapshot, the [`FieldMask`] describing which leaves an object contains,
//! and the [`Document`] handle filters evaluate against.
//!
//! # Pending writes
//!
//! An [`ObjectValue`] is persistent: `set` and `delete` return new states
//! that share all unchanged structure with their predecessor. This makes a
//! chain of local mutations over one base snapshot cheap and keeps every
//! intermediate state readable.
//!
//! ```rust,ignore
//! use halite::collection::ObjectValue;
//! use halite::common::FieldPath;
//! use halite::{val, vmap};
//!
//! let snapshot = ObjectValue::try_from(vmap! { "title": "draft" })?;
//! let pending = snapshot.set(&FieldPath::parse("title")?, val!("final"))?;
//! // both states stay readable
//! ```

mod document;
mod field_mask;
mod object_value;

pub use document::*;
pub use field_mask::*;
pub use object_value::*;
