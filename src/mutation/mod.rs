//! Idempotent mutations of array-valued fields.
//!
//! Array transforms compute a new array value from whatever value a field
//! held before. Applying a transform twice gives the same result as
//! applying it once, so the client can recompute locally exactly what the
//! server will compute remotely without exchanging a base value.

mod array_transform;

pub use array_transform::*;
