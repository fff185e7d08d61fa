//! Query filters evaluated per document.
//!
//! A [`FieldFilter`] pairs a field path, an operator and a bound value.
//! Construction through [`FieldFilter::create`] validates the combination
//! and routes it to a specialized variant; evaluation through
//! [`FieldFilter::matches`] is then infallible.
//!
//! # Creating filters
//!
//! Filters are created directly or through the fluent API:
//!
//! ```rust,ignore
//! use halite::common::FieldPath;
//! use halite::filter::{field, FieldFilter, Operator};
//! use halite::val;
//!
//! // direct construction
//! let filter = FieldFilter::create(FieldPath::parse("age")?, Operator::GreaterThan, val!(30))?;
//!
//! // fluent API
//! let filter = field(FieldPath::parse("age")?).gt(30)?;
//! let tags = field(FieldPath::parse("tags")?).contains_any(val!(["a", "b"]))?;
//! ```
//!
//! # Supported operators
//!
//! - **Relational**: `<`, `<=`, `==`, `>`, `>=` match only when the
//!   document field shares the bound's kind rank; a cross-kind inequality
//!   never matches
//! - **Membership**: `in`, `array_contains` and `array_contains_any` use
//!   an equality under which NaN matches nothing
//! - **Key field**: relational operators and `in` apply to the reserved
//!   key field with reference bounds; the array operators do not
//!
//! # Null and NaN bounds
//!
//! Null and NaN bounds support only equality: `== null` matches exactly
//! the documents whose field is null, and `== NaN` exactly those whose
//! field is a NaN double. Any other operator with these bounds is rejected
//! at construction.

mod field_filter;
mod fluent;
mod key_filters;
mod membership_filters;

pub use field_filter::*;
pub use fluent::*;
pub use key_filters::*;
pub use membership_filters::*;
