use std::cmp::Ordering;
use std::fmt::Display;

use crate::collection::Document;
use crate::common::{FieldPath, Value};
use crate::errors::{ErrorKind, HaliteError, HaliteResult};

use super::{
    ArrayContainsAnyFilter, ArrayContainsFilter, InFilter, KeyFilter, KeyInFilter,
};

/// The comparison operators a filter can apply to a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
pub enum Operator {
    LessThan,
    LessThanOrEqual,
    Equal,
    GreaterThan,
    GreaterThanOrEqual,
    In,
    ArrayContains,
    ArrayContainsAny,
}

impl Operator {
    /// Returns the operator's symbol, used in canonical ids and display.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::Equal => "==",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
            Operator::In => "in",
            Operator::ArrayContains => "array_contains",
            Operator::ArrayContainsAny => "array_contains_any",
        }
    }

    /// Checks whether this is one of the four inequality operators.
    pub fn is_inequality(&self) -> bool {
        matches!(
            self,
            Operator::LessThan
                | Operator::LessThanOrEqual
                | Operator::GreaterThan
                | Operator::GreaterThanOrEqual
        )
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Checks a comparator result against a relational operator.
///
/// Only the five relational operators are meaningful here; construction
/// guarantees the membership operators never reach this point.
pub(crate) fn matches_comparison(op: Operator, comparison: Ordering) -> bool {
    match op {
        Operator::LessThan => comparison == Ordering::Less,
        Operator::LessThanOrEqual => comparison != Ordering::Greater,
        Operator::Equal => comparison == Ordering::Equal,
        Operator::GreaterThan => comparison == Ordering::Greater,
        Operator::GreaterThanOrEqual => comparison != Ordering::Less,
        _ => unreachable!("membership operator routed to a relational filter"),
    }
}

/// A per-document query predicate over a single field.
///
/// Construction through [`FieldFilter::create`] routes each
/// (field, operator, bound) combination to a specialized variant and
/// rejects invalid combinations up front, so evaluation itself never
/// fails. The variant tag takes part in equality: two filters over the
/// same field and bound but of different variants are not equal.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub enum FieldFilter {
    /// A relational comparison against an arbitrary field.
    Comparison(ComparisonFilter),
    /// A relational comparison against the document key.
    Key(KeyFilter),
    /// Key membership in a list of references.
    KeyIn(KeyInFilter),
    /// Field membership in a list of values.
    In(InFilter),
    /// Array field containing a value.
    ArrayContains(ArrayContainsFilter),
    /// Array field sharing at least one value with a list.
    ArrayContainsAny(ArrayContainsAnyFilter),
}

impl FieldFilter {
    /// Creates a filter for the given field, operator and bound value.
    ///
    /// # Errors
    ///
    /// Returns an error when the combination is invalid:
    /// - `array_contains` or `array_contains_any` on the key field
    /// - a key-field bound that is not a reference (or, for `in`, not an
    ///   array of references)
    /// - a null or NaN bound with any operator other than equality
    /// - `in` or `array_contains_any` with a non-array bound
    pub fn create(field: FieldPath, op: Operator, value: Value) -> HaliteResult<FieldFilter> {
        if field.is_key_field() {
            return match op {
                Operator::In => Ok(FieldFilter::KeyIn(KeyInFilter::new(field, value)?)),
                Operator::ArrayContains | Operator::ArrayContainsAny => {
                    log::error!("{} queries are not supported on the key field", op);
                    Err(HaliteError::new(
                        &format!("{} queries are not supported on the key field", op),
                        ErrorKind::InvalidArgument,
                    ))
                }
                _ => Ok(FieldFilter::Key(KeyFilter::new(field, op, value)?)),
            };
        }

        if value.is_null() {
            if op != Operator::Equal {
                log::error!("Null bounds support only equality comparisons");
                return Err(HaliteError::new(
                    "Null bounds support only equality comparisons",
                    ErrorKind::InvalidArgument,
                ));
            }
            return Ok(FieldFilter::Comparison(ComparisonFilter::new(
                field, op, value,
            )));
        }

        if value.is_nan() {
            if op != Operator::Equal {
                log::error!("NaN bounds support only equality comparisons");
                return Err(HaliteError::new(
                    "NaN bounds support only equality comparisons",
                    ErrorKind::InvalidArgument,
                ));
            }
            return Ok(FieldFilter::Comparison(ComparisonFilter::new(
                field, op, value,
            )));
        }

        match op {
            Operator::ArrayContains => Ok(FieldFilter::ArrayContains(ArrayContainsFilter::new(
                field, value,
            ))),
            Operator::In => Ok(FieldFilter::In(InFilter::new(field, value)?)),
            Operator::ArrayContainsAny => Ok(FieldFilter::ArrayContainsAny(
                ArrayContainsAnyFilter::new(field, value)?,
            )),
            _ => Ok(FieldFilter::Comparison(ComparisonFilter::new(
                field, op, value,
            ))),
        }
    }

    /// Evaluates this filter against a document.
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            FieldFilter::Comparison(filter) => filter.matches(document),
            FieldFilter::Key(filter) => filter.matches(document),
            FieldFilter::KeyIn(filter) => filter.matches(document),
            FieldFilter::In(filter) => filter.matches(document),
            FieldFilter::ArrayContains(filter) => filter.matches(document),
            FieldFilter::ArrayContainsAny(filter) => filter.matches(document),
        }
    }

    /// Returns the field this filter applies to.
    pub fn field(&self) -> &FieldPath {
        match self {
            FieldFilter::Comparison(filter) => filter.field(),
            FieldFilter::Key(filter) => filter.field(),
            FieldFilter::KeyIn(filter) => filter.field(),
            FieldFilter::In(filter) => filter.field(),
            FieldFilter::ArrayContains(filter) => filter.field(),
            FieldFilter::ArrayContainsAny(filter) => filter.field(),
        }
    }

    /// Returns the operator this filter applies.
    pub fn operator(&self) -> Operator {
        match self {
            FieldFilter::Comparison(filter) => filter.operator(),
            FieldFilter::Key(filter) => filter.operator(),
            FieldFilter::KeyIn(_) => Operator::In,
            FieldFilter::In(_) => Operator::In,
            FieldFilter::ArrayContains(_) => Operator::ArrayContains,
            FieldFilter::ArrayContainsAny(_) => Operator::ArrayContainsAny,
        }
    }

    /// Returns the bound value.
    pub fn value(&self) -> &Value {
        match self {
            FieldFilter::Comparison(filter) => filter.value(),
            FieldFilter::Key(filter) => filter.value(),
            FieldFilter::KeyIn(filter) => filter.value(),
            FieldFilter::In(filter) => filter.value(),
            FieldFilter::ArrayContains(filter) => filter.value(),
            FieldFilter::ArrayContainsAny(filter) => filter.value(),
        }
    }

    /// Checks whether this filter uses an inequality operator.
    pub fn is_inequality(&self) -> bool {
        self.operator().is_inequality()
    }

    /// Returns the identifier callers use to deduplicate filters.
    ///
    /// The bound is rendered through [`Value::canonical_string`], which is
    /// unambiguous across kinds, so the integer `3` and the string `"3"`
    /// produce distinct ids.
    pub fn canonical_id(&self) -> String {
        format!(
            "{}{}{}",
            self.field().canonical_string(),
            self.operator().symbol(),
            self.value().canonical_string()
        )
    }
}

impl Display for FieldFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({} {} {})",
            self.field().canonical_string(),
            self.operator(),
            self.value().canonical_string()
        )
    }
}

/// A relational filter over an arbitrary field.
///
/// Matches when the field exists, shares the bound's kind rank, and the
/// comparator result satisfies the operator. A cross-kind inequality never
/// matches: an integer field never satisfies `> "a"`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ComparisonFilter {
    field: FieldPath,
    op: Operator,
    value: Value,
}

impl ComparisonFilter {
    pub(crate) fn new(field: FieldPath, op: Operator, value: Value) -> ComparisonFilter {
        ComparisonFilter { field, op, value }
    }

    #[inline]
    pub fn field(&self) -> &FieldPath {
        &self.field
    }

    #[inline]
    pub fn operator(&self) -> Operator {
        self.op
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Evaluates the comparison against the document's field value.
    ///
    /// A NaN bound reaches this point only with the equality operator, and
    /// the total-order comparator makes NaN equal exactly to itself, so
    /// `== NaN` matches NaN fields and nothing else.
    pub fn matches(&self, document: &Document) -> bool {
        match document.field(&self.field) {
            Some(other) => {
                // only compare kinds sharing a rank, such as double and int
                other.type_order() == self.value.type_order()
                    && matches_comparison(self.op, other.cmp(&self.value))
            }
            None => false,
        }
    }
}

impl Display for ComparisonFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({} {} {})",
            self.field.canonical_string(),
            self.op,
            self.value.canonical_string()
        )
    }
}
