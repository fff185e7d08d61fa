use crate::common::{FieldPath, Value};
use crate::errors::HaliteResult;

use super::{FieldFilter, Operator};

/// Creates a fluent filter builder for the specified field path.
///
/// The returned builder provides methods for each operator; every method
/// runs the same validation as [`FieldFilter::create`].
///
/// # Examples
///
/// ```rust,ignore
/// use halite::common::FieldPath;
/// use halite::filter::field;
///
/// let age_filter = field(FieldPath::parse("age")?).gt(30)?;
/// let tag_filter = field(FieldPath::parse("tags")?).contains("urgent")?;
/// ```
pub fn field(path: FieldPath) -> FluentFilter {
    FluentFilter { field: path }
}

/// A fluent builder for constructing filters on a specific field.
pub struct FluentFilter {
    field: FieldPath,
}

impl FluentFilter {
    /// Builds an equality filter.
    #[inline]
    pub fn eq<T: Into<Value>>(self, value: T) -> HaliteResult<FieldFilter> {
        FieldFilter::create(self.field, Operator::Equal, value.into())
    }

    /// Builds a less-than filter.
    #[inline]
    pub fn lt<T: Into<Value>>(self, value: T) -> HaliteResult<FieldFilter> {
        FieldFilter::create(self.field, Operator::LessThan, value.into())
    }

    /// Builds a less-than-or-equal filter.
    #[inline]
    pub fn lte<T: Into<Value>>(self, value: T) -> HaliteResult<FieldFilter> {
        FieldFilter::create(self.field, Operator::LessThanOrEqual, value.into())
    }

    /// Builds a greater-than filter.
    #[inline]
    pub fn gt<T: Into<Value>>(self, value: T) -> HaliteResult<FieldFilter> {
        FieldFilter::create(self.field, Operator::GreaterThan, value.into())
    }

    /// Builds a greater-than-or-equal filter.
    #[inline]
    pub fn gte<T: Into<Value>>(self, value: T) -> HaliteResult<FieldFilter> {
        FieldFilter::create(self.field, Operator::GreaterThanOrEqual, value.into())
    }

    /// Builds a membership filter; `value` must be an array.
    #[inline]
    pub fn is_in<T: Into<Value>>(self, value: T) -> HaliteResult<FieldFilter> {
        FieldFilter::create(self.field, Operator::In, value.into())
    }

    /// Builds an array-contains filter.
    #[inline]
    pub fn contains<T: Into<Value>>(self, value: T) -> HaliteResult<FieldFilter> {
        FieldFilter::create(self.field, Operator::ArrayContains, value.into())
    }

    /// Builds an array-contains-any filter; `value` must be an array.
    #[inline]
    pub fn contains_any<T: Into<Value>>(self, value: T) -> HaliteResult<FieldFilter> {
        FieldFilter::create(self.field, Operator::ArrayContainsAny, value.into())
    }
}
