use std::fmt::Display;

use crate::collection::Document;
use crate::common::{FieldPath, Value};
use crate::errors::{ErrorKind, HaliteError, HaliteResult};

/// Matches documents whose field equals at least one element of the bound
/// array. Equality is [`Value::query_equals`], so a NaN element matches
/// nothing.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct InFilter {
    field: FieldPath,
    value: Value,
}

impl InFilter {
    pub(crate) fn new(field: FieldPath, value: Value) -> HaliteResult<InFilter> {
        if !value.is_array() {
            log::error!("Membership filters require an array bound");
            return Err(HaliteError::new(
                "Membership filters require an array bound",
                ErrorKind::InvalidArgument,
            ));
        }
        Ok(InFilter { field, value })
    }

    #[inline]
    pub fn field(&self) -> &FieldPath {
        &self.field
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn matches(&self, document: &Document) -> bool {
        let candidates = match self.value.as_array() {
            Some(candidates) => candidates,
            None => return false,
        };
        match document.field(&self.field) {
            Some(other) => candidates.iter().any(|candidate| candidate.query_equals(&other)),
            None => false,
        }
    }
}

impl Display for InFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({} in {})",
            self.field.canonical_string(),
            self.value.canonical_string()
        )
    }
}

/// Matches documents whose field is an array containing an element equal
/// to the bound value.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ArrayContainsFilter {
    field: FieldPath,
    value: Value,
}

impl ArrayContainsFilter {
    pub(crate) fn new(field: FieldPath, value: Value) -> ArrayContainsFilter {
        ArrayContainsFilter { field, value }
    }

    #[inline]
    pub fn field(&self) -> &FieldPath {
        &self.field
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn matches(&self, document: &Document) -> bool {
        match document.field(&self.field) {
            Some(Value::Array(elements)) => elements
                .iter()
                .any(|element| element.query_equals(&self.value)),
            _ => false,
        }
    }
}

impl Display for ArrayContainsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({} array_contains {})",
            self.field.canonical_string(),
            self.value.canonical_string()
        )
    }
}

/// Matches documents whose array field shares at least one element with
/// the bound array.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ArrayContainsAnyFilter {
    field: FieldPath,
    value: Value,
}

impl ArrayContainsAnyFilter {
    pub(crate) fn new(field: FieldPath, value: Value) -> HaliteResult<ArrayContainsAnyFilter> {
        if !value.is_array() {
            log::error!("Membership filters require an array bound");
            return Err(HaliteError::new(
                "Membership filters require an array bound",
                ErrorKind::InvalidArgument,
            ));
        }
        Ok(ArrayContainsAnyFilter { field, value })
    }

    #[inline]
    pub fn field(&self) -> &FieldPath {
        &self.field
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn matches(&self, document: &Document) -> bool {
        let candidates = match self.value.as_array() {
            Some(candidates) => candidates,
            None => return false,
        };
        match document.field(&self.field) {
            Some(Value::Array(elements)) => elements.iter().any(|element| {
                candidates
                    .iter()
                    .any(|candidate| candidate.query_equals(element))
            }),
            _ => false,
        }
    }
}

impl Display for ArrayContainsAnyFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({} array_contains_any {})",
            self.field.canonical_string(),
            self.value.canonical_string()
        )
    }
}
