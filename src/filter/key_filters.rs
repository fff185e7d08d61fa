use std::fmt::Display;

use crate::collection::{Document, DocumentKey};
use crate::common::{FieldPath, Value};
use crate::errors::{ErrorKind, HaliteError, HaliteResult};

use super::{matches_comparison, Operator};

/// A relational filter over the document key.
///
/// The bound must be a reference value; it is resolved to a
/// [`DocumentKey`] once at construction and compared against each
/// document's own key.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct KeyFilter {
    field: FieldPath,
    op: Operator,
    value: Value,
    key: DocumentKey,
}

impl KeyFilter {
    pub(crate) fn new(field: FieldPath, op: Operator, value: Value) -> HaliteResult<KeyFilter> {
        let key = match value.as_reference() {
            Some(reference) => DocumentKey::from_path(reference),
            None => {
                log::error!("Key field comparisons require a reference bound");
                return Err(HaliteError::new(
                    "Key field comparisons require a reference bound",
                    ErrorKind::InvalidArgument,
                ));
            }
        };
        Ok(KeyFilter {
            field,
            op,
            value,
            key,
        })
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

    /// Compares the document's key against the bound key.
    pub fn matches(&self, document: &Document) -> bool {
        matches_comparison(self.op, document.key().cmp(&self.key))
    }
}

impl Display for KeyFilter {
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

/// A membership filter over the document key: matches exactly the
/// documents whose key equals one of the bound references.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct KeyInFilter {
    field: FieldPath,
    value: Value,
    keys: Vec<DocumentKey>,
}

impl KeyInFilter {
    pub(crate) fn new(field: FieldPath, value: Value) -> HaliteResult<KeyInFilter> {
        let elements = match value.as_array() {
            Some(elements) => elements,
            None => {
                log::error!("Key membership requires an array bound");
                return Err(HaliteError::new(
                    "Key membership requires an array bound",
                    ErrorKind::InvalidArgument,
                ));
            }
        };

        let mut keys = Vec::with_capacity(elements.len());
        for element in elements {
            match element.as_reference() {
                Some(reference) => keys.push(DocumentKey::from_path(reference)),
                None => {
                    log::error!("Key membership bounds must all be references");
                    return Err(HaliteError::new(
                        "Key membership bounds must all be references",
                        ErrorKind::InvalidArgument,
                    ));
                }
            }
        }

        Ok(KeyInFilter { field, value, keys })
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
        self.keys.contains(document.key())
    }
}

impl Display for KeyInFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({} in {})",
            self.field.canonical_string(),
            self.value.canonical_string()
        )
    }
}
