use std::fmt::Display;

use crate::common::{FieldPath, Timestamp, Value};

use super::ObjectValue;

/// The identity of a document: its canonical resource path.
///
/// Key resolution (splitting a path into collection and document segments,
/// validating against a database root) belongs to the layers above; here a
/// key is an opaque ordered name that filters can compare against
/// [`Value::Reference`] bounds.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Deserialize, serde::Serialize,
)]
pub struct DocumentKey {
    path: String,
}

impl DocumentKey {
    /// Creates a key from a canonical resource path.
    pub fn from_path(path: impl Into<String>) -> DocumentKey {
        DocumentKey { path: path.into() }
    }

    /// Returns the canonical resource path.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Display for DocumentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path)
    }
}

/// A document: a key, the version it was last read at, and its field data.
///
/// The query layer consumes documents through [`Document::field`] only. The
/// reserved key field resolves to the document's own key as a reference
/// value; every other path reads from the underlying [`ObjectValue`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Document {
    key: DocumentKey,
    version: Timestamp,
    data: ObjectValue,
}

impl Document {
    /// Creates a new document.
    pub fn new(key: DocumentKey, version: Timestamp, data: ObjectValue) -> Document {
        Document { key, version, data }
    }

    /// Returns the document key.
    #[inline]
    pub fn key(&self) -> &DocumentKey {
        &self.key
    }

    /// Returns the version this document was last read at.
    #[inline]
    pub fn version(&self) -> &Timestamp {
        &self.version
    }

    /// Returns the document's field data.
    #[inline]
    pub fn data(&self) -> &ObjectValue {
        &self.data
    }

    /// Reads the value at `path`.
    ///
    /// The reserved key field yields this document's key as a
    /// [`Value::Reference`]; any other path is resolved against the field
    /// data.
    pub fn field(&self, path: &FieldPath) -> Option<Value> {
        if path.is_key_field() {
            Some(Value::Reference(self.key.path().to_string()))
        } else {
            self.data.get(path)
        }
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {}: {}", self.key, self.version, self.data)
    }
}
