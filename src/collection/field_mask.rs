use std::collections::BTreeSet;
use std::fmt::Display;

use crate::common::FieldPath;

/// An unordered set of leaf paths present in an object state.
///
/// Derived by recursive descent over an
/// [`ObjectValue`](super::ObjectValue); an empty nested map contributes the
/// path to the map itself so the object can be reconstructed exactly.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct FieldMask {
    mask: BTreeSet<FieldPath>,
}

impl FieldMask {
    /// Creates a mask from a set of paths.
    pub fn from_set(mask: BTreeSet<FieldPath>) -> FieldMask {
        FieldMask { mask }
    }

    /// Creates a mask from a list of paths, dropping duplicates.
    pub fn from_paths(paths: Vec<FieldPath>) -> FieldMask {
        FieldMask {
            mask: paths.into_iter().collect(),
        }
    }

    /// Returns the paths in this mask.
    #[inline]
    pub fn paths(&self) -> &BTreeSet<FieldPath> {
        &self.mask
    }

    /// Checks whether the given path is covered by this mask, that is,
    /// whether some mask entry is a prefix of it.
    pub fn covers(&self, path: &FieldPath) -> bool {
        self.mask.iter().any(|entry| entry.is_prefix_of(path))
    }

    /// Returns the number of paths in this mask.
    #[inline]
    pub fn len(&self) -> usize {
        self.mask.len()
    }

    /// Checks whether this mask is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }

    /// Iterates the paths in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldPath> {
        self.mask.iter()
    }
}

impl Display for FieldMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.mask.iter().map(FieldPath::canonical_string).collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(input: &str) -> FieldPath {
        FieldPath::parse(input).unwrap()
    }

    #[test]
    fn test_from_paths_drops_duplicates() {
        let mask = FieldMask::from_paths(vec![path("a.b"), path("a.b"), path("c")]);
        assert_eq!(mask.len(), 2);
    }

    #[test]
    fn test_covers_by_prefix() {
        let mask = FieldMask::from_paths(vec![path("a.b"), path("c")]);
        assert!(mask.covers(&path("a.b")));
        assert!(mask.covers(&path("a.b.c")));
        assert!(mask.covers(&path("c.d")));
        assert!(!mask.covers(&path("a")));
        assert!(!mask.covers(&path("b")));
    }

    #[test]
    fn test_display_lists_sorted_paths() {
        let mask = FieldMask::from_paths(vec![path("b"), path("a")]);
        assert_eq!(format!("{}", mask), "{a, b}");
    }

    #[test]
    fn test_empty_mask() {
        let mask = FieldMask::default();
        assert!(mask.is_empty());
        assert!(!mask.covers(&path("a")));
    }
}
