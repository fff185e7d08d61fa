use smallvec::SmallVec;
use std::fmt::Display;

use crate::errors::{ErrorKind, HaliteError, HaliteResult};

use super::KEY_FIELD_NAME;

type SegmentVec = SmallVec<[String; 4]>;

/// An immutable, ordered sequence of non-empty segments addressing a field
/// inside a nested document.
///
/// All operations return fresh paths; a `FieldPath` is never mutated in
/// place. Paths compare lexicographically segment by segment.
///
/// # Canonical form
///
/// The canonical string form joins segments with `.`. A segment containing
/// a `.` or a backtick is wrapped in backticks with embedded backticks
/// doubled, so the canonical form parses back unambiguously:
///
/// ```rust,ignore
/// let path = FieldPath::from_segments(vec!["a".into(), "b.c".into()])?;
/// assert_eq!(path.canonical_string(), "a.`b.c`");
/// assert_eq!(FieldPath::parse("a.`b.c`")?, path);
/// ```
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Deserialize,
    serde::Serialize,
)]
pub struct FieldPath {
    segments: SegmentVec,
}

impl FieldPath {
    /// Creates the empty path, addressing the document root.
    pub fn empty() -> FieldPath {
        FieldPath {
            segments: SegmentVec::new(),
        }
    }

    /// Creates a path from the given segments.
    ///
    /// # Errors
    ///
    /// Returns an error if any segment is an empty string.
    pub fn from_segments(segments: Vec<String>) -> HaliteResult<FieldPath> {
        for segment in &segments {
            if segment.is_empty() {
                log::error!("Field path segments cannot be empty");
                return Err(HaliteError::new(
                    "Field path segments cannot be empty",
                    ErrorKind::InvalidArgument,
                ));
            }
        }
        Ok(FieldPath {
            segments: segments.into(),
        })
    }

    /// Creates a single-segment path. The segment is trusted to be
    /// non-empty; use [`FieldPath::from_segments`] for validated input.
    pub fn from_single_segment(segment: impl Into<String>) -> FieldPath {
        let mut segments = SegmentVec::new();
        segments.push(segment.into());
        FieldPath { segments }
    }

    /// Returns the path addressing the reserved key field.
    pub fn key_path() -> FieldPath {
        FieldPath::from_single_segment(KEY_FIELD_NAME)
    }

    /// Parses a canonical dotted path, honoring backtick quoting.
    ///
    /// Inside backticks a `.` is part of the segment and a doubled backtick
    /// is a literal backtick.
    ///
    /// # Errors
    ///
    /// Returns an error on empty input, an empty segment (leading, trailing
    /// or doubled dots) or an unterminated backtick quote.
    pub fn parse(input: &str) -> HaliteResult<FieldPath> {
        if input.is_empty() {
            log::error!("Field path string cannot be empty");
            return Err(HaliteError::new(
                "Field path string cannot be empty",
                ErrorKind::InvalidArgument,
            ));
        }

        let mut segments = SegmentVec::new();
        let mut current = String::new();
        let mut quoted = false;
        let mut chars = input.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '`' => {
                    if quoted && chars.peek() == Some(&'`') {
                        chars.next();
                        current.push('`');
                    } else {
                        quoted = !quoted;
                    }
                }
                '.' if !quoted => {
                    if current.is_empty() {
                        log::error!("Field path {} contains an empty segment", input);
                        return Err(HaliteError::new(
                            &format!("Field path {} contains an empty segment", input),
                            ErrorKind::InvalidArgument,
                        ));
                    }
                    segments.push(std::mem::take(&mut current));
                }
                other => current.push(other),
            }
        }

        if quoted {
            log::error!("Field path {} has an unterminated quote", input);
            return Err(HaliteError::new(
                &format!("Field path {} has an unterminated quote", input),
                ErrorKind::InvalidArgument,
            ));
        }
        if current.is_empty() {
            log::error!("Field path {} contains an empty segment", input);
            return Err(HaliteError::new(
                &format!("Field path {} contains an empty segment", input),
                ErrorKind::InvalidArgument,
            ));
        }
        segments.push(current);

        Ok(FieldPath { segments })
    }

    /// Returns the number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Checks whether this is the empty path.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the segment at the given position.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn segment(&self, index: usize) -> &str {
        &self.segments[index]
    }

    /// Returns the first segment, or `None` for the empty path.
    #[inline]
    pub fn first_segment(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    /// Returns the last segment, or `None` for the empty path.
    #[inline]
    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Returns a new path with the first segment removed. Popping the empty
    /// path yields the empty path.
    pub fn pop_first(&self) -> FieldPath {
        self.pop_first_n(1)
    }

    /// Returns a new path with the first `count` segments removed.
    pub fn pop_first_n(&self, count: usize) -> FieldPath {
        let start = count.min(self.segments.len());
        FieldPath {
            segments: self.segments[start..].iter().cloned().collect(),
        }
    }

    /// Returns a new path with the given segment appended.
    pub fn append_segment(&self, segment: impl Into<String>) -> FieldPath {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        FieldPath { segments }
    }

    /// Returns a new path with all segments of `other` appended.
    pub fn append_path(&self, other: &FieldPath) -> FieldPath {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        FieldPath { segments }
    }

    /// Checks whether this path is a prefix of `other`. Every path is a
    /// prefix of itself; the empty path is a prefix of every path.
    pub fn is_prefix_of(&self, other: &FieldPath) -> bool {
        if self.segments.len() > other.segments.len() {
            return false;
        }
        self.segments
            .iter()
            .zip(other.segments.iter())
            .all(|(left, right)| left == right)
    }

    /// Checks whether this path addresses the reserved key field.
    #[inline]
    pub fn is_key_field(&self) -> bool {
        self.segments.len() == 1 && self.segments[0] == KEY_FIELD_NAME
    }

    /// Returns the canonical dotted form with backtick escaping.
    pub fn canonical_string(&self) -> String {
        let mut out = String::new();
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                out.push('.');
            }
            if segment.contains('.') || segment.contains('`') {
                out.push('`');
                out.push_str(&segment.replace('`', "``"));
                out.push('`');
            } else {
                out.push_str(segment);
            }
        }
        out
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical_string())
    }
}
