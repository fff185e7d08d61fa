use std::fmt::Display;

use crate::errors::{ErrorKind, HaliteError, HaliteResult};

/// A point in time with nanosecond precision.
///
/// Represented as whole seconds since the Unix epoch plus a non-negative
/// sub-second nanosecond component. The nanosecond component is always in
/// `[0, 1_000_000_000)`, so instants before the epoch carry a negative
/// `seconds` value and a positive `nanos` value.
///
/// Timestamps order by seconds first, then by nanoseconds.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Deserialize, serde::Serialize,
)]
pub struct Timestamp {
    seconds: i64,
    nanos: i32,
}

impl Timestamp {
    /// Creates a new timestamp from seconds since epoch and a sub-second
    /// nanosecond component.
    ///
    /// # Errors
    ///
    /// Returns an error if `nanos` is negative or is one second or more.
    pub fn new(seconds: i64, nanos: i32) -> HaliteResult<Timestamp> {
        if !(0..1_000_000_000).contains(&nanos) {
            log::error!("Timestamp nanoseconds out of range: {}", nanos);
            return Err(HaliteError::new(
                &format!("Timestamp nanoseconds out of range: {}", nanos),
                ErrorKind::InvalidArgument,
            ));
        }
        Ok(Timestamp { seconds, nanos })
    }

    /// Returns the whole seconds since the Unix epoch.
    #[inline]
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Returns the sub-second nanosecond component.
    #[inline]
    pub fn nanos(&self) -> i32 {
        self.nanos
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:09}", self.seconds, self.nanos)
    }
}
