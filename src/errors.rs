use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic};

/// Error kinds for value-model operations.
///
/// The value model distinguishes exactly two failure categories: arguments a
/// caller can fix, and invariant breaches a caller cannot.
///
/// # Examples
///
/// ```rust,ignore
/// use halite::errors::{ErrorKind, HaliteError, HaliteResult};
///
/// fn example() -> HaliteResult<()> {
///     Err(HaliteError::new("Field path cannot be empty", ErrorKind::InvalidArgument))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// The caller supplied an argument that violates a documented contract,
    /// such as an empty field path, a null or NaN bound with a non-equality
    /// operator, or a membership operator with a non-array bound.
    InvalidArgument,
    /// An internal invariant was breached. Seeing this kind indicates a bug
    /// in the value model itself, not in the calling code.
    Internal,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InvalidArgument => write!(f, "Invalid argument"),
            ErrorKind::Internal => write!(f, "Internal error"),
        }
    }
}

/// Custom error type for the value model.
///
/// `HaliteError` encapsulates the error message, kind, and optional cause.
/// It supports error chaining and captures a backtrace at construction for
/// debugging.
///
/// # Type alias
///
/// The `HaliteResult<T>` type alias is equivalent to `Result<T, HaliteError>`
/// and is used throughout the crate for operations that can fail.
#[derive(Clone)]
pub struct HaliteError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<HaliteError>>,
    backtrace: Atomic<Backtrace>,
}

impl HaliteError {
    /// Creates a new `HaliteError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        HaliteError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `HaliteError` with a cause error.
    ///
    /// This creates an error chain where the cause error is preserved for
    /// debugging.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: HaliteError) -> Self {
        HaliteError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&HaliteError> {
        self.cause.as_deref()
    }
}

impl Display for HaliteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for HaliteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for HaliteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for value-model operations.
///
/// `HaliteResult<T>` is shorthand for `Result<T, HaliteError>`. All fallible
/// operations in this crate return this type.
pub type HaliteResult<T> = Result<T, HaliteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halite_error_new_creates_error() {
        let error = HaliteError::new("An error occurred", ErrorKind::InvalidArgument);
        assert_eq!(error.message(), "An error occurred");
        assert_eq!(error.kind(), &ErrorKind::InvalidArgument);
        assert!(error.cause().is_none());
    }

    #[test]
    fn halite_error_new_with_cause_creates_chain() {
        let cause = HaliteError::new("Root cause", ErrorKind::Internal);
        let error =
            HaliteError::new_with_cause("An error occurred", ErrorKind::Internal, cause);
        assert_eq!(error.message(), "An error occurred");
        assert_eq!(error.kind(), &ErrorKind::Internal);
        assert_eq!(error.cause().unwrap().message(), "Root cause");
    }

    #[test]
    fn halite_error_display_formats_message_only() {
        let error = HaliteError::new("An error occurred", ErrorKind::InvalidArgument);
        assert_eq!(format!("{}", error), "An error occurred");
    }

    #[test]
    fn halite_error_debug_includes_cause() {
        let cause = HaliteError::new("Root cause", ErrorKind::Internal);
        let error = HaliteError::new_with_cause("Outer", ErrorKind::Internal, cause);
        let formatted = format!("{:?}", error);
        assert!(formatted.contains("Outer"));
        assert!(formatted.contains("Root cause"));
    }

    #[test]
    fn halite_error_source_returns_cause() {
        let cause = HaliteError::new("Root cause", ErrorKind::Internal);
        let error = HaliteError::new_with_cause("Outer", ErrorKind::Internal, cause);
        assert!(error.source().is_some());
    }
}
