//! Error types for the B+ tree index.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in the index.
///
/// Insertion itself never fails. Errors come only from construction,
/// diagnostic output, invariant checks, and logging setup.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested order is too small for the split algorithm.
    #[error("Invalid order {order}: must be at least {min}")]
    InvalidOrder { order: usize, min: usize },

    /// I/O error while writing a dump.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A structural invariant does not hold.
    ///
    /// This indicates a bug in the split logic.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// The tracing subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidOrder { order: 2, min: 3 };
        assert_eq!(format!("{}", err), "Invalid order 2: must be at least 3");

        let err = Error::InvariantViolation("fan-out".into());
        assert_eq!(format!("{}", err), "Invariant violation: fan-out");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: Error = io_err.into();

        match err {
            Error::Io(_) => {} // Success
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_io_error_source() {
        use std::error::Error as _;

        let err: Error = std::io::Error::new(std::io::ErrorKind::Other, "x").into();
        assert!(err.source().is_some());
        assert!(Error::Logging("x".into()).source().is_none());
    }
}
