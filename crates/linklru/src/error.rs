//! Error types for linklru

use std::fmt;

/// Result type alias for linklru constructors
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when a cache cannot be built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Capacity must hold at least one entry
    ZeroCapacity,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ZeroCapacity => write!(f, "Invalid capacity: 0 (must be at least 1)"),
        }
    }
}

impl std::error::Error for Error {}
