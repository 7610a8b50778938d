//! Error types for recency

use std::fmt;

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache construction and reconfiguration
///
/// Lookups, insertions, and clears are total over their input domain; the
/// only fallible operations are the ones that take a capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Requested capacity cannot hold a single entry (must be at least 1)
    InvalidCapacity(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity(requested) => {
                write!(f, "invalid capacity: {} (must be at least 1)", requested)
            }
        }
    }
}

impl std::error::Error for Error {}
