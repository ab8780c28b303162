//! Error types for driver calls
//!
//! Every failure a [`Driver`](crate::Driver) reports is a [`DriverError`].
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use thiserror::Error;

/// Result type alias for driver operations
pub type DriverResult<T> = std::result::Result<T, DriverError>;

/// Errors reported by the database driver
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DriverError {
    /// Namespace, collection or index does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Entity already exists
    #[error("conflict: {0}")]
    Conflict(String),

    /// The query is well-formed but cannot be evaluated against the data
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Connectivity or permission failure
    #[error("unavailable: {0}")]
    Unavailable(String),
}

impl DriverError {
    /// Create a NotFound error
    pub fn not_found(what: impl Into<String>) -> Self {
        DriverError::NotFound(what.into())
    }

    /// Create an InvalidQuery error
    pub fn invalid_query(reason: impl Into<String>) -> Self {
        DriverError::InvalidQuery(reason.into())
    }
}
