//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be converted to/from JSON
//! - **Contextual**: Driver failures carry the operation that issued them

use serde::{Deserialize, Serialize};

/// Command execution errors.
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Validation | `InvalidRequest` | Rejected before any driver call |
/// | Driver | `DriverFailure` | A read or catalogue call failed |
/// | Write | `WriteFailed` | A mutation failed as a whole |
///
/// Best-effort lookups (index names, document counts) never produce an
/// error; they fall back to empty defaults.
///
/// # Example
///
/// ```ignore
/// use docbridge_executor::{Command, Error, Executor};
///
/// match executor.execute(cmd) {
///     Ok(output) => { /* handle success */ }
///     Err(Error::InvalidRequest { reason }) => {
///         println!("rejected: {}", reason);
///     }
///     Err(e) => {
///         println!("Error: {}", e);
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Validation ====================
    /// Missing required field, unrecognized operation or malformed value
    #[error("invalid request: {reason}")]
    InvalidRequest {
        /// What was wrong with the request
        reason: String,
    },

    // ==================== Driver ====================
    /// The database rejected or failed a read
    #[error("failed to execute {operation}: {reason}")]
    DriverFailure {
        /// Operation that issued the driver call
        operation: String,
        /// Driver message, verbatim
        reason: String,
    },

    /// The database rejected or failed a write
    #[error("failed to execute {operation}: {reason}")]
    WriteFailed {
        /// Write operation that failed
        operation: String,
        /// Driver message, verbatim
        reason: String,
    },
}

impl Error {
    /// Create an InvalidRequest error
    pub fn invalid(reason: impl Into<String>) -> Self {
        Error::InvalidRequest {
            reason: reason.into(),
        }
    }
}

/// Result type alias for executor operations
pub type Result<T> = std::result::Result<T, Error>;
