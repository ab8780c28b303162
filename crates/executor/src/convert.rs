//! Error conversion from driver errors.
//!
//! Driver errors are wrapped with the name of the operation that issued
//! them; the driver's own message is kept verbatim.

use docbridge_core::DriverResult;

use crate::Error;

/// Wrap a failed read or catalogue call.
pub fn convert_result<T>(result: DriverResult<T>, operation: &str) -> crate::Result<T> {
    result.map_err(|e| Error::DriverFailure {
        operation: operation.to_string(),
        reason: e.to_string(),
    })
}

/// Wrap a failed mutation.
pub fn convert_write<T>(result: DriverResult<T>, operation: &str) -> crate::Result<T> {
    result.map_err(|e| Error::WriteFailed {
        operation: operation.to_string(),
        reason: e.to_string(),
    })
}
