//! Shared helpers for Diesel repository implementations.
//!
//! Each repository maps these readable messages into its own port error
//! variants so the domain never sees Diesel types.

use tracing::debug;

use super::pool::PoolError;

/// Extract a readable message from a pool error.
pub(crate) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Extract a readable message from a Diesel error and emit debug context.
pub(crate) fn diesel_error_message(error: &diesel::result::Error, operation: &str) -> String {
    let message = error.to_string();
    debug!(%message, %operation, "diesel operation failed");
    message
}
