//! Errors shared by the persistence ports.

use thiserror::Error;

/// Failure talking to the user/subscription store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Transport failure or timeout.
    #[error("store unreachable: {0}")]
    Unavailable(String),

    /// The store answered with an error status.
    #[error("store rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The store answered with a body we could not read.
    #[error("unexpected store response: {0}")]
    Decode(String),
}
