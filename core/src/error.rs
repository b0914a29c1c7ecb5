//! Error taxonomy for the pruning client.
//!
//! # Design
//! Every failure `PruneClient` can produce is one variant of `PruneError`.
//! `Validation` is always raised locally before any request is built; the
//! transport-level variants (`Connection`, `Timeout`, `Unexpected`) come from
//! a `Transport`; `Http` and `Decode` come from interpreting the response.

use std::time::Duration;

use thiserror::Error;

/// Errors returned by `PruneClient` operations.
#[derive(Debug, Error)]
pub enum PruneError {
    /// Empty code, empty query, or a threshold outside `[0.0, 1.0]`.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The service endpoint could not be reached at all.
    #[error("cannot reach the pruning service at {url} ({reason}); make sure the service is running")]
    Connection { url: String, reason: String },

    /// No response arrived within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The service answered with a non-2xx status.
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    /// The service answered 2xx but the body was not the expected JSON.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// Any other transport failure.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl PruneError {
    pub fn is_validation(&self) -> bool {
        matches!(self, PruneError::Validation(_))
    }
}
