//! Error types for API calls.

use reqwest::StatusCode;
use thiserror::Error;

use crate::store::StoreError;

/// Failure of an API call or of persisting its credential.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: connect, timeout, body read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status {
        status: StatusCode,
        /// The server's JSON `message` field when present, raw body text otherwise.
        message: String,
    },

    /// The durable token store could not be written.
    #[error("token store error: {0}")]
    Store(#[from] StoreError),
}
