//! Backend error type.

use thiserror::Error;

/// Errors from handle construction or an Alpaca API call.
#[derive(Debug, Error, Clone)]
pub enum AlpacaError {
    /// Credentials were missing, empty, or rejected by the backend.
    #[error("authentication failed: invalid or missing API credentials")]
    AuthenticationFailed,

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The trading API rejected the request (e.g. an unfillable order).
    #[error("rejected: {0}")]
    Rejected(String),

    /// Rate limited.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Suggested retry delay in seconds.
        retry_after_secs: u64,
    },

    /// API returned an error payload.
    #[error("API error {code}: {message}")]
    Api {
        /// Error code from the API (falls back to the HTTP status).
        code: String,
        /// Error message from the API.
        message: String,
    },

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// Response body could not be decoded.
    #[error("invalid response body: {0}")]
    JsonParse(String),
}
