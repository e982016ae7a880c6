//! Internal error types for API server requests.
//!
//! These errors stay inside the adapter except at construction time; store
//! calls map them to [`ClusterError`](clusteradm_core::ClusterError) at the
//! port boundary.

use thiserror::Error;

/// Result type alias for API server operations.
pub type ApiResult<T> = Result<T, ClusterApiError>;

/// Errors raised while talking to the API server.
#[derive(Debug, Error)]
pub enum ClusterApiError {
    /// The server answered with a non-success status.
    #[error("API request failed with status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Message from the server's Status object, or the raw body
        message: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The configured API server URL is unusable.
    #[error("Invalid API server URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL as configured
        url: String,
        /// What is wrong with it
        reason: String,
    },

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A secret data value was not valid base64.
    #[error("Invalid base64 in secret data key '{key}': {source}")]
    InvalidData {
        /// The data key holding the bad value
        key: String,
        #[source]
        source: base64::DecodeError,
    },
}
