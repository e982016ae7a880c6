//! Download error types.

use thiserror::Error;

/// Why a profile download did not complete.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The profile kind has no endpoint. Raised before any gate is awaited.
    #[error("unsupported profiling type")]
    UnsupportedKind,

    /// The stop gate fired before the ready gate. No request was sent.
    #[error("download failed: stopped before the endpoint became ready")]
    Aborted,

    /// The stop gate fired while the request was in flight.
    #[error("download canceled")]
    Canceled,

    /// The endpoint answered with a non-success status.
    #[error("download error: {body}, code {status}")]
    Remote {
        /// HTTP status code
        status: u16,
        /// Response body, verbatim
        body: String,
    },

    /// Connecting, sending or reading the response failed.
    #[error("download transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Writing to the sink failed.
    #[error("failed to write profile data: {0}")]
    Io(#[from] std::io::Error),
}

impl DownloadError {
    /// Whether either gate ended the download.
    pub const fn is_interrupted(&self) -> bool {
        matches!(self, Self::Aborted | Self::Canceled)
    }
}
