//! CLI-specific error types and mappings.
//!
//! Library errors are folded into [`CliError`] so the binary can pick an
//! exit code for them.

use clusteradm_cluster::ClusterApiError;
use clusteradm_profiling::DownloadError;
use clusteradm_registry::RegistryError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Missing or invalid command-line input.
    #[error("{0}")]
    Usage(String),

    /// The API server or the profile endpoint could not be reached.
    #[error("{0}")]
    Unavailable(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The operation was stopped by the user.
    #[error("{0}")]
    Interrupted(String),

    /// Any other failure.
    #[error("{0}")]
    General(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    /// - 130: Terminated by Ctrl-C
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::General(_) => 1,
            Self::Usage(_) => 2,        // EX_USAGE
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Io(_) => 74,          // EX_IOERR
            Self::Config(_) => 78,      // EX_CONFIG
            Self::Interrupted(_) => 130,
        }
    }
}

impl From<RegistryError> for CliError {
    fn from(err: RegistryError) -> Self {
        if err.is_usage() {
            Self::Usage(err.to_string())
        } else if err.is_unavailable() {
            Self::Unavailable(err.to_string())
        } else {
            Self::General(err.to_string())
        }
    }
}

impl From<DownloadError> for CliError {
    fn from(err: DownloadError) -> Self {
        match err {
            DownloadError::UnsupportedKind => Self::Usage(err.to_string()),
            DownloadError::Aborted | DownloadError::Transport(_) => {
                Self::Unavailable(err.to_string())
            }
            DownloadError::Canceled => Self::Interrupted(err.to_string()),
            DownloadError::Remote { .. } => Self::General(err.to_string()),
            DownloadError::Io(e) => Self::Io(e.to_string()),
        }
    }
}

impl From<ClusterApiError> for CliError {
    fn from(err: ClusterApiError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
