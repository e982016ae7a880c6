//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the workflows expect from infrastructure.
//! They contain no transport details and use only domain types.
//!
//! # Design Rules
//!
//! - No HTTP or serialization types in any signature
//! - Stores are intent-based: list, get, create, update, delete
//! - "Not found" is a distinct error variant so callers can treat it as
//!   an idempotent success where that makes sense

pub mod output_sink;
pub mod secret_store;
pub mod service_account_store;

use thiserror::Error;

pub use output_sink::{CapturingSink, NoopSink, OutputSink, StdoutSink};
pub use secret_store::SecretStore;
pub use service_account_store::ServiceAccountStore;

/// Convenience result type for store operations.
pub type ClusterResult<T> = Result<T, ClusterError>;

/// Domain-specific errors for cluster store operations.
///
/// This error type abstracts away the transport (REST, in-memory, ...)
/// and lets workflows branch on the conditions they care about.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClusterError {
    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The write lost an optimistic concurrency race or the name is taken.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The cluster rejected the request.
    #[error("request rejected with status {status}: {message}")]
    Rejected {
        /// Status code returned by the cluster.
        status: u16,
        /// Message returned by the cluster.
        message: String,
    },

    /// The cluster could not be reached.
    #[error("cluster unavailable: {0}")]
    Unavailable(String),

    /// A stored object could not be interpreted.
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl ClusterError {
    /// Whether this error means the resource is already gone.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
