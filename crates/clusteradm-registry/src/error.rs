//! Error types for registry workflows.

use clusteradm_core::{ClusterError, ResourceHandle};
use thiserror::Error;

/// A hard failure reported by a bulk delete.
///
/// Only one failure is surfaced per bulk delete even when several
/// deletions failed; every failure is logged as it happens.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BulkDeleteError {
    /// The store refused or failed to delete a secret.
    #[error("failed to delete secret '{handle}': {source}")]
    Delete {
        /// The secret that could not be deleted.
        handle: ResourceHandle,
        /// The underlying store failure.
        source: ClusterError,
    },

    /// A deletion task ended without reporting an outcome.
    #[error("deletion task aborted: {0}")]
    TaskAborted(String),
}

/// Errors from the registry add / remove / list workflows.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A required command option was empty.
    #[error("'registry {command}' requires the registry {what} provided with the --{flag} option")]
    MissingOption {
        /// Sub-command name (`add`, `remove`).
        command: &'static str,
        /// Human description of the value.
        what: &'static str,
        /// Flag name without dashes.
        flag: &'static str,
    },

    /// Listing managed secrets failed.
    #[error("failed to list secret: {0}")]
    ListSecrets(#[source] ClusterError),

    /// A managed secret holds an unreadable credential document.
    #[error("failed unmarshal secret data '.dockerconfigjson' of secret '{secret}': {source}")]
    DecodeSecret {
        /// Name of the offending secret.
        secret: String,
        /// The parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// The credential document could not be serialized.
    #[error("failed to encode registry credentials: {0}")]
    EncodeSecret(#[source] serde_json::Error),

    /// Creating the credential secret failed.
    #[error("failed to create registry secret: {0}")]
    CreateSecret(#[source] ClusterError),

    /// Reading the default service account failed.
    #[error("failed to get ServiceAccount: {0}")]
    GetServiceAccount(#[source] ClusterError),

    /// Attaching the new secret to the service account failed.
    #[error("failed to add registry secret in default ServiceAccount: {0}")]
    AttachSecret(#[source] ClusterError),

    /// Detaching secrets from the service account failed.
    #[error("failed to remove registry secret in default ServiceAccount: {0}")]
    DetachSecrets(#[source] ClusterError),

    /// At least one secret could not be deleted.
    #[error("failed to delete secrets: {0}")]
    DeleteSecrets(#[from] BulkDeleteError),
}

impl RegistryError {
    /// Whether the error stems from invalid command input.
    #[must_use]
    pub const fn is_usage(&self) -> bool {
        matches!(self, Self::MissingOption { .. })
    }

    /// Whether the error stems from an unreachable cluster.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        match self {
            Self::ListSecrets(e)
            | Self::CreateSecret(e)
            | Self::GetServiceAccount(e)
            | Self::AttachSecret(e)
            | Self::DetachSecrets(e) => matches!(e, ClusterError::Unavailable(_)),
            Self::DeleteSecrets(BulkDeleteError::Delete { source, .. }) => {
                matches!(source, ClusterError::Unavailable(_))
            }
            _ => false,
        }
    }
}
