//! Concurrent bulk deletion with a single aggregated failure.
//!
//! # Concurrency Model
//!
//! - One spawned task per handle, no pooling (the caller bounds the set)
//! - Hard failures go into a channel sized to the handle count, so a
//!   producer never waits on the consumer
//! - The orchestrator joins every task before it looks at the channel, and
//!   then reads it exactly once without blocking
//!
//! A failed deletion never cancels the others, and nothing already deleted
//! is restored.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use clusteradm_core::{ClusterError, OutputSink, ResourceHandle, SecretStore};

use crate::error::BulkDeleteError;

/// Result of deleting a single handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome {
    /// The resource was deleted.
    Deleted,
    /// The resource was already gone; treated as success.
    AlreadyAbsent,
    /// The store failed for any other reason.
    Failed(ClusterError),
}

impl DeletionOutcome {
    /// Classify the result of a store delete call.
    pub fn from_result(result: Result<(), ClusterError>) -> Self {
        match result {
            Ok(()) => Self::Deleted,
            Err(e) if e.is_not_found() => Self::AlreadyAbsent,
            Err(e) => Self::Failed(e),
        }
    }

    /// Whether the outcome counts as success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

/// Deletes a set of secrets concurrently.
#[derive(Clone)]
pub struct BulkDeleter {
    store: Arc<dyn SecretStore>,
    output: Arc<dyn OutputSink>,
}

impl BulkDeleter {
    /// Create a deleter over `store`, reporting progress to `output`.
    pub fn new(store: Arc<dyn SecretStore>, output: Arc<dyn OutputSink>) -> Self {
        Self { store, output }
    }

    /// Delete every handle in `handles` and wait for all of them.
    ///
    /// Returns after every deletion has been attempted exactly once.
    /// "Not found" counts as success. If any deletion failed, one of the
    /// failures is returned; which one is unspecified.
    pub async fn delete_all(
        &self,
        handles: &BTreeMap<String, ResourceHandle>,
    ) -> Result<(), BulkDeleteError> {
        if handles.is_empty() {
            return Ok(());
        }

        let (err_tx, mut err_rx) = mpsc::channel::<BulkDeleteError>(handles.len());
        let mut tasks = JoinSet::new();

        for handle in handles.values() {
            let store = Arc::clone(&self.store);
            let output = Arc::clone(&self.output);
            let err_tx = err_tx.clone();
            let handle = handle.clone();

            tasks.spawn(async move {
                let result = store.delete(handle.namespace(), handle.name()).await;
                match DeletionOutcome::from_result(result) {
                    DeletionOutcome::Deleted => {
                        debug!(secret = %handle, "Secret deleted");
                        output.line(&format!("Secret '{handle}' deleted"));
                    }
                    DeletionOutcome::AlreadyAbsent => {
                        debug!(secret = %handle, "Secret already absent");
                        output.line(&format!("Secret '{handle}' not found, skipped"));
                    }
                    DeletionOutcome::Failed(source) => {
                        warn!(secret = %handle, error = %source, "Failed to delete secret");
                        // Capacity equals the handle count, so this cannot be full
                        let _ = err_tx.try_send(BulkDeleteError::Delete { handle, source });
                    }
                }
            });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "Secret deletion task aborted");
                let _ = err_tx.try_send(BulkDeleteError::TaskAborted(e.to_string()));
            }
        }
        drop(err_tx);

        err_rx.try_recv().map_or(Ok(()), Err)
    }
}
