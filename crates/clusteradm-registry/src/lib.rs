//! Registry credential workflows for clusteradm.
//!
//! - [`BulkDeleter`] - concurrent delete of many secrets with a single
//!   aggregated failure
//! - [`RegistryService`] - the add / remove / list workflows that keep the
//!   default service account's image pull secrets in sync with the stored
//!   credential secrets

#![deny(unused_crate_dependencies)]

mod bulk_delete;
mod error;
mod service;

pub use bulk_delete::{BulkDeleter, DeletionOutcome};
pub use error::{BulkDeleteError, RegistryError};
pub use service::{AddRegistry, RegistryEntry, RegistryService, RemoveRegistry};

// Silence unused dev-dependency warnings (used by integration tests)
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use tokio_test as _;
