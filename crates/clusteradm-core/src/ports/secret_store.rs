//! Secret store port.

use async_trait::async_trait;

use super::ClusterResult;
use crate::domain::{LabelSelector, NewSecret, Secret};

/// Storage for namespaced secrets.
///
/// Implementations must report a missing secret as
/// [`ClusterError::NotFound`](super::ClusterError::NotFound) so bulk
/// deletion can treat it as already done.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// List secrets in `namespace` whose labels satisfy `selector`.
    async fn list(&self, namespace: &str, selector: &LabelSelector) -> ClusterResult<Vec<Secret>>;

    /// Create a secret and return it as stored (with its final name).
    async fn create(&self, secret: &NewSecret) -> ClusterResult<Secret>;

    /// Delete the secret `namespace/name`.
    async fn delete(&self, namespace: &str, name: &str) -> ClusterResult<()>;
}
