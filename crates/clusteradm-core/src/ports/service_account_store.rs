//! Service account store port.

use async_trait::async_trait;

use super::ClusterResult;
use crate::domain::ServiceAccount;

/// Storage for workload identities.
#[async_trait]
pub trait ServiceAccountStore: Send + Sync {
    /// Fetch `namespace/name`.
    async fn get(&self, namespace: &str, name: &str) -> ClusterResult<ServiceAccount>;

    /// Replace the stored service account with `account`.
    ///
    /// Implementations should honor `resource_version` for optimistic
    /// concurrency and return the stored result.
    async fn update(&self, account: &ServiceAccount) -> ClusterResult<ServiceAccount>;
}
