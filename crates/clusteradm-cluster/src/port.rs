//! Store port implementations for `KubeApiClient`.
//!
//! Converts between the wire objects and the core domain types, and maps
//! [`ClusterApiError`] to [`ClusterError`] at the boundary.

use async_trait::async_trait;
use reqwest::Method;

use clusteradm_core::{
    ClusterError, ClusterResult, LabelSelector, NewSecret, Secret, SecretStore, ServiceAccount,
    ServiceAccountStore,
};

use crate::client::KubeApiClient;
use crate::error::ClusterApiError;
use crate::wire::{PullSecretsPatch, SecretList, SecretObject, ServiceAccountObject};

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `ClusterApiError` to core `ClusterError`.
fn map_error(err: ClusterApiError) -> ClusterError {
    match err {
        ClusterApiError::Status { status, message } => match status {
            404 => ClusterError::NotFound(message),
            409 => ClusterError::Conflict(message),
            _ => ClusterError::Rejected { status, message },
        },
        ClusterApiError::Network(e) => ClusterError::Unavailable(e.to_string()),
        ClusterApiError::InvalidUrl { .. } => ClusterError::Unavailable(err.to_string()),
        ClusterApiError::JsonParse(e) => ClusterError::InvalidData(e.to_string()),
        ClusterApiError::InvalidData { .. } => ClusterError::InvalidData(err.to_string()),
    }
}

// ============================================================================
// Port Implementations
// ============================================================================

#[async_trait]
impl SecretStore for KubeApiClient {
    async fn list(&self, namespace: &str, selector: &LabelSelector) -> ClusterResult<Vec<Secret>> {
        let mut url = self
            .resource_url(namespace, "secrets", None)
            .map_err(map_error)?;
        if !selector.is_empty() {
            url.query_pairs_mut()
                .append_pair("labelSelector", &selector.to_string());
        }

        let list: SecretList = self
            .send_json(self.request(Method::GET, url))
            .await
            .map_err(map_error)?;

        list.items
            .into_iter()
            .map(|item| item.into_domain(namespace).map_err(map_error))
            .collect()
    }

    async fn create(&self, secret: &NewSecret) -> ClusterResult<Secret> {
        let url = self
            .resource_url(&secret.namespace, "secrets", None)
            .map_err(map_error)?;
        let body = SecretObject::from_new(secret);

        let created: SecretObject = self
            .send_json(self.request(Method::POST, url).json(&body))
            .await
            .map_err(map_error)?;
        created.into_domain(&secret.namespace).map_err(map_error)
    }

    async fn delete(&self, namespace: &str, name: &str) -> ClusterResult<()> {
        let url = self
            .resource_url(namespace, "secrets", Some(name))
            .map_err(map_error)?;
        self.send_empty(self.request(Method::DELETE, url))
            .await
            .map_err(map_error)
    }
}

#[async_trait]
impl ServiceAccountStore for KubeApiClient {
    async fn get(&self, namespace: &str, name: &str) -> ClusterResult<ServiceAccount> {
        let url = self
            .resource_url(namespace, "serviceaccounts", Some(name))
            .map_err(map_error)?;
        let account: ServiceAccountObject = self
            .send_json(self.request(Method::GET, url))
            .await
            .map_err(map_error)?;
        Ok(account.into_domain(namespace))
    }

    async fn update(&self, account: &ServiceAccount) -> ClusterResult<ServiceAccount> {
        let url = self
            .resource_url(&account.namespace, "serviceaccounts", Some(&account.name))
            .map_err(map_error)?;
        let patch = serde_json::to_vec(&PullSecretsPatch::for_account(account))
            .map_err(|e| map_error(e.into()))?;

        let updated: ServiceAccountObject = self
            .send_json(self.merge_patch(url, patch))
            .await
            .map_err(map_error)?;
        Ok(updated.into_domain(&account.namespace))
    }
}
