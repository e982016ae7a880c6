//! REST client for the core/v1 API group.

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::ClusterClientConfig;
use crate::error::{ApiResult, ClusterApiError};
use crate::wire::StatusObject;

const MERGE_PATCH: &str = "application/merge-patch+json";

/// Client for the Kubernetes API server.
///
/// Implements [`SecretStore`](clusteradm_core::SecretStore) and
/// [`ServiceAccountStore`](clusteradm_core::ServiceAccountStore).
#[derive(Debug, Clone)]
pub struct KubeApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl KubeApiClient {
    /// Create a client from `config`.
    ///
    /// Fails if the API server URL does not parse or cannot carry a path,
    /// or if the HTTP client cannot be built.
    pub fn new(config: &ClusterClientConfig) -> ApiResult<Self> {
        let base_url =
            Url::parse(&config.api_server).map_err(|e| ClusterApiError::InvalidUrl {
                url: config.api_server.clone(),
                reason: e.to_string(),
            })?;
        if base_url.cannot_be_a_base() {
            return Err(ClusterApiError::InvalidUrl {
                url: config.api_server.clone(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .danger_accept_invalid_certs(config.insecure_skip_tls_verify);
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url,
            token: config.token.clone(),
        })
    }

    /// URL of a namespaced core/v1 collection or object.
    pub(crate) fn resource_url(
        &self,
        namespace: &str,
        resource: &str,
        name: Option<&str>,
    ) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments =
                url.path_segments_mut()
                    .map_err(|()| ClusterApiError::InvalidUrl {
                        url: self.base_url.to_string(),
                        reason: "URL cannot carry a path".to_string(),
                    })?;
            segments
                .pop_if_empty()
                .extend(["api", "v1", "namespaces", namespace, resource]);
            if let Some(name) = name {
                segments.push(name);
            }
        }
        Ok(url)
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "API request");
        let request = self.http.request(method, url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub(crate) fn merge_patch(&self, url: Url, body: Vec<u8>) -> RequestBuilder {
        self.request(Method::PATCH, url)
            .header(reqwest::header::CONTENT_TYPE, MERGE_PATCH)
            .body(body)
    }

    /// Send `request` and decode a JSON success body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        let response = check_status(request.send().await?).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send `request`, discarding a success body.
    pub(crate) async fn send_empty(&self, request: RequestBuilder) -> ApiResult<()> {
        check_status(request.send().await?).await.map(drop)
    }
}

/// Turn a non-success response into [`ClusterApiError::Status`].
async fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<StatusObject>(&body)
        .ok()
        .map(|s| s.message)
        .filter(|m| !m.is_empty())
        .unwrap_or(body);

    Err(ClusterApiError::Status {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_server: &str) -> KubeApiClient {
        KubeApiClient::new(&ClusterClientConfig::new().with_api_server(api_server)).unwrap()
    }

    #[test]
    fn resource_urls() {
        let client = client("https://10.0.0.1:6443");
        assert_eq!(
            client
                .resource_url("default", "secrets", None)
                .unwrap()
                .as_str(),
            "https://10.0.0.1:6443/api/v1/namespaces/default/secrets"
        );
        assert_eq!(
            client
                .resource_url("default", "serviceaccounts", Some("default"))
                .unwrap()
                .as_str(),
            "https://10.0.0.1:6443/api/v1/namespaces/default/serviceaccounts/default"
        );
    }

    #[test]
    fn base_path_is_kept() {
        let client = client("https://proxy.example.com/clusters/c1/");
        assert_eq!(
            client
                .resource_url("ns", "secrets", Some("a b"))
                .unwrap()
                .as_str(),
            "https://proxy.example.com/clusters/c1/api/v1/namespaces/ns/secrets/a%20b"
        );
    }

    #[test]
    fn rejects_unusable_urls() {
        let config = ClusterClientConfig::new().with_api_server("not a url");
        assert!(matches!(
            KubeApiClient::new(&config),
            Err(ClusterApiError::InvalidUrl { .. })
        ));

        let config = ClusterClientConfig::new().with_api_server("mailto:ops@example.com");
        assert!(matches!(
            KubeApiClient::new(&config),
            Err(ClusterApiError::InvalidUrl { .. })
        ));
    }
}
