//! Public configuration for the Kubernetes API client.

use std::time::Duration;

/// API server used when none is configured.
pub const DEFAULT_API_SERVER: &str = "https://kubernetes.default.svc";

/// Configuration for [`KubeApiClient`](crate::KubeApiClient).
///
/// # Example
///
/// ```
/// use clusteradm_cluster::ClusterClientConfig;
/// use std::time::Duration;
///
/// let config = ClusterClientConfig::new()
///     .with_api_server("https://10.0.0.1:6443")
///     .with_token("s3cret")
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct ClusterClientConfig {
    /// Base URL of the API server
    pub(crate) api_server: String,
    /// Bearer token sent with every request
    pub(crate) token: Option<String>,
    /// Per-request timeout
    pub(crate) timeout: Duration,
    /// Skip server certificate verification
    pub(crate) insecure_skip_tls_verify: bool,
    /// Honor `HTTP(S)_PROXY` and `NO_PROXY` from the environment
    pub(crate) use_system_proxy: bool,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
}

impl Default for ClusterClientConfig {
    fn default() -> Self {
        Self {
            api_server: DEFAULT_API_SERVER.to_string(),
            token: None,
            timeout: Duration::from_secs(30),
            insecure_skip_tls_verify: false,
            use_system_proxy: true,
            user_agent: concat!("clusteradm/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClusterClientConfig {
    /// Create a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API server base URL.
    #[must_use]
    pub fn with_api_server(mut self, url: impl Into<String>) -> Self {
        self.api_server = url.into();
        self
    }

    /// Set the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set an optional bearer token.
    #[must_use]
    pub fn with_optional_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    /// Set the per-request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Accept any server certificate.
    #[must_use]
    pub const fn with_insecure_skip_tls_verify(mut self, skip: bool) -> Self {
        self.insecure_skip_tls_verify = skip;
        self
    }

    /// Whether to route requests through the proxy configured in the
    /// environment.
    ///
    /// Defaults to `true`.
    #[must_use]
    pub const fn with_system_proxy(mut self, enabled: bool) -> Self {
        self.use_system_proxy = enabled;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// The configured API server URL.
    pub fn api_server(&self) -> &str {
        &self.api_server
    }
}
