//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - API server client (via clusteradm-cluster), injected as both stores
//! - Registry workflows (via clusteradm-registry)
//! - Terminal output sink (via clusteradm-core)
//!
//! Command handlers receive the composed `CliContext`.

use std::sync::Arc;
use std::time::Duration;

use clusteradm_cluster::{ClusterClientConfig, KubeApiClient};
use clusteradm_core::{OutputSink, StdoutSink};
use clusteradm_registry::RegistryService;
use tracing::debug;

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Connection settings for the API server.
    pub cluster: ClusterClientConfig,
}

impl CliConfig {
    /// Build the configuration from parsed global options.
    pub fn from_cli(cli: &Cli) -> Self {
        let mut cluster = ClusterClientConfig::new()
            .with_optional_token(cli.token.clone())
            .with_timeout(Duration::from_secs(cli.request_timeout))
            .with_insecure_skip_tls_verify(cli.insecure_skip_tls_verify);
        if let Some(api_server) = cli.api_server.as_deref().filter(|s| !s.is_empty()) {
            cluster = cluster.with_api_server(api_server);
        }
        Self { cluster }
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    registry: RegistryService,
    output: Arc<dyn OutputSink>,
}

impl CliContext {
    /// Access the registry workflows.
    pub const fn registry(&self) -> &RegistryService {
        &self.registry
    }

    /// Access the user-facing output sink.
    pub fn output(&self) -> &dyn OutputSink {
        self.output.as_ref()
    }
}

/// Bootstrap the CLI application, printing to stdout.
pub fn bootstrap(config: &CliConfig) -> Result<CliContext, CliError> {
    bootstrap_with_output(config, Arc::new(StdoutSink))
}

/// Bootstrap the CLI application with a custom output sink.
///
/// No request is sent here; an unreachable API server only surfaces once
/// a command uses it.
pub fn bootstrap_with_output(
    config: &CliConfig,
    output: Arc<dyn OutputSink>,
) -> Result<CliContext, CliError> {
    let client = Arc::new(KubeApiClient::new(&config.cluster)?);
    debug!(api_server = config.cluster.api_server(), "Cluster client ready");

    let registry = RegistryService::new(client.clone(), client, Arc::clone(&output));
    Ok(CliContext { registry, output })
}
