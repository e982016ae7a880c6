//! Registry credential workflows.
//!
//! Every workflow operates on secrets in the default namespace that carry
//! the managed-by label, and on the default service account's list of
//! image pull secrets.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use clusteradm_core::{
    DEFAULT_NAMESPACE, DEFAULT_SERVICE_ACCOUNT, DOCKER_CONFIG_KEY, DOCKER_CONFIG_SECRET_TYPE,
    DockerConfig, LabelSelector, NewSecret, OutputSink, RegistryAuth, ResourceHandle, Secret,
    SecretStore, ServiceAccount, ServiceAccountStore, managed_labels,
};

use crate::bulk_delete::BulkDeleter;
use crate::error::RegistryError;

/// Name prefix for generated credential secrets.
const SECRET_NAME_PREFIX: &str = "registry-secret-";

/// Input for `registry add`.
#[derive(Debug, Clone, Default)]
pub struct AddRegistry {
    /// Registry server address.
    pub server: String,
    /// Registry user name.
    pub username: String,
    /// Registry password or token.
    pub password: String,
    /// Optional contact email.
    pub email: Option<String>,
}

impl AddRegistry {
    fn validate(&self) -> Result<(), RegistryError> {
        require("add", "username", "username", &self.username)?;
        require("add", "password", "password", &self.password)?;
        require("add", "server url", "server", &self.server)
    }
}

/// Input for `registry remove`.
#[derive(Debug, Clone, Default)]
pub struct RemoveRegistry {
    /// Registry server address.
    pub server: String,
    /// Registry user name.
    pub username: String,
}

impl RemoveRegistry {
    fn validate(&self) -> Result<(), RegistryError> {
        require("remove", "username", "username", &self.username)?;
        require("remove", "server url", "server", &self.server)
    }
}

fn require(
    command: &'static str,
    what: &'static str,
    flag: &'static str,
    value: &str,
) -> Result<(), RegistryError> {
    if value.trim().is_empty() {
        return Err(RegistryError::MissingOption {
            command,
            what,
            flag,
        });
    }
    Ok(())
}

/// One credential entry found in a managed secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    /// Name of the secret holding the entry.
    pub secret: String,
    /// Registry server address.
    pub server: String,
    /// Registry user name.
    pub username: String,
}

/// Registry credential workflows over the injected stores.
pub struct RegistryService {
    secrets: Arc<dyn SecretStore>,
    accounts: Arc<dyn ServiceAccountStore>,
    output: Arc<dyn OutputSink>,
}

impl RegistryService {
    /// Create a service over the given stores and output sink.
    pub fn new(
        secrets: Arc<dyn SecretStore>,
        accounts: Arc<dyn ServiceAccountStore>,
        output: Arc<dyn OutputSink>,
    ) -> Self {
        Self {
            secrets,
            accounts,
            output,
        }
    }

    /// Store new credentials and attach them to the default service account.
    ///
    /// Returns the created secret. The secret is not removed again if the
    /// service account update fails.
    pub async fn add(&self, request: &AddRegistry) -> Result<Secret, RegistryError> {
        request.validate()?;

        let mut auth = RegistryAuth::new(&request.username, &request.password);
        if let Some(email) = request.email.as_deref().filter(|e| !e.is_empty()) {
            auth = auth.with_email(email);
        }
        let payload = DockerConfig::single(&request.server, auth)
            .to_vec()
            .map_err(RegistryError::EncodeSecret)?;

        let new_secret = NewSecret {
            namespace: DEFAULT_NAMESPACE.to_string(),
            name: None,
            generate_name: Some(SECRET_NAME_PREFIX.to_string()),
            secret_type: DOCKER_CONFIG_SECRET_TYPE.to_string(),
            labels: managed_labels(),
            data: BTreeMap::from([(DOCKER_CONFIG_KEY.to_string(), payload)]),
        };
        let secret = self
            .secrets
            .create(&new_secret)
            .await
            .map_err(RegistryError::CreateSecret)?;
        info!(secret = %secret.handle(), server = %request.server, "Created registry secret");

        let mut account = self.default_account().await?;
        if account.add_pull_secret(&secret.name) {
            self.accounts
                .update(&account)
                .await
                .map_err(RegistryError::AttachSecret)?;
        }

        self.output.line(&format!(
            "Private registry '{}' using username '{}' added for default ServiceAccount",
            request.server, request.username
        ));
        Ok(secret)
    }

    /// Detach and delete every managed secret holding credentials for
    /// `server` and `username`.
    ///
    /// Returns the number of matching secrets. The service account update
    /// happens before deletion and is kept even if a deletion fails.
    pub async fn remove(&self, request: &RemoveRegistry) -> Result<usize, RegistryError> {
        request.validate()?;

        let secrets = self.managed_secrets().await?;

        let mut matching: BTreeMap<String, ResourceHandle> = BTreeMap::new();
        for secret in &secrets {
            let config = decode(secret)?;
            if config.contains(&request.server, &request.username) {
                matching.insert(secret.name.clone(), secret.handle());
            }
        }

        if matching.is_empty() {
            self.output.line(&format!(
                "No registry found for server: '{}' and username: '{}'",
                request.server, request.username
            ));
            return Ok(0);
        }
        debug!(count = matching.len(), "Matched registry secrets");

        let mut account = self.default_account().await?;
        let detached = account.remove_pull_secrets(|name| matching.contains_key(name));
        self.accounts
            .update(&account)
            .await
            .map_err(RegistryError::DetachSecrets)?;
        info!(account = %account, detached, "Detached registry secrets");
        self.output.line(&format!(
            "ImagePullSecrets of ServiceAccount '{account}' updated"
        ));

        BulkDeleter::new(Arc::clone(&self.secrets), Arc::clone(&self.output))
            .delete_all(&matching)
            .await?;

        Ok(matching.len())
    }

    /// List every credential entry stored in managed secrets.
    ///
    /// Secrets whose payload cannot be read are skipped with a warning.
    pub async fn list(&self) -> Result<Vec<RegistryEntry>, RegistryError> {
        let secrets = self.managed_secrets().await?;

        let mut entries = Vec::new();
        for secret in &secrets {
            let config = match decode(secret) {
                Ok(config) => config,
                Err(e) => {
                    warn!(secret = %secret.handle(), error = %e, "Skipping unreadable secret");
                    continue;
                }
            };
            entries.extend(config.auths.into_iter().map(|(server, auth)| RegistryEntry {
                secret: secret.name.clone(),
                server,
                username: auth.username,
            }));
        }
        Ok(entries)
    }

    async fn managed_secrets(&self) -> Result<Vec<Secret>, RegistryError> {
        let selector = LabelSelector::from_labels(managed_labels());
        self.secrets
            .list(DEFAULT_NAMESPACE, &selector)
            .await
            .map_err(RegistryError::ListSecrets)
    }

    async fn default_account(&self) -> Result<ServiceAccount, RegistryError> {
        self.accounts
            .get(DEFAULT_NAMESPACE, DEFAULT_SERVICE_ACCOUNT)
            .await
            .map_err(RegistryError::GetServiceAccount)
    }
}

fn decode(secret: &Secret) -> Result<DockerConfig, RegistryError> {
    let raw = secret
        .data
        .get(DOCKER_CONFIG_KEY)
        .map_or(&[][..], Vec::as_slice);
    DockerConfig::from_slice(raw).map_err(|source| RegistryError::DecodeSecret {
        secret: secret.name.clone(),
        source,
    })
}
