//! Add / remove / list workflows against an in-memory cluster.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use clusteradm_core::{
    CapturingSink, ClusterError, ClusterResult, DOCKER_CONFIG_KEY, DockerConfig, LabelSelector,
    NewSecret, RegistryAuth, Secret, SecretStore, ServiceAccount, ServiceAccountStore,
    managed_labels,
};
use clusteradm_registry::{AddRegistry, RegistryError, RegistryService, RemoveRegistry};

/// In-memory stand-in for the cluster's secret and service account storage.
#[derive(Default)]
struct FakeCluster {
    secrets: Mutex<BTreeMap<String, Secret>>,
    account: Mutex<ServiceAccount>,
    fail_delete: Mutex<Option<String>>,
    fail_account_update: Mutex<bool>,
    generated: AtomicUsize,
    updates: AtomicUsize,
}

impl FakeCluster {
    fn new() -> Arc<Self> {
        let cluster = Self::default();
        *cluster.account.lock().unwrap() = ServiceAccount {
            namespace: "default".into(),
            name: "default".into(),
            image_pull_secrets: vec!["unrelated".into()],
            resource_version: Some("1".into()),
        };
        Arc::new(cluster)
    }

    fn seed(&self, name: &str, server: &str, username: &str) {
        let payload = DockerConfig::single(server, RegistryAuth::new(username, "pw"))
            .to_vec()
            .unwrap();
        self.secrets.lock().unwrap().insert(
            name.to_string(),
            Secret {
                namespace: "default".into(),
                name: name.into(),
                secret_type: Some("kubernetes.io/dockerconfigjson".into()),
                labels: managed_labels(),
                data: BTreeMap::from([(DOCKER_CONFIG_KEY.to_string(), payload)]),
            },
        );
        self.account
            .lock()
            .unwrap()
            .image_pull_secrets
            .push(name.to_string());
    }

    fn secret_names(&self) -> Vec<String> {
        self.secrets.lock().unwrap().keys().cloned().collect()
    }

    fn pull_secrets(&self) -> Vec<String> {
        self.account.lock().unwrap().image_pull_secrets.clone()
    }
}

#[async_trait]
impl SecretStore for FakeCluster {
    async fn list(&self, namespace: &str, selector: &LabelSelector) -> ClusterResult<Vec<Secret>> {
        Ok(self
            .secrets
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.namespace == namespace && selector.matches(&s.labels))
            .cloned()
            .collect())
    }

    async fn create(&self, secret: &NewSecret) -> ClusterResult<Secret> {
        let name = secret.name.clone().unwrap_or_else(|| {
            let n = self.generated.fetch_add(1, Ordering::SeqCst);
            format!("{}{n:05}", secret.generate_name.as_deref().unwrap_or_default())
        });
        let stored = Secret {
            namespace: secret.namespace.clone(),
            name: name.clone(),
            secret_type: Some(secret.secret_type.clone()),
            labels: secret.labels.clone(),
            data: secret.data.clone(),
        };
        self.secrets.lock().unwrap().insert(name, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, namespace: &str, name: &str) -> ClusterResult<()> {
        if self.fail_delete.lock().unwrap().as_deref() == Some(name) {
            return Err(ClusterError::Unavailable("connection reset by peer".into()));
        }
        self.secrets
            .lock()
            .unwrap()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| ClusterError::NotFound(format!("secret {namespace}/{name}")))
    }
}

#[async_trait]
impl ServiceAccountStore for FakeCluster {
    async fn get(&self, namespace: &str, name: &str) -> ClusterResult<ServiceAccount> {
        let account = self.account.lock().unwrap().clone();
        if account.namespace == namespace && account.name == name {
            Ok(account)
        } else {
            Err(ClusterError::NotFound(format!(
                "serviceaccount {namespace}/{name}"
            )))
        }
    }

    async fn update(&self, account: &ServiceAccount) -> ClusterResult<ServiceAccount> {
        if *self.fail_account_update.lock().unwrap() {
            return Err(ClusterError::Conflict("resource version changed".into()));
        }
        self.updates.fetch_add(1, Ordering::SeqCst);
        *self.account.lock().unwrap() = account.clone();
        Ok(account.clone())
    }
}

fn service(cluster: &Arc<FakeCluster>, sink: &Arc<CapturingSink>) -> RegistryService {
    RegistryService::new(cluster.clone(), cluster.clone(), sink.clone())
}

fn remove_request(server: &str, username: &str) -> RemoveRegistry {
    RemoveRegistry {
        server: server.into(),
        username: username.into(),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn remove_detaches_and_deletes_matching_secrets() {
    let cluster = FakeCluster::new();
    cluster.seed("creds-1", "registry.example.com", "alice");
    cluster.seed("creds-2", "registry.example.com", "alice");
    cluster.seed("other-user", "registry.example.com", "bob");
    cluster.seed("other-server", "quay.example.com", "alice");
    let sink = Arc::new(CapturingSink::new());

    let removed = service(&cluster, &sink)
        .remove(&remove_request("registry.example.com", "alice"))
        .await
        .unwrap();

    assert_eq!(removed, 2);
    assert_eq!(cluster.secret_names(), vec!["other-server", "other-user"]);
    assert_eq!(
        cluster.pull_secrets(),
        vec!["unrelated", "other-user", "other-server"]
    );

    let lines = sink.lines();
    assert_eq!(
        lines[0],
        "ImagePullSecrets of ServiceAccount 'default/default' updated"
    );
    let mut deletions = lines[1..].to_vec();
    deletions.sort();
    assert_eq!(
        deletions,
        vec![
            "Secret 'default/creds-1' deleted",
            "Secret 'default/creds-2' deleted"
        ]
    );
}

#[tokio::test]
async fn remove_without_match_changes_nothing() {
    let cluster = FakeCluster::new();
    cluster.seed("creds", "registry.example.com", "alice");
    let sink = Arc::new(CapturingSink::new());

    let removed = service(&cluster, &sink)
        .remove(&remove_request("registry.example.com", "mallory"))
        .await
        .unwrap();

    assert_eq!(removed, 0);
    assert_eq!(cluster.updates.load(Ordering::SeqCst), 0);
    assert_eq!(cluster.secret_names(), vec!["creds"]);
    assert_eq!(
        sink.lines(),
        vec!["No registry found for server: 'registry.example.com' and username: 'mallory'"]
    );
}

#[tokio::test]
async fn remove_fails_on_unreadable_secret() {
    let cluster = FakeCluster::new();
    cluster.seed("creds", "registry.example.com", "alice");
    cluster
        .secrets
        .lock()
        .unwrap()
        .get_mut("creds")
        .unwrap()
        .data
        .insert(DOCKER_CONFIG_KEY.into(), b"{broken".to_vec());
    let sink = Arc::new(CapturingSink::new());

    let err = service(&cluster, &sink)
        .remove(&remove_request("registry.example.com", "alice"))
        .await
        .unwrap_err();

    assert!(matches!(err, RegistryError::DecodeSecret { .. }));
    assert!(
        err.to_string()
            .starts_with("failed unmarshal secret data '.dockerconfigjson'")
    );
    assert_eq!(cluster.updates.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn delete_failure_keeps_account_update() {
    let cluster = FakeCluster::new();
    cluster.seed("creds-1", "registry.example.com", "alice");
    cluster.seed("creds-2", "registry.example.com", "alice");
    *cluster.fail_delete.lock().unwrap() = Some("creds-2".into());
    let sink = Arc::new(CapturingSink::new());

    let err = service(&cluster, &sink)
        .remove(&remove_request("registry.example.com", "alice"))
        .await
        .unwrap_err();

    assert!(
        err.to_string()
            .starts_with("failed to delete secrets: failed to delete secret 'default/creds-2'")
    );
    // No rollback: the account no longer references either secret, and the
    // deletion that could succeed did
    assert_eq!(cluster.pull_secrets(), vec!["unrelated"]);
    assert_eq!(cluster.secret_names(), vec!["creds-2"]);
}

#[tokio::test]
async fn remove_surfaces_account_update_failure() {
    let cluster = FakeCluster::new();
    cluster.seed("creds", "registry.example.com", "alice");
    *cluster.fail_account_update.lock().unwrap() = true;
    let sink = Arc::new(CapturingSink::new());

    let err = service(&cluster, &sink)
        .remove(&remove_request("registry.example.com", "alice"))
        .await
        .unwrap_err();

    assert!(matches!(err, RegistryError::DetachSecrets(_)));
    // Deletion never started
    assert_eq!(cluster.secret_names(), vec!["creds"]);
}

#[tokio::test]
async fn remove_validates_options_before_touching_the_cluster() {
    let cluster = FakeCluster::new();
    let sink = Arc::new(CapturingSink::new());

    let err = service(&cluster, &sink)
        .remove(&remove_request("registry.example.com", ""))
        .await
        .unwrap_err();

    assert!(err.is_usage());
    assert!(sink.lines().is_empty());
}

#[tokio::test]
async fn add_creates_labelled_secret_and_attaches_it() {
    let cluster = FakeCluster::new();
    let sink = Arc::new(CapturingSink::new());

    let secret = service(&cluster, &sink)
        .add(&AddRegistry {
            server: "registry.example.com".into(),
            username: "alice".into(),
            password: "s3cret".into(),
            email: Some("alice@example.com".into()),
        })
        .await
        .unwrap();

    assert!(secret.name.starts_with("registry-secret-"));
    assert_eq!(secret.labels, managed_labels());
    let config = DockerConfig::from_slice(&secret.data[DOCKER_CONFIG_KEY]).unwrap();
    assert!(config.contains("registry.example.com", "alice"));
    assert_eq!(config.auths["registry.example.com"].email, "alice@example.com");

    assert_eq!(cluster.pull_secrets(), vec!["unrelated".to_string(), secret.name]);
    assert_eq!(
        sink.lines(),
        vec!["Private registry 'registry.example.com' using username 'alice' added for default ServiceAccount"]
    );
}

#[tokio::test]
async fn list_reports_every_entry_and_skips_unreadable_secrets() {
    let cluster = FakeCluster::new();
    cluster.seed("creds-a", "registry.example.com", "alice");
    cluster.seed("creds-b", "quay.example.com", "bob");
    cluster.seed("broken", "x", "y");
    cluster
        .secrets
        .lock()
        .unwrap()
        .get_mut("broken")
        .unwrap()
        .data
        .clear();
    let sink = Arc::new(CapturingSink::new());

    let entries = service(&cluster, &sink).list().await.unwrap();

    let summary: Vec<_> = entries
        .iter()
        .map(|e| (e.secret.as_str(), e.server.as_str(), e.username.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("creds-a", "registry.example.com", "alice"),
            ("creds-b", "quay.example.com", "bob"),
        ]
    );
}
