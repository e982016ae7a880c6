//! Domain types for cluster resources and registry credentials.
//!
//! These types carry no storage or transport details. Adapters translate
//! them to and from whatever wire format the cluster speaks.

mod registry;
mod resource;

pub use registry::{DockerConfig, RegistryAuth};
pub use resource::{LabelSelector, NewSecret, ResourceHandle, Secret, ServiceAccount};

use std::collections::BTreeMap;

/// Namespace holding the workload identity and its registry secrets.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Name of the workload identity whose image pull secrets are managed.
pub const DEFAULT_SERVICE_ACCOUNT: &str = "default";

/// Label key marking secrets created by this tool.
pub const MANAGED_BY_LABEL: &str = "app.kubernetes.io/managed-by";

/// Label value marking secrets created by this tool.
pub const MANAGED_BY_VALUE: &str = "clusteradm-registry";

/// Secret data key holding the registry credential document.
pub const DOCKER_CONFIG_KEY: &str = ".dockerconfigjson";

/// Secret type for registry credential secrets.
pub const DOCKER_CONFIG_SECRET_TYPE: &str = "kubernetes.io/dockerconfigjson";

/// Labels attached to every registry secret this tool manages.
pub fn managed_labels() -> BTreeMap<String, String> {
    BTreeMap::from([(MANAGED_BY_LABEL.to_string(), MANAGED_BY_VALUE.to_string())])
}
