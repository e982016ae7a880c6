//! Core domain types and port definitions for clusteradm.
//!
//! This crate owns everything the workflows need to talk about without
//! knowing how the cluster is reached:
//!
//! - [`domain`] - resource handles, secrets, service accounts and the
//!   registry credential document stored inside a secret
//! - [`ports`] - the store and output traits adapters implement
//! - [`gate`] - the one-shot broadcast signal shared by the concurrent
//!   components

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod gate;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    DEFAULT_NAMESPACE, DEFAULT_SERVICE_ACCOUNT, DOCKER_CONFIG_KEY, DOCKER_CONFIG_SECRET_TYPE,
    DockerConfig, LabelSelector, MANAGED_BY_LABEL, MANAGED_BY_VALUE, NewSecret, RegistryAuth,
    ResourceHandle, Secret, ServiceAccount, managed_labels,
};
pub use gate::Gate;
pub use ports::{
    CapturingSink, ClusterError, ClusterResult, NoopSink, OutputSink, SecretStore,
    ServiceAccountStore, StdoutSink,
};
