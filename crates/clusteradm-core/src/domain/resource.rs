//! Cluster resource types.

use std::collections::BTreeMap;
use std::fmt;

/// Identifies a deletable namespaced resource.
///
/// Handles are immutable once built; workflows collect them into a
/// name-keyed map before any deletion starts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceHandle {
    namespace: String,
    name: String,
}

impl ResourceHandle {
    /// Create a handle for `namespace/name`.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// The namespace the resource lives in.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The resource name, unique within its namespace.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// A stored secret with its data already decoded to raw bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Secret {
    /// Namespace the secret lives in.
    pub namespace: String,
    /// Secret name.
    pub name: String,
    /// Secret type (e.g. `kubernetes.io/dockerconfigjson`).
    pub secret_type: Option<String>,
    /// Labels attached to the secret.
    pub labels: BTreeMap<String, String>,
    /// Decoded data entries.
    pub data: BTreeMap<String, Vec<u8>>,
}

impl Secret {
    /// Handle identifying this secret for deletion.
    pub fn handle(&self) -> ResourceHandle {
        ResourceHandle::new(&self.namespace, &self.name)
    }
}

/// A secret to be created.
///
/// The store assigns the final name from `generate_name` when `name` is
/// not set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSecret {
    /// Namespace to create the secret in.
    pub namespace: String,
    /// Explicit name, if any.
    pub name: Option<String>,
    /// Name prefix used when no explicit name is given.
    pub generate_name: Option<String>,
    /// Secret type.
    pub secret_type: String,
    /// Labels to attach.
    pub labels: BTreeMap<String, String>,
    /// Raw data entries; the store encodes them.
    pub data: BTreeMap<String, Vec<u8>>,
}

/// A workload identity and the image pull secrets it references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceAccount {
    /// Namespace of the service account.
    pub namespace: String,
    /// Service account name.
    pub name: String,
    /// Names of referenced image pull secrets, in stored order.
    pub image_pull_secrets: Vec<String>,
    /// Optimistic concurrency token returned by the store.
    pub resource_version: Option<String>,
}

impl ServiceAccount {
    /// Drop every image pull secret whose name satisfies `remove`.
    ///
    /// Returns the number of references removed. Order of the remaining
    /// references is preserved.
    pub fn remove_pull_secrets(&mut self, mut remove: impl FnMut(&str) -> bool) -> usize {
        let before = self.image_pull_secrets.len();
        self.image_pull_secrets.retain(|name| !remove(name));
        before - self.image_pull_secrets.len()
    }

    /// Append an image pull secret reference unless it is already present.
    ///
    /// Returns `true` if the reference was added.
    pub fn add_pull_secret(&mut self, name: &str) -> bool {
        if self.image_pull_secrets.iter().any(|s| s == name) {
            return false;
        }
        self.image_pull_secrets.push(name.to_string());
        true
    }
}

impl fmt::Display for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// An equality-based label selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSelector {
    labels: BTreeMap<String, String>,
}

impl LabelSelector {
    /// Build a selector matching every label in `labels`.
    pub const fn from_labels(labels: BTreeMap<String, String>) -> Self {
        Self { labels }
    }

    /// Whether the selector places no constraint.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Whether a label set satisfies this selector.
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        self.labels
            .iter()
            .all(|(k, v)| labels.get(k).is_some_and(|actual| actual == v))
    }
}

impl fmt::Display for LabelSelector {
    /// Renders the selector in `k1=v1,k2=v2` form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in &self.labels {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{key}={value}")?;
            first = false;
        }
        Ok(())
    }
}
