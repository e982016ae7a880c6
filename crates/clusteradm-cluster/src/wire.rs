//! JSON shapes of the API objects the adapter reads and writes.
//!
//! Only the fields the stores need are modelled; everything else the server
//! returns is ignored on read and never sent on write.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use clusteradm_core::{NewSecret, Secret, ServiceAccount};

use crate::error::{ApiResult, ClusterApiError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub secret_type: Option<String>,
    /// Values are base64 encoded.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretList {
    #[serde(default)]
    pub items: Vec<SecretObject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalObjectReference {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAccountObject {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub image_pull_secrets: Vec<LocalObjectReference>,
}

/// JSON merge patch replacing a service account's pull secret list.
///
/// Carrying the resource version makes the server reject the patch if the
/// account changed since it was read.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PullSecretsPatch {
    pub metadata: ObjectMeta,
    pub image_pull_secrets: Vec<LocalObjectReference>,
}

/// Error body the API server sends with non-success statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusObject {
    #[serde(default)]
    pub message: String,
}

impl SecretObject {
    pub fn from_new(secret: &NewSecret) -> Self {
        Self {
            api_version: Some("v1".to_string()),
            kind: Some("Secret".to_string()),
            metadata: ObjectMeta {
                name: secret.name.clone(),
                generate_name: secret.generate_name.clone(),
                namespace: Some(secret.namespace.clone()),
                labels: secret.labels.clone(),
                resource_version: None,
            },
            secret_type: Some(secret.secret_type.clone()),
            data: secret
                .data
                .iter()
                .map(|(key, value)| (key.clone(), STANDARD.encode(value)))
                .collect(),
        }
    }

    /// Convert to the domain type, decoding the data values.
    ///
    /// `namespace` fills in for servers that omit it from list items.
    pub fn into_domain(self, namespace: &str) -> ApiResult<Secret> {
        let data = self
            .data
            .into_iter()
            .map(|(key, value)| match STANDARD.decode(value.as_bytes()) {
                Ok(bytes) => Ok((key, bytes)),
                Err(source) => Err(ClusterApiError::InvalidData { key, source }),
            })
            .collect::<ApiResult<BTreeMap<_, _>>>()?;

        Ok(Secret {
            namespace: self
                .metadata
                .namespace
                .unwrap_or_else(|| namespace.to_string()),
            name: self.metadata.name.unwrap_or_default(),
            secret_type: self.secret_type,
            labels: self.metadata.labels,
            data,
        })
    }
}

impl ServiceAccountObject {
    pub fn into_domain(self, namespace: &str) -> ServiceAccount {
        ServiceAccount {
            namespace: self
                .metadata
                .namespace
                .unwrap_or_else(|| namespace.to_string()),
            name: self.metadata.name.unwrap_or_default(),
            image_pull_secrets: self
                .image_pull_secrets
                .into_iter()
                .map(|reference| reference.name)
                .collect(),
            resource_version: self.metadata.resource_version,
        }
    }
}

impl PullSecretsPatch {
    pub fn for_account(account: &ServiceAccount) -> Self {
        Self {
            metadata: ObjectMeta {
                resource_version: account.resource_version.clone(),
                ..ObjectMeta::default()
            },
            image_pull_secrets: account
                .image_pull_secrets
                .iter()
                .map(|name| LocalObjectReference { name: name.clone() })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_secret_serializes_with_generate_name_and_encoded_data() {
        let secret = NewSecret {
            namespace: "default".into(),
            name: None,
            generate_name: Some("registry-secret-".into()),
            secret_type: "kubernetes.io/dockerconfigjson".into(),
            labels: BTreeMap::from([("app".into(), "x".into())]),
            data: BTreeMap::from([(".dockerconfigjson".into(), b"{}".to_vec())]),
        };

        let value = serde_json::to_value(SecretObject::from_new(&secret)).unwrap();
        assert_eq!(
            value,
            json!({
                "apiVersion": "v1",
                "kind": "Secret",
                "metadata": {
                    "generateName": "registry-secret-",
                    "namespace": "default",
                    "labels": {"app": "x"}
                },
                "type": "kubernetes.io/dockerconfigjson",
                "data": {".dockerconfigjson": "e30="}
            })
        );
    }

    #[test]
    fn secret_data_is_decoded() {
        let object: SecretObject = serde_json::from_value(json!({
            "metadata": {"name": "creds", "resourceVersion": "7"},
            "type": "Opaque",
            "data": {"key": "aGVsbG8="}
        }))
        .unwrap();

        let secret = object.into_domain("default").unwrap();
        assert_eq!(secret.namespace, "default");
        assert_eq!(secret.name, "creds");
        assert_eq!(secret.data["key"], b"hello");
    }

    #[test]
    fn bad_base64_names_the_key() {
        let object: SecretObject = serde_json::from_value(json!({
            "metadata": {"name": "creds"},
            "data": {"broken": "***"}
        }))
        .unwrap();

        let err = object.into_domain("default").unwrap_err();
        assert!(matches!(err, ClusterApiError::InvalidData { ref key, .. } if key == "broken"));
    }

    #[test]
    fn pull_secret_patch_carries_resource_version() {
        let account = ServiceAccount {
            namespace: "default".into(),
            name: "default".into(),
            image_pull_secrets: vec!["a".into(), "b".into()],
            resource_version: Some("42".into()),
        };

        let value = serde_json::to_value(PullSecretsPatch::for_account(&account)).unwrap();
        assert_eq!(
            value,
            json!({
                "metadata": {"resourceVersion": "42"},
                "imagePullSecrets": [{"name": "a"}, {"name": "b"}]
            })
        );
    }

    #[test]
    fn service_account_without_pull_secrets() {
        let object: ServiceAccountObject = serde_json::from_value(json!({
            "metadata": {"name": "default", "namespace": "default", "resourceVersion": "1"},
            "secrets": [{"name": "default-token-abcde"}]
        }))
        .unwrap();

        let account = object.into_domain("default");
        assert!(account.image_pull_secrets.is_empty());
        assert_eq!(account.resource_version.as_deref(), Some("1"));
    }
}
