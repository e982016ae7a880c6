//! Registry credential document stored in a `.dockerconfigjson` secret.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Credentials for a single registry server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryAuth {
    /// Registry user name.
    #[serde(default)]
    pub username: String,
    /// Registry password or access token.
    #[serde(default)]
    pub password: String,
    /// Optional contact email.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    /// Base64 of `username:password`.
    #[serde(default)]
    pub auth: String,
}

impl RegistryAuth {
    /// Build credentials, deriving the `auth` field from the user and password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        let username = username.into();
        let password = password.into();
        let auth = STANDARD.encode(format!("{username}:{password}"));
        Self {
            username,
            password,
            email: String::new(),
            auth,
        }
    }

    /// Attach a contact email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }
}

/// The `{"auths": {...}}` document keyed by registry server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerConfig {
    /// Credentials keyed by registry server address.
    #[serde(default)]
    pub auths: BTreeMap<String, RegistryAuth>,
}

impl DockerConfig {
    /// A document holding credentials for exactly one server.
    pub fn single(server: impl Into<String>, auth: RegistryAuth) -> Self {
        Self {
            auths: BTreeMap::from([(server.into(), auth)]),
        }
    }

    /// Parse the raw secret payload.
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// Serialize to the raw secret payload.
    pub fn to_vec(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Whether any entry is for `server` with user `username`.
    pub fn contains(&self, server: &str, username: &str) -> bool {
        self.auths
            .iter()
            .any(|(s, auth)| s == server && auth.username == username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_field_is_base64_of_user_and_password() {
        let auth = RegistryAuth::new("alice", "s3cret");
        assert_eq!(auth.auth, "YWxpY2U6czNjcmV0");
    }

    #[test]
    fn parses_document_with_missing_fields() {
        let raw = br#"{"auths":{"registry.example.com":{"username":"alice"}}}"#;
        let config = DockerConfig::from_slice(raw).unwrap();

        assert!(config.contains("registry.example.com", "alice"));
        assert!(!config.contains("registry.example.com", "bob"));
        assert!(!config.contains("other.example.com", "alice"));
        assert_eq!(config.auths["registry.example.com"].password, "");
    }

    #[test]
    fn rejects_malformed_payload() {
        assert!(DockerConfig::from_slice(b"not json").is_err());
    }

    #[test]
    fn serialized_document_omits_empty_email() {
        let config = DockerConfig::single("r.example.com", RegistryAuth::new("u", "p"));
        let json = String::from_utf8(config.to_vec().unwrap()).unwrap();
        assert!(json.contains("\"auths\""));
        assert!(!json.contains("email"));

        let with_email =
            DockerConfig::single("r.example.com", RegistryAuth::new("u", "p").with_email("u@x"));
        let json = String::from_utf8(with_email.to_vec().unwrap()).unwrap();
        assert!(json.contains("\"email\":\"u@x\""));
    }
}
