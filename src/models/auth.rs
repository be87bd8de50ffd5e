//! Registry credential shapes carried in request headers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Credentials for one registry, base64-JSON-encoded into the
/// `X-Registry-Auth` header. Field names are lowercase on the wire and
/// double quotes are required, which plain serde JSON already guarantees.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryAuth {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Domain/IP without a protocol.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serveraddress: Option<String>,
    /// Identity token obtained from the daemon's `/auth` endpoint; may be
    /// passed instead of credentials.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identitytoken: Option<String>,
}

impl RegistryAuth {
    /// Username/password credentials for `serveraddress`.
    pub fn basic(
        username: impl Into<String>,
        password: impl Into<String>,
        serveraddress: impl Into<String>,
    ) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            serveraddress: Some(serveraddress.into()),
            ..Self::default()
        }
    }
}

/// Per-registry credentials for the build endpoint, base64-JSON-encoded
/// into the `X-Registry-Config` header.
pub type RegistryConfig = HashMap<String, RegistryAuth>;
