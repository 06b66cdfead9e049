//! Registered OAuth client application.

use serde::{Deserialize, Serialize};

/// A registered OAuth client.
///
/// Created by an out-of-scope developer registration flow and read-only
/// to this engine. The `client_type` field is kept as the raw stored
/// string: registration data arrives from an external store and may be
/// corrupt, and parsing it into [`ClientType`] is exactly the validation
/// the engine performs (see [`crate::validate`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Human-readable display name.
    pub name: String,

    /// Client homepage, display metadata only.
    pub website: String,

    /// Logo URL, display metadata only.
    pub logo: String,

    /// Absolute URI the client must be returned to. Authorize requests
    /// must match it by exact string equality.
    #[serde(rename = "redirectURI")]
    pub redirect_uri: String,

    /// User that registered this application.
    pub owner_user_id: String,

    /// Unique, stable client identifier.
    pub client_id: String,

    /// Shared secret. Present only for confidential clients.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    /// Raw client type as stored: "confidential" or "public".
    pub client_type: String,
}

/// OAuth 2.0 client types.
///
/// Confidential clients can protect a secret (server-side apps) and must
/// present it on every token request. Public clients cannot and are
/// barred from secret-bearing flows such as `client_credentials`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientType {
    /// Server-side application that can keep a secret.
    Confidential,
    /// Browser or mobile application that cannot keep a secret.
    Public,
}

impl ClientType {
    /// Returns the stored string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confidential => "confidential",
            Self::Public => "public",
        }
    }

    /// Parses a stored client type string.
    ///
    /// Returns `None` for anything other than exactly "confidential" or
    /// "public"; the caller decides how to surface the corruption.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "confidential" => Some(Self::Confidential),
            "public" => Some(Self::Public),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClientType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
