//! OAuth 2.0 grant types.

use serde::{Deserialize, Serialize};

/// The four standardized exchange mechanisms by which a client obtains
/// a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
    /// Authorization code flow: exchange a single-use code for tokens.
    AuthorizationCode,
    /// Resource Owner Password Credentials flow.
    /// Legacy; only for trusted first-party applications.
    Password,
    /// Client credentials flow (confidential clients only).
    ClientCredentials,
    /// Refresh token flow with rotation.
    RefreshToken,
}

impl GrantType {
    /// Returns the OAuth 2.0 `grant_type` parameter value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthorizationCode => "authorization_code",
            Self::Password => "password",
            Self::ClientCredentials => "client_credentials",
            Self::RefreshToken => "refresh_token",
        }
    }
}

impl std::fmt::Display for GrantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
