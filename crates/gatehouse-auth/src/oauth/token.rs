//! Token endpoint types.
//!
//! The wire body is the flat form-encoded [`TokenRequest`]; before
//! dispatch it is narrowed into the typed [`TokenGrant`] union so each
//! grant handler receives exactly the fields its flow requires and no
//! silent field coercion can occur.
//!
//! # Supported grant types
//!
//! - `authorization_code` - exchange a single-use code for tokens
//! - `password` - Resource Owner Password Credentials
//! - `client_credentials` - machine-to-machine, confidential clients only
//! - `refresh_token` - rotate a refresh token into a new pair

use serde::{Deserialize, Serialize};

use crate::AuthResult;
use crate::error::AuthError;
use crate::types::{AccessToken, GrantType};

/// Token request parameters as they arrive on the wire.
///
/// All OAuth 2.0 grant types share this shape; which optional fields are
/// required depends on `grant_type` and is enforced by [`TokenRequest::grant`].
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    /// OAuth 2.0 grant type. One of: "authorization_code", "password",
    /// "client_credentials", "refresh_token".
    pub grant_type: String,

    /// Client identifier.
    pub client_id: String,

    /// Client secret. Required for confidential clients; public clients
    /// never present one.
    #[serde(default)]
    pub client_secret: Option<String>,

    /// Authorization code (authorization_code grant).
    #[serde(default)]
    pub code: Option<String>,

    /// Resource owner username (password grant).
    #[serde(default)]
    pub username: Option<String>,

    /// Resource owner password (password grant).
    #[serde(default)]
    pub password: Option<String>,

    /// Requested scope (password and client_credentials grants).
    #[serde(default)]
    pub scope: Option<String>,

    /// Refresh token (refresh_token grant).
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// The typed union over the four grant kinds.
///
/// Produced by [`TokenRequest::grant`] after boundary validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenGrant {
    /// Exchange a single-use authorization code.
    AuthorizationCode {
        /// The code to exchange.
        code: String,
    },
    /// Authenticate the resource owner directly.
    Password {
        /// Resource owner username.
        username: String,
        /// Resource owner password.
        password: String,
        /// Requested scope.
        scope: String,
    },
    /// Machine-to-machine grant with no resource owner.
    ClientCredentials {
        /// Requested scope.
        scope: String,
    },
    /// Rotate a refresh token.
    RefreshToken {
        /// The refresh token to rotate.
        refresh_token: String,
    },
}

impl TokenGrant {
    /// Returns the grant type of this request.
    #[must_use]
    pub fn grant_type(&self) -> GrantType {
        match self {
            Self::AuthorizationCode { .. } => GrantType::AuthorizationCode,
            Self::Password { .. } => GrantType::Password,
            Self::ClientCredentials { .. } => GrantType::ClientCredentials,
            Self::RefreshToken { .. } => GrantType::RefreshToken,
        }
    }
}

impl TokenRequest {
    /// Narrows the wire request into the typed grant union.
    ///
    /// # Errors
    ///
    /// - `unsupported_grant_type` for any grant type outside the four
    ///   supported kinds - never a silent fallthrough
    /// - `invalid_request` when a field the grant kind requires is missing
    pub fn grant(&self) -> AuthResult<TokenGrant> {
        match self.grant_type.as_str() {
            "authorization_code" => Ok(TokenGrant::AuthorizationCode {
                code: self.require("code", self.code.as_deref())?,
            }),
            "password" => Ok(TokenGrant::Password {
                username: self.require("username", self.username.as_deref())?,
                password: self.require("password", self.password.as_deref())?,
                scope: self.scope.clone().unwrap_or_default(),
            }),
            "client_credentials" => Ok(TokenGrant::ClientCredentials {
                scope: self.scope.clone().unwrap_or_default(),
            }),
            "refresh_token" => Ok(TokenGrant::RefreshToken {
                refresh_token: self.require("refresh_token", self.refresh_token.as_deref())?,
            }),
            other => Err(AuthError::unsupported_grant_type(format!(
                "Grant type '{other}' is not supported"
            ))),
        }
    }

    fn require(&self, name: &str, value: Option<&str>) -> AuthResult<String> {
        value
            .map(ToOwned::to_owned)
            .ok_or_else(|| AuthError::invalid_request(format!("Missing {name} parameter")))
    }
}

/// Successful token response body.
///
/// # Example
///
/// ```json
/// {
///   "access_token": "4cc3...",
///   "token_type": "bearer",
///   "expires_in": 3600,
///   "refresh_token": "r3fr..."
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The bearer access token.
    pub access_token: String,

    /// Always "bearer".
    pub token_type: String,

    /// Nominal access token lifetime in seconds. Issuance is immediate,
    /// so the nominal value is exact.
    pub expires_in: u64,

    /// Refresh token; absent for client_credentials grants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl TokenResponse {
    /// Builds the externally visible response for an issued token record.
    #[must_use]
    pub fn from_record(record: &AccessToken, expires_in: u64) -> Self {
        Self {
            access_token: record.access_token.clone(),
            token_type: "bearer".to_string(),
            expires_in,
            refresh_token: record.refresh_token.clone(),
        }
    }
}

/// Token error response body.
///
/// # Example
///
/// ```json
/// {
///   "error": "invalid_grant",
///   "error_description": "Authorization code not found"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenErrorBody {
    /// OAuth 2.0 error code.
    pub error: String,

    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}

impl TokenErrorBody {
    /// Renders a protocol error as its wire body.
    ///
    /// Server errors are deliberately collapsed to `unexpected` with no
    /// description so that no internal detail leaks to the client.
    #[must_use]
    pub fn from_error(error: &AuthError) -> Self {
        if error.is_server_error() {
            Self {
                error: "unexpected".to_string(),
                error_description: None,
            }
        } else {
            Self {
                error: error.oauth_error_code().to_string(),
                error_description: Some(error.description()),
            }
        }
    }
}
