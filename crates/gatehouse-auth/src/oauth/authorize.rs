//! Authorization endpoint types.
//!
//! The authorization endpoint is the first step of the authorization code
//! flow:
//!
//! 1. Client sends the user to `/authorize` with request parameters
//! 2. An out-of-scope login surface authenticates the user
//! 3. The engine issues a single-use code and redirects back to the client
//! 4. Client exchanges the code for tokens at the token endpoint
//!
//! # Example
//!
//! ```ignore
//! GET /authorize?
//!   response_type=code
//!   &client_id=c1
//!   &redirect_uri=https://a.example/cb
//!   &scope=read
//!   &state=xyz
//! ```

use serde::{Deserialize, Serialize};

/// Authorization request parameters, received as query string parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorizationRequest {
    /// Must be "code" for the authorization code flow; anything else is
    /// answered with an `unsupported_response_type` redirect.
    pub response_type: String,

    /// Client identifier issued during registration.
    pub client_id: String,

    /// Redirect URI the response will be sent to. Must exactly equal the
    /// registered URI.
    pub redirect_uri: String,

    /// Requested scope, opaque to the engine.
    #[serde(default)]
    pub scope: String,

    /// Opaque CSRF protection value. Round-trips byte-for-byte, including
    /// absence.
    #[serde(default)]
    pub state: Option<String>,
}

/// Successful authorization response: parameters appended to the
/// client's redirect URI.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationResponse {
    /// Single-use authorization code.
    pub code: String,

    /// Echoed state parameter, omitted when the request carried none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl AuthorizationResponse {
    /// Creates a new authorization response.
    #[must_use]
    pub fn new(code: String, state: Option<String>) -> Self {
        Self { code, state }
    }

    /// Builds the redirect URL with response parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the redirect URI cannot be parsed.
    pub fn to_redirect_url(&self, redirect_uri: &str) -> Result<String, url::ParseError> {
        let mut url = url::Url::parse(redirect_uri)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("code", &self.code);
            if let Some(ref state) = self.state {
                pairs.append_pair("state", state);
            }
        }
        Ok(url.to_string())
    }
}

/// Builds an error redirect URL carrying `?error=<code>`.
///
/// Only used from contexts where the redirect URI is already known-good:
/// an unrecognized `response_type` on an otherwise valid request.
///
/// # Errors
///
/// Returns an error if the redirect URI cannot be parsed.
pub fn error_redirect_url(redirect_uri: &str, error: &str) -> Result<String, url::ParseError> {
    let mut url = url::Url::parse(redirect_uri)?;
    url.query_pairs_mut().append_pair("error", error);
    Ok(url.to_string())
}

/// Outcome of processing an authorization request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizeOutcome {
    /// No authenticated principal: the caller must be sent to the external
    /// login surface. Not an error, a deferred request.
    Login(String),

    /// Redirect to the client's registered URI, either with a fresh code
    /// or with an error query parameter.
    Redirect(String),
}
