//! Token and code generation.
//!
//! The issuer is the only component in the engine that touches
//! randomness and clocks. Every generated value is a 256-bit random
//! string encoded as base64url: opaque identifiers with negligible
//! collision probability, never signed or structured tokens that encode
//! their fields.

use time::OffsetDateTime;

use crate::config::TokenConfig;
use crate::types::{AccessToken, AuthorizationCode, GrantType};

/// Generates unguessable code/token strings and computes expiry
/// timestamps.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    config: TokenConfig,
}

impl TokenIssuer {
    /// Creates a new issuer with the given lifetimes.
    #[must_use]
    pub fn new(config: TokenConfig) -> Self {
        Self { config }
    }

    /// Returns the nominal access token lifetime in seconds, the value
    /// reported as `expires_in`. Issuance is immediate, so the nominal
    /// value is exact.
    #[must_use]
    pub fn expires_in_secs(&self) -> u64 {
        self.config.access_token_lifetime.as_secs()
    }

    /// Generates a fresh single-use authorization code bound to
    /// (client, user, scope).
    #[must_use]
    pub fn authorization_code(
        &self,
        client_id: impl Into<String>,
        user_id: impl Into<String>,
        scope: impl Into<String>,
    ) -> AuthorizationCode {
        AuthorizationCode {
            code: opaque_token(),
            client_id: client_id.into(),
            user_id: user_id.into(),
            scope: scope.into(),
        }
    }

    /// Generates an access token record for a successful grant.
    ///
    /// Refresh material is included unless the grant is
    /// `client_credentials`. Expiries are absolute instants computed from
    /// the current clock.
    #[must_use]
    pub fn access_token(
        &self,
        client_id: impl Into<String>,
        user_id: Option<String>,
        scope: impl Into<String>,
        grant_type: GrantType,
    ) -> AccessToken {
        let now = OffsetDateTime::now_utc();
        let (refresh_token, refresh_token_expires_on) =
            if grant_type == GrantType::ClientCredentials {
                (None, None)
            } else {
                (
                    Some(opaque_token()),
                    Some(now + self.config.refresh_token_lifetime),
                )
            };

        AccessToken {
            access_token: opaque_token(),
            access_token_expires_on: now + self.config.access_token_lifetime,
            refresh_token,
            refresh_token_expires_on,
            client_id: client_id.into(),
            user_id,
            scope: scope.into(),
        }
    }
}

/// Generates a cryptographically secure random token.
///
/// Returns a 256-bit random value encoded as base64url (43 characters).
#[must_use]
fn opaque_token() -> String {
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    let mut bytes = [0u8; 32];
    rand::Rng::fill(&mut rand::thread_rng(), &mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
