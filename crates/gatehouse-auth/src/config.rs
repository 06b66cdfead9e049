//! Authorization server configuration.
//!
//! Configuration for the engine: token lifetimes and the external login
//! surface unauthenticated users are sent to. Lifetimes deserialize from
//! humantime strings so TOML files can say `"1h"` or `"30d"`.
//!
//! # Example (TOML)
//!
//! ```toml
//! [auth]
//! login_url = "https://accounts.example.com/login"
//!
//! [auth.tokens]
//! access_token_lifetime = "1h"
//! refresh_token_lifetime = "30d"
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the authorization engine.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// External login surface. Unauthenticated authorize requests are
    /// redirected here; the login flow is not part of this engine.
    pub login_url: String,

    /// Token lifetime configuration.
    pub tokens: TokenConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_url: "http://localhost:3000/login".to_string(),
            tokens: TokenConfig::default(),
        }
    }
}

/// Lifetimes for issued token material.
///
/// Expiry timestamps are always stored as absolute instants computed at
/// issuance, never as durations, so downstream expiry checks tolerate
/// clock drift between services.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Access token lifetime.
    #[serde(with = "humantime_serde")]
    pub access_token_lifetime: Duration,

    /// Refresh token lifetime. Longer than the access token lifetime
    /// since refresh requires client authentication.
    #[serde(with = "humantime_serde")]
    pub refresh_token_lifetime: Duration,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            access_token_lifetime: Duration::from_secs(3600), // 1 hour
            refresh_token_lifetime: Duration::from_secs(30 * 24 * 3600), // 30 days
        }
    }
}

impl TokenConfig {
    /// Creates a configuration with a custom access token lifetime.
    #[must_use]
    pub fn with_access_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.access_token_lifetime = lifetime;
        self
    }

    /// Creates a configuration with a custom refresh token lifetime.
    #[must_use]
    pub fn with_refresh_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.refresh_token_lifetime = lifetime;
        self
    }
}
