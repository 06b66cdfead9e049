//! Server configuration.
//!
//! Loaded from an optional `gatehouse.toml` with `GATEHOUSE__`-prefixed
//! environment variable overrides, e.g. `GATEHOUSE__SERVER__PORT=9090`.

use gatehouse_auth::config::AuthConfig;
use gatehouse_auth::types::{Application, User};
use serde::{Deserialize, Serialize};

/// Root server configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP listener settings.
    pub server: ListenConfig,

    /// Authorization engine settings.
    pub auth: AuthConfig,

    /// Records loaded into the in-memory stores at startup.
    pub seed: SeedConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ListenConfig {
    /// Returns the socket address string for the TCP listener.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Startup data for the in-memory backend.
///
/// The memory stores are empty at boot, so without seed data no client
/// can complete any flow.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Client registrations to load.
    pub applications: Vec<Application>,

    /// Users to load.
    pub users: Vec<SeedUser>,
}

/// A seeded user, optionally with a password for the password grant.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedUser {
    /// Stable user identifier.
    pub id: String,

    /// Username for credential verification.
    #[serde(default)]
    pub username: Option<String>,

    /// Plain-text password. Seed data only; real deployments back the
    /// identity store with a proper credential service.
    #[serde(default)]
    pub password: Option<String>,
}

impl SeedUser {
    /// Converts to the engine's user type.
    #[must_use]
    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            username: self.username.clone(),
        }
    }
}

/// Loads configuration from `path` (when it exists) merged with
/// `GATEHOUSE__`-prefixed environment variables.
pub fn load_config(path: Option<&str>) -> anyhow::Result<ServerConfig> {
    use config::{Config, Environment, File};

    let mut builder = Config::builder();
    let path = std::path::PathBuf::from(path.unwrap_or("gatehouse.toml"));
    if path.exists() {
        builder = builder.add_source(File::from(path));
    }
    builder = builder.add_source(
        Environment::with_prefix("GATEHOUSE")
            .try_parsing(true)
            .separator("__"),
    );

    let merged = builder.build()?.try_deserialize()?;
    Ok(merged)
}
