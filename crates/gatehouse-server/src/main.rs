//! Gatehouse authorization server binary.
//!
//! Wires the engine from `gatehouse-auth` to the in-memory backend and
//! serves the two OAuth 2.0 endpoints plus a health probe.

mod config;

use std::env;
use std::sync::Arc;

use anyhow::Context;
use axum::Json;
use axum::Router;
use axum::routing::{get, post};
use tracing_subscriber::EnvFilter;

use gatehouse_auth::http::{AuthorizeState, TokenState, authorize_handler, token_handler};
use gatehouse_auth::oauth::AuthorizationService;
use gatehouse_auth::token::{TokenIssuer, TokenService};
use gatehouse_db_memory::{
    MemoryClientStorage, MemoryCodeStorage, MemoryTokenStorage, MemoryUserStorage,
};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config_path = env::args()
        .skip_while(|arg| arg != "--config")
        .nth(1)
        .or_else(|| env::var("GATEHOUSE_CONFIG").ok());
    let cfg = config::load_config(config_path.as_deref()).context("failed to load configuration")?;

    let app = build_router(&cfg);

    let address = cfg.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!(%address, "Gatehouse authorization server listening");

    axum::serve(listener, app)
        .await
        .context("server terminated")?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Builds the application router with freshly seeded in-memory stores.
fn build_router(cfg: &ServerConfig) -> Router {
    let clients = Arc::new(MemoryClientStorage::new());
    let users = Arc::new(MemoryUserStorage::new());
    let codes = Arc::new(MemoryCodeStorage::new());
    let tokens = Arc::new(MemoryTokenStorage::new());

    for application in &cfg.seed.applications {
        tracing::info!(client_id = %application.client_id, "Seeding client registration");
        clients.add_application(application.clone());
    }
    for seeded in &cfg.seed.users {
        tracing::info!(user_id = %seeded.id, "Seeding user");
        match &seeded.password {
            Some(password) => users.add_user_with_password(seeded.to_user(), password.clone()),
            None => users.add_user(seeded.to_user()),
        }
    }

    let authorization_service = Arc::new(AuthorizationService::new(
        clients.clone(),
        users.clone(),
        codes.clone(),
        TokenIssuer::new(cfg.auth.tokens.clone()),
        cfg.auth.clone(),
    ));
    let token_service = Arc::new(TokenService::new(
        clients,
        users,
        codes,
        tokens,
        TokenIssuer::new(cfg.auth.tokens.clone()),
    ));

    let authorize_routes = Router::new()
        .route("/authorize", get(authorize_handler))
        .with_state(AuthorizeState {
            authorization_service,
        });
    let token_routes = Router::new()
        .route("/token", post(token_handler))
        .with_state(TokenState { token_service });

    Router::new()
        .merge(authorize_routes)
        .merge(token_routes)
        .route("/health", get(health))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
