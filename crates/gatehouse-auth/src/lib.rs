//! # gatehouse-auth
//!
//! OAuth 2.0 authorization server engine.
//!
//! This crate provides:
//! - Authorization endpoint: validates requests and issues single-use
//!   authorization codes
//! - Token endpoint: mints bearer access/refresh tokens for the
//!   authorization_code, password, client_credentials, and refresh_token
//!   grants
//! - Redirect-URI integrity and client-type enforcement
//! - Storage traits for the external client/identity/code/token stores
//!
//! ## Overview
//!
//! The engine is stateless between requests: all mutable state lives in
//! the external stores injected as `Arc<dyn Trait>`, and the single-use
//! invariants (authorization codes, refresh token rotation) are
//! delegated to the stores' atomicity contracts.
//!
//! ## Modules
//!
//! - [`config`] - Engine configuration (login surface, token lifetimes)
//! - [`error`] - Protocol vs. server error model
//! - [`oauth`] - Endpoint types and the authorization service
//! - [`token`] - Token issuance and grant dispatch
//! - [`types`] - Domain entities (Application, codes, tokens, users)
//! - [`validate`] - Registration data validators
//! - [`storage`] - Storage traits for auth-related data
//! - [`http`] - Axum HTTP handlers for both endpoints

pub mod config;
pub mod error;
pub mod http;
pub mod oauth;
pub mod storage;
pub mod token;
pub mod types;
pub mod validate;

pub use config::{AuthConfig, TokenConfig};
pub use error::{AuthError, ErrorCategory};
pub use http::{
    AuthenticatedUser, AuthorizeState, TokenState, authorize_handler, token_handler,
};
pub use oauth::{
    AuthorizationRequest, AuthorizationResponse, AuthorizationService, AuthorizeOutcome,
    TokenErrorBody, TokenGrant, TokenRequest, TokenResponse,
};
pub use storage::{ClientStorage, CodeStorage, TokenStorage, UserStorage};
pub use token::{TokenIssuer, TokenService};
pub use types::{AccessToken, Application, AuthorizationCode, ClientType, GrantType, User};

/// Type alias for engine results.
pub type AuthResult<T> = Result<T, AuthError>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use gatehouse_auth::prelude::*;
/// ```
pub mod prelude {
    pub use crate::AuthResult;
    pub use crate::config::{AuthConfig, TokenConfig};
    pub use crate::error::{AuthError, ErrorCategory};
    pub use crate::http::{
        AuthenticatedUser, AuthorizeState, TokenState, authorize_handler, token_handler,
    };
    pub use crate::oauth::{
        AuthorizationRequest, AuthorizationResponse, AuthorizationService, AuthorizeOutcome,
        TokenErrorBody, TokenGrant, TokenRequest, TokenResponse,
    };
    pub use crate::storage::{ClientStorage, CodeStorage, TokenStorage, UserStorage};
    pub use crate::token::{TokenIssuer, TokenService};
    pub use crate::types::{
        AccessToken, Application, AuthorizationCode, ClientType, GrantType, User,
    };
}
