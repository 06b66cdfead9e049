//! OAuth 2.0 endpoint types and services.
//!
//! - [`authorize`] - authorization endpoint request/response types and
//!   redirect URL building
//! - [`token`] - token endpoint request/response types and the typed
//!   grant union
//! - [`service`] - the authorization service behind `/authorize`

pub mod authorize;
pub mod service;
pub mod token;

pub use authorize::{AuthorizationRequest, AuthorizationResponse, AuthorizeOutcome};
pub use service::AuthorizationService;
pub use token::{TokenErrorBody, TokenGrant, TokenRequest, TokenResponse};
