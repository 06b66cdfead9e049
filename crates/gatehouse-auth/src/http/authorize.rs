//! Authorization endpoint handler.
//!
//! # Flow
//!
//! ```text
//! GET /authorize?client_id=...&redirect_uri=...&response_type=code
//!     ├─► No authenticated principal → 302 to the external login surface
//!     ├─► Unknown client / unknown user / redirect URI mismatch
//!     │       → inline 400 (no trusted redirect target, so no redirect)
//!     ├─► Corrupt registration data → 500 (never leaked into a redirect)
//!     ├─► response_type=code → 302 redirect_uri?code=...&state=...
//!     └─► other response_type → 302 redirect_uri?error=unsupported_response_type
//! ```
//!
//! The authenticated principal arrives as a request extension installed
//! by the out-of-scope session layer.

use std::sync::Arc;

use axum::Extension;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use tracing::{error, warn};

use crate::error::AuthError;
use crate::oauth::authorize::{AuthorizationRequest, AuthorizeOutcome};
use crate::oauth::service::AuthorizationService;

/// Authenticated principal established by the session layer.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub String);

/// State for the authorize handler.
#[derive(Clone)]
pub struct AuthorizeState {
    /// Authorization service for validating requests and issuing codes.
    pub authorization_service: Arc<AuthorizationService>,
}

/// GET /authorize handler.
pub async fn authorize_handler(
    State(state): State<AuthorizeState>,
    user: Option<Extension<AuthenticatedUser>>,
    Query(request): Query<AuthorizationRequest>,
) -> Response {
    let user_id = user.as_ref().map(|Extension(u)| u.0.as_str());

    match state
        .authorization_service
        .authorize(&request, user_id)
        .await
    {
        Ok(AuthorizeOutcome::Login(url)) | Ok(AuthorizeOutcome::Redirect(url)) => {
            Redirect::to(&url).into_response()
        }
        Err(error) => authorize_error_response(&request, error),
    }
}

/// Renders an authorize failure.
///
/// Protocol errors are direct messages to the request issuer; they are
/// never turned into a redirect because no trusted redirect target is
/// established at the point they arise.
fn authorize_error_response(request: &AuthorizationRequest, error: AuthError) -> Response {
    if error.is_server_error() {
        error!(
            client_id = %request.client_id,
            error = %error,
            "Authorize request failed with server error"
        );
        return (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response();
    }

    warn!(
        client_id = %request.client_id,
        error = %error,
        "Authorize request rejected"
    );
    (StatusCode::BAD_REQUEST, error.description()).into_response()
}
