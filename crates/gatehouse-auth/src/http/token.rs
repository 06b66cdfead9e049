//! Token endpoint handler.
//!
//! Handles POST requests to `/token` with an
//! `application/x-www-form-urlencoded` body.
//!
//! # Example
//!
//! ```ignore
//! POST /token
//! Content-Type: application/x-www-form-urlencoded
//!
//! grant_type=authorization_code
//! &client_id=c1
//! &client_secret=s1
//! &code=4uth...
//! ```
//!
//! Failures are JSON `{error, error_description}` bodies with HTTP 400 -
//! or, only when the error carries a known-good redirect target, a
//! redirect to `<redirectURI>?error=<code>`. Anything not recognized as
//! a protocol error collapses to `{"error": "unexpected"}`; the boundary
//! is exception-safe and always answers.

use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use tracing::{error, info, warn};

use crate::error::AuthError;
use crate::oauth::token::{TokenErrorBody, TokenRequest, TokenResponse};
use crate::token::service::TokenService;

/// State for the token handler.
#[derive(Clone)]
pub struct TokenState {
    /// Token service for grant dispatch.
    pub token_service: Arc<TokenService>,
}

/// POST /token handler.
///
/// A body that does not even deserialize into [`TokenRequest`] (missing
/// `grant_type` or `client_id`, wrong content type) is still answered
/// with an OAuth-shaped `invalid_request` body, not the extractor's
/// plain-text rejection.
pub async fn token_handler(
    State(state): State<TokenState>,
    form: Result<Form<TokenRequest>, FormRejection>,
) -> Response {
    let Form(request) = match form {
        Ok(form) => form,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Malformed token request body");
            return token_error_response(
                &AuthError::invalid_request("Malformed token request body"),
                None,
            );
        }
    };

    match state.token_service.handle(&request).await {
        Ok(response) => {
            info!(
                client_id = %request.client_id,
                grant_type = %request.grant_type,
                "Token issued"
            );
            token_success_response(response)
        }
        Err(e) => {
            if e.is_server_error() {
                error!(
                    client_id = %request.client_id,
                    grant_type = %request.grant_type,
                    error = %e,
                    "Token request failed with server error"
                );
            } else {
                warn!(
                    client_id = %request.client_id,
                    grant_type = %request.grant_type,
                    error = %e,
                    "Token request rejected"
                );
            }
            token_error_response(&e, None)
        }
    }
}

/// Builds a successful token response.
fn token_success_response(response: TokenResponse) -> Response {
    (
        StatusCode::OK,
        [
            ("Cache-Control", "no-store"),
            ("Pragma", "no-cache"),
        ],
        Json(response),
    )
        .into_response()
}

/// Builds an error response for the token endpoint.
///
/// `redirect_uri` is a known-good redirect target, when the failing
/// context had already validated one; protocol errors then become a 400
/// redirect carrying `?error=<code>` instead of an inline body.
fn token_error_response(error: &AuthError, redirect_uri: Option<&str>) -> Response {
    let body = TokenErrorBody::from_error(error);

    if error.is_server_error() {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
    }

    if let Some(uri) = redirect_uri {
        let target = format!("{uri}?error={}", body.error);
        return (StatusCode::BAD_REQUEST, Redirect::to(&target)).into_response();
    }

    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}
