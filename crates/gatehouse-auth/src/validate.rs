//! Validation of stored client registrations.
//!
//! Both endpoints run these checks on the resolved [`Application`] before
//! acting on it. A failure here means the registration record itself is
//! corrupt, so it is a [`AuthError::Configuration`] server error and must
//! never be converted into a client-facing redirect: redirecting on a
//! malformed redirect URI could leak state to an attacker-controlled
//! target.
//!
//! [`Application`]: crate::types::Application

use std::sync::LazyLock;

use regex::Regex;

use crate::AuthResult;
use crate::error::AuthError;
use crate::types::ClientType;

/// Any non-empty scheme, "://", any non-empty remainder.
static REDIRECT_URI_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.+://.+$").expect("redirect URI regex is valid"));

/// Validates that a registered redirect URI has `scheme://...` shape.
///
/// # Errors
///
/// Returns [`AuthError::Configuration`] if the URI is malformed.
pub fn redirect_uri(uri: &str) -> AuthResult<()> {
    if REDIRECT_URI_SHAPE.is_match(uri) {
        Ok(())
    } else {
        Err(AuthError::configuration(format!(
            "Registered redirect URI is malformed: '{uri}'"
        )))
    }
}

/// Validates a stored client type string.
///
/// # Errors
///
/// Returns [`AuthError::Configuration`] unless the value is exactly
/// "confidential" or "public".
pub fn client_type(value: &str) -> AuthResult<ClientType> {
    ClientType::parse(value).ok_or_else(|| {
        AuthError::configuration(format!("Registered client type is invalid: '{value}'"))
    })
}
