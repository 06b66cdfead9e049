//! Access token domain type.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// An issued credential pair as persisted by the token store.
///
/// Refresh material exists iff the issuing grant was not
/// `client_credentials`. Records are never mutated in place: refresh
/// rotation revokes the old record and creates a new one.
///
/// Expiry instants are absolute timestamps so that downstream expiry
/// checks are clock-drift-tolerant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    /// Unique, unguessable bearer token value.
    pub access_token: String,

    /// When the access token expires.
    #[serde(with = "time::serde::rfc3339")]
    pub access_token_expires_on: OffsetDateTime,

    /// Unique, unguessable refresh token value. Absent for
    /// `client_credentials` grants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// When the refresh token expires. Present iff `refresh_token` is.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub refresh_token_expires_on: Option<OffsetDateTime>,

    /// Client the token was issued to.
    pub client_id: String,

    /// Token subject. Absent for `client_credentials` grants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Granted scope, opaque to the engine.
    pub scope: String,
}

impl AccessToken {
    /// Returns `true` if the access token has expired at `now`.
    #[must_use]
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        now > self.access_token_expires_on
    }

    /// Returns `true` if this record carries refresh material whose
    /// expiry has passed at `now`. A record without refresh material is
    /// never refresh-expired.
    #[must_use]
    pub fn is_refresh_expired(&self, now: OffsetDateTime) -> bool {
        self.refresh_token_expires_on
            .is_some_and(|expires_on| now > expires_on)
    }

    /// Returns `true` if this record carries refresh material.
    #[must_use]
    pub fn has_refresh_token(&self) -> bool {
        self.refresh_token.is_some()
    }
}
