//! Access token storage trait.
//!
//! Refresh-token rotation has the same single-use contract as
//! authorization codes: of two concurrent rotations of the same refresh
//! token, exactly one may observe the record (see [`crate::storage::code`]).

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::AccessToken;

/// Storage operations for issued access/refresh token records.
#[async_trait]
pub trait TokenStorage: Send + Sync {
    /// Persists an issued token record. Records are never mutated in
    /// place; rotation revokes the old record and saves a new one.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn save_access_token(&self, token: &AccessToken) -> AuthResult<()>;

    /// Looks up the token record holding `refresh_token`, provided it was
    /// issued to `client_id`. Must be atomic-consumable.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn get_access_token_by_refresh_token(
        &self,
        client_id: &str,
        refresh_token: &str,
    ) -> AuthResult<Option<AccessToken>>;

    /// Revokes a refresh token by clientId+refreshToken pair. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn revoke_refresh_token(&self, client_id: &str, refresh_token: &str) -> AuthResult<()>;
}
