//! Authorization code storage trait.
//!
//! # Atomicity contract
//!
//! Authorization-code exchange is a single-use consumption: when two
//! exchanges of the same code run concurrently, exactly one caller must
//! observe the code as present and the other must observe absence. The
//! engine takes no locks of its own; it delegates this contract to the
//! implementation, which must make [`CodeStorage::get_authorization_code`]
//! an atomic read-then-invalidate (compare-and-delete or equivalent).

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::AuthorizationCode;

/// Storage operations for single-use authorization codes.
#[async_trait]
pub trait CodeStorage: Send + Sync {
    /// Persists a freshly issued authorization code.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn save_authorization_code(&self, code: &AuthorizationCode) -> AuthResult<()>;

    /// Retrieves the code record, provided it was issued to `client_id`.
    ///
    /// Must be atomic-consumable (see module docs): concurrent callers
    /// racing on the same code must not both receive `Some`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn get_authorization_code(
        &self,
        client_id: &str,
        code: &str,
    ) -> AuthResult<Option<AuthorizationCode>>;

    /// Revokes a code. Idempotent: revoking an already-consumed or
    /// unknown code is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn revoke_authorization_code(&self, code: &str) -> AuthResult<()>;
}
