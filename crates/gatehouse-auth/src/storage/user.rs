//! Identity storage trait.

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::User;

/// Identity operations: resolving principals and verifying credentials.
///
/// Password verification lives with the identity store so the engine
/// never sees stored credential material.
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Resolves an authenticated principal id to a User record.
    ///
    /// Returns `None` if the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn get_user(&self, user_id: &str) -> AuthResult<Option<User>>;

    /// Verifies a username/password pair.
    ///
    /// Returns the user id on success, `None` when the user is unknown
    /// or the password does not match. Unknown-user and bad-password
    /// outcomes are indistinguishable to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn verify_username_and_password(
        &self,
        username: &str,
        password: &str,
    ) -> AuthResult<Option<String>>;
}
