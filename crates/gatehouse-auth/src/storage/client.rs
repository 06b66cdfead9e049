//! Client registration storage trait.

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::Application;

/// Storage operations for registered OAuth client applications.
///
/// Registrations are created by an out-of-scope developer flow and are
/// read-only to the engine.
#[async_trait]
pub trait ClientStorage: Send + Sync {
    /// Resolves a client identifier to its registered Application record.
    ///
    /// Returns `None` if no such client is registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn get_application(&self, client_id: &str) -> AuthResult<Option<Application>>;
}
