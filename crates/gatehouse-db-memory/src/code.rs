//! In-memory authorization code store.

use async_trait::async_trait;
use dashmap::DashMap;

use gatehouse_auth::AuthResult;
use gatehouse_auth::storage::CodeStorage;
use gatehouse_auth::types::AuthorizationCode;

/// Authorization codes held in a `DashMap` keyed by code value.
///
/// Lookup consumes: [`CodeStorage::get_authorization_code`] removes the
/// entry via `DashMap::remove_if` while holding the shard lock, so two
/// concurrent exchanges of the same code see exactly one `Some`. A
/// lookup with the wrong client id leaves the entry in place.
#[derive(Debug, Default)]
pub struct MemoryCodeStorage {
    codes: DashMap<String, AuthorizationCode>,
}

impl MemoryCodeStorage {
    /// Creates an empty code store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns `true` if no codes are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[async_trait]
impl CodeStorage for MemoryCodeStorage {
    async fn save_authorization_code(&self, code: &AuthorizationCode) -> AuthResult<()> {
        self.codes.insert(code.code.clone(), code.clone());
        Ok(())
    }

    async fn get_authorization_code(
        &self,
        client_id: &str,
        code: &str,
    ) -> AuthResult<Option<AuthorizationCode>> {
        let removed = self
            .codes
            .remove_if(code, |_, record| record.client_id == client_id);
        Ok(removed.map(|(_, record)| record))
    }

    async fn revoke_authorization_code(&self, code: &str) -> AuthResult<()> {
        self.codes.remove(code);
        Ok(())
    }
}
