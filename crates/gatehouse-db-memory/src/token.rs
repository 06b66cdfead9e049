//! In-memory access token store.

use async_trait::async_trait;
use dashmap::DashMap;
use time::OffsetDateTime;

use gatehouse_auth::AuthResult;
use gatehouse_auth::storage::TokenStorage;
use gatehouse_auth::types::AccessToken;

/// Token records held in two `DashMap`s.
///
/// The primary map is keyed by access token value and holds every saved
/// record, including `client_credentials` tokens that carry no refresh
/// material. Refresh-bearing records are additionally indexed by refresh
/// token value; refresh lookup consumes from that index via
/// `DashMap::remove_if`, so two concurrent rotations of the same refresh
/// token see exactly one `Some`. Consuming the refresh index does not
/// remove the record itself: the already-issued access token stays valid
/// until it expires.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    tokens: DashMap<String, AccessToken>,
    refresh_index: DashMap<String, AccessToken>,
}

impl MemoryTokenStorage {
    /// Creates an empty token store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a record by its access token value.
    #[must_use]
    pub fn get_access_token(&self, access_token: &str) -> Option<AccessToken> {
        self.tokens.get(access_token).map(|token| token.clone())
    }

    /// Drops records whose access token has expired at `now`, and
    /// refresh index entries whose refresh token has expired. A refresh
    /// token outlives the access token it was issued with, so an index
    /// entry survives until its own expiry, not the access token's.
    /// Returns the number of records removed. Meant for a periodic
    /// housekeeping task.
    pub fn purge_expired(&self, now: OffsetDateTime) -> usize {
        let before = self.tokens.len();
        self.tokens.retain(|_, token| !token.is_expired(now));
        self.refresh_index
            .retain(|_, token| !token.is_refresh_expired(now));
        before - self.tokens.len()
    }
}

#[async_trait]
impl TokenStorage for MemoryTokenStorage {
    async fn save_access_token(&self, token: &AccessToken) -> AuthResult<()> {
        if let Some(refresh_token) = &token.refresh_token {
            self.refresh_index
                .insert(refresh_token.clone(), token.clone());
        }
        self.tokens.insert(token.access_token.clone(), token.clone());
        Ok(())
    }

    async fn get_access_token_by_refresh_token(
        &self,
        client_id: &str,
        refresh_token: &str,
    ) -> AuthResult<Option<AccessToken>> {
        let removed = self
            .refresh_index
            .remove_if(refresh_token, |_, record| record.client_id == client_id);
        Ok(removed.map(|(_, record)| record))
    }

    async fn revoke_refresh_token(&self, client_id: &str, refresh_token: &str) -> AuthResult<()> {
        self.refresh_index
            .remove_if(refresh_token, |_, record| record.client_id == client_id);
        Ok(())
    }
}
