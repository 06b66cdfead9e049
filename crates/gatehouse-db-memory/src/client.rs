//! In-memory client registration store.

use async_trait::async_trait;
use dashmap::DashMap;

use gatehouse_auth::AuthResult;
use gatehouse_auth::storage::ClientStorage;
use gatehouse_auth::types::Application;

/// Client registrations held in a `DashMap` keyed by client id.
///
/// The engine only reads registrations; [`MemoryClientStorage::add_application`]
/// exists for seeding and tests.
#[derive(Debug, Default)]
pub struct MemoryClientStorage {
    applications: DashMap<String, Application>,
}

impl MemoryClientStorage {
    /// Creates an empty client store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an application, replacing any previous registration
    /// under the same client id.
    pub fn add_application(&self, application: Application) {
        self.applications
            .insert(application.client_id.clone(), application);
    }
}

#[async_trait]
impl ClientStorage for MemoryClientStorage {
    async fn get_application(&self, client_id: &str) -> AuthResult<Option<Application>> {
        Ok(self.applications.get(client_id).map(|app| app.clone()))
    }
}
