//! In-memory identity store.

use async_trait::async_trait;
use dashmap::DashMap;

use gatehouse_auth::AuthResult;
use gatehouse_auth::storage::UserStorage;
use gatehouse_auth::types::User;

/// Credential record kept alongside a user for password verification.
#[derive(Debug, Clone)]
struct Credentials {
    user_id: String,
    password: String,
}

/// Users held in two `DashMap`s: one keyed by user id, one keyed by
/// username for credential verification.
#[derive(Debug, Default)]
pub struct MemoryUserStorage {
    users: DashMap<String, User>,
    credentials: DashMap<String, Credentials>,
}

impl MemoryUserStorage {
    /// Creates an empty identity store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a user without a password. Such a user can consent on the
    /// authorization endpoint but cannot use the password grant.
    pub fn add_user(&self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    /// Adds a user together with a password keyed by the user's
    /// username. Users without a username get no credential entry.
    pub fn add_user_with_password(&self, user: User, password: impl Into<String>) {
        if let Some(username) = user.username.clone() {
            self.credentials.insert(
                username,
                Credentials {
                    user_id: user.id.clone(),
                    password: password.into(),
                },
            );
        }
        self.users.insert(user.id.clone(), user);
    }
}

#[async_trait]
impl UserStorage for MemoryUserStorage {
    async fn get_user(&self, user_id: &str) -> AuthResult<Option<User>> {
        Ok(self.users.get(user_id).map(|user| user.clone()))
    }

    async fn verify_username_and_password(
        &self,
        username: &str,
        password: &str,
    ) -> AuthResult<Option<String>> {
        let matched = self
            .credentials
            .get(username)
            .filter(|creds| creds.password == password)
            .map(|creds| creds.user_id.clone());
        Ok(matched)
    }
}
