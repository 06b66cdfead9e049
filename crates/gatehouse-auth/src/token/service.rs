//! Token endpoint grant dispatch.
//!
//! Each request is independently classified into one of the four grant
//! kinds and handled; there is no state machine across requests. Entry
//! validation is shared: resolve the Application, run the registration
//! validators, and authenticate confidential clients by secret.
//!
//! # Grant table
//!
//! | grant_type         | precondition                     | subject        | refresh | side effect        |
//! |--------------------|----------------------------------|----------------|---------|--------------------|
//! | authorization_code | code resolves for this client    | code.user_id   | yes     | revoke the code    |
//! | password           | credentials verify               | verified user  | yes     | none               |
//! | client_credentials | confidential client only         | none           | no      | none               |
//! | refresh_token      | token resolves for this client   | record.user_id | yes     | revoke old token   |
//!
//! Post-issuance revocations run after the response is built, so a
//! persistence failure in the revoke step never loses an already-issued
//! token; such failures are logged and the response is still returned.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::AuthResult;
use crate::error::AuthError;
use crate::oauth::token::{TokenGrant, TokenRequest, TokenResponse};
use crate::storage::{ClientStorage, CodeStorage, TokenStorage, UserStorage};
use crate::token::issuer::TokenIssuer;
use crate::types::{Application, ClientType, GrantType};
use crate::validate;

/// Token service for handling OAuth 2.0 token requests.
pub struct TokenService {
    /// Client storage for resolving and authenticating clients.
    clients: Arc<dyn ClientStorage>,
    /// Identity storage for the password grant.
    users: Arc<dyn UserStorage>,
    /// Authorization code storage for the authorization_code grant.
    codes: Arc<dyn CodeStorage>,
    /// Token storage for persisting issued records and refresh lookup.
    tokens: Arc<dyn TokenStorage>,
    /// Generator for token material and expiries.
    issuer: TokenIssuer,
}

impl TokenService {
    /// Creates a new token service.
    #[must_use]
    pub fn new(
        clients: Arc<dyn ClientStorage>,
        users: Arc<dyn UserStorage>,
        codes: Arc<dyn CodeStorage>,
        tokens: Arc<dyn TokenStorage>,
        issuer: TokenIssuer,
    ) -> Self {
        Self {
            clients,
            users,
            codes,
            tokens,
            issuer,
        }
    }

    /// Processes a token request end to end.
    ///
    /// # Errors
    ///
    /// - `invalid_client` - unknown client
    /// - `unauthorized_client` - confidential client secret mismatch
    /// - `invalid_grant` - the referenced code, credentials, or refresh
    ///   token did not resolve
    /// - `unsupported_grant_type` - unknown grant type, or
    ///   client_credentials requested by a public client
    /// - `Configuration` - corrupt registration data (surfaced as 5xx,
    ///   never as a redirect)
    pub async fn handle(&self, request: &TokenRequest) -> AuthResult<TokenResponse> {
        let (application, client_type) = self.authenticate_client(request).await?;
        let grant = request.grant()?;

        debug!(
            client_id = %application.client_id,
            grant_type = %grant.grant_type(),
            "Processing token grant"
        );

        match grant {
            TokenGrant::AuthorizationCode { code } => {
                self.exchange_code(&application, &code).await
            }
            TokenGrant::Password {
                username,
                password,
                scope,
            } => self.password(&application, &username, &password, scope).await,
            TokenGrant::ClientCredentials { scope } => {
                self.client_credentials(&application, client_type, scope).await
            }
            TokenGrant::RefreshToken { refresh_token } => {
                self.refresh(&application, &refresh_token).await
            }
        }
    }

    /// Resolves the Application, runs registration validators, and
    /// authenticates confidential clients by secret.
    async fn authenticate_client(
        &self,
        request: &TokenRequest,
    ) -> AuthResult<(Application, ClientType)> {
        let application = self
            .clients
            .get_application(&request.client_id)
            .await?
            .ok_or_else(|| AuthError::invalid_client("Client not found"))?;

        validate::redirect_uri(&application.redirect_uri)?;
        let client_type = validate::client_type(&application.client_type)?;

        if client_type == ClientType::Confidential {
            let registered = application.client_secret.as_deref().ok_or_else(|| {
                AuthError::configuration("Confidential client has no registered secret")
            })?;
            let presented = request.client_secret.as_deref().unwrap_or_default();
            if !secrets_match(registered, presented) {
                return Err(AuthError::unauthorized_client("Client secret mismatch"));
            }
        }

        Ok((application, client_type))
    }

    /// authorization_code grant: consume the single-use code.
    async fn exchange_code(
        &self,
        application: &Application,
        code: &str,
    ) -> AuthResult<TokenResponse> {
        let record = self
            .codes
            .get_authorization_code(&application.client_id, code)
            .await?
            .ok_or_else(|| AuthError::invalid_grant("Authorization code not found"))?;

        let token = self.issuer.access_token(
            &application.client_id,
            Some(record.user_id),
            record.scope,
            GrantType::AuthorizationCode,
        );
        self.tokens.save_access_token(&token).await?;
        let response = TokenResponse::from_record(&token, self.issuer.expires_in_secs());

        // The response is already built; losing the revoke must not lose it.
        if let Err(error) = self.codes.revoke_authorization_code(code).await {
            warn!(
                client_id = %application.client_id,
                error = %error,
                "Failed to revoke exchanged authorization code"
            );
        }

        Ok(response)
    }

    /// password grant: verify resource owner credentials directly.
    async fn password(
        &self,
        application: &Application,
        username: &str,
        password: &str,
        scope: String,
    ) -> AuthResult<TokenResponse> {
        let user_id = self
            .users
            .verify_username_and_password(username, password)
            .await?
            .ok_or_else(|| AuthError::invalid_grant("User not found or password invalid"))?;

        let token = self.issuer.access_token(
            &application.client_id,
            Some(user_id),
            scope,
            GrantType::Password,
        );
        self.tokens.save_access_token(&token).await?;
        Ok(TokenResponse::from_record(
            &token,
            self.issuer.expires_in_secs(),
        ))
    }

    /// client_credentials grant: no resource owner, no refresh material.
    async fn client_credentials(
        &self,
        application: &Application,
        client_type: ClientType,
        scope: String,
    ) -> AuthResult<TokenResponse> {
        if client_type == ClientType::Public {
            return Err(AuthError::unsupported_grant_type(
                "Only enabled for confidential clients",
            ));
        }

        let token = self.issuer.access_token(
            &application.client_id,
            None,
            scope,
            GrantType::ClientCredentials,
        );
        self.tokens.save_access_token(&token).await?;
        Ok(TokenResponse::from_record(
            &token,
            self.issuer.expires_in_secs(),
        ))
    }

    /// refresh_token grant: rotate the old record into a new pair.
    async fn refresh(
        &self,
        application: &Application,
        refresh_token: &str,
    ) -> AuthResult<TokenResponse> {
        let old = self
            .tokens
            .get_access_token_by_refresh_token(&application.client_id, refresh_token)
            .await?
            .ok_or_else(|| AuthError::invalid_grant("Refresh token not found"))?;

        let token = self.issuer.access_token(
            &application.client_id,
            old.user_id,
            old.scope,
            GrantType::RefreshToken,
        );
        self.tokens.save_access_token(&token).await?;
        let response = TokenResponse::from_record(&token, self.issuer.expires_in_secs());

        // Rotation: the old refresh token dies after the new pair exists.
        if let Err(error) = self
            .tokens
            .revoke_refresh_token(&application.client_id, refresh_token)
            .await
        {
            warn!(
                client_id = %application.client_id,
                error = %error,
                "Failed to revoke rotated refresh token"
            );
        }

        Ok(response)
    }
}

/// Compares client secrets without an early-exit on the first differing
/// byte. Both inputs are hashed first, so the comparison runs over
/// equal-length digests regardless of secret length.
fn secrets_match(registered: &str, presented: &str) -> bool {
    let registered = Sha256::digest(registered.as_bytes());
    let presented = Sha256::digest(presented.as_bytes());
    registered
        .iter()
        .zip(presented.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    use async_trait::async_trait;

    use crate::config::TokenConfig;
    use crate::types::{AccessToken, AuthorizationCode, User};

    struct MockClientStorage {
        apps: HashMap<String, Application>,
    }

    #[async_trait]
    impl ClientStorage for MockClientStorage {
        async fn get_application(&self, client_id: &str) -> AuthResult<Option<Application>> {
            Ok(self.apps.get(client_id).cloned())
        }
    }

    struct MockUserStorage {
        /// username -> (password, user id)
        credentials: HashMap<String, (String, String)>,
    }

    #[async_trait]
    impl UserStorage for MockUserStorage {
        async fn get_user(&self, user_id: &str) -> AuthResult<Option<User>> {
            Ok(self
                .credentials
                .values()
                .find(|(_, id)| id == user_id)
                .map(|(_, id)| User::new(id.clone())))
        }

        async fn verify_username_and_password(
            &self,
            username: &str,
            password: &str,
        ) -> AuthResult<Option<String>> {
            Ok(self
                .credentials
                .get(username)
                .filter(|(stored, _)| stored == password)
                .map(|(_, id)| id.clone()))
        }
    }

    #[derive(Default)]
    struct MockCodeStorage {
        codes: RwLock<HashMap<String, AuthorizationCode>>,
    }

    #[async_trait]
    impl CodeStorage for MockCodeStorage {
        async fn save_authorization_code(&self, code: &AuthorizationCode) -> AuthResult<()> {
            self.codes
                .write()
                .unwrap()
                .insert(code.code.clone(), code.clone());
            Ok(())
        }

        async fn get_authorization_code(
            &self,
            client_id: &str,
            code: &str,
        ) -> AuthResult<Option<AuthorizationCode>> {
            Ok(self
                .codes
                .read()
                .unwrap()
                .get(code)
                .filter(|record| record.client_id == client_id)
                .cloned())
        }

        async fn revoke_authorization_code(&self, code: &str) -> AuthResult<()> {
            self.codes.write().unwrap().remove(code);
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockTokenStorage {
        tokens: RwLock<Vec<AccessToken>>,
    }

    impl MockTokenStorage {
        fn count(&self) -> usize {
            self.tokens.read().unwrap().len()
        }
    }

    #[async_trait]
    impl TokenStorage for MockTokenStorage {
        async fn save_access_token(&self, token: &AccessToken) -> AuthResult<()> {
            self.tokens.write().unwrap().push(token.clone());
            Ok(())
        }

        async fn get_access_token_by_refresh_token(
            &self,
            client_id: &str,
            refresh_token: &str,
        ) -> AuthResult<Option<AccessToken>> {
            Ok(self
                .tokens
                .read()
                .unwrap()
                .iter()
                .find(|t| {
                    t.client_id == client_id && t.refresh_token.as_deref() == Some(refresh_token)
                })
                .cloned())
        }

        async fn revoke_refresh_token(
            &self,
            client_id: &str,
            refresh_token: &str,
        ) -> AuthResult<()> {
            self.tokens.write().unwrap().retain(|t| {
                !(t.client_id == client_id && t.refresh_token.as_deref() == Some(refresh_token))
            });
            Ok(())
        }
    }

    fn confidential_app() -> Application {
        Application {
            name: "Smash".to_string(),
            website: "https://smash.example".to_string(),
            logo: String::new(),
            redirect_uri: "https://a.example/cb".to_string(),
            owner_user_id: "dev-1".to_string(),
            client_id: "c1".to_string(),
            client_secret: Some("s1".to_string()),
            client_type: "confidential".to_string(),
        }
    }

    fn public_app() -> Application {
        Application {
            name: "Spa".to_string(),
            website: String::new(),
            logo: String::new(),
            redirect_uri: "https://b.example/cb".to_string(),
            owner_user_id: "dev-2".to_string(),
            client_id: "c2".to_string(),
            client_secret: None,
            client_type: "public".to_string(),
        }
    }

    struct Fixture {
        service: TokenService,
        codes: Arc<MockCodeStorage>,
        tokens: Arc<MockTokenStorage>,
    }

    fn fixture(apps: Vec<Application>) -> Fixture {
        let clients = Arc::new(MockClientStorage {
            apps: apps.into_iter().map(|a| (a.client_id.clone(), a)).collect(),
        });
        let users = Arc::new(MockUserStorage {
            credentials: HashMap::from([(
                "alice".to_string(),
                ("wonder".to_string(), "u1".to_string()),
            )]),
        });
        let codes = Arc::new(MockCodeStorage::default());
        let tokens = Arc::new(MockTokenStorage::default());

        let service = TokenService::new(
            clients,
            users,
            codes.clone(),
            tokens.clone(),
            TokenIssuer::new(TokenConfig::default()),
        );

        Fixture {
            service,
            codes,
            tokens,
        }
    }

    fn request(grant_type: &str, client_id: &str, client_secret: Option<&str>) -> TokenRequest {
        TokenRequest {
            grant_type: grant_type.to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.map(ToOwned::to_owned),
            code: None,
            username: None,
            password: None,
            scope: None,
            refresh_token: None,
        }
    }

    #[tokio::test]
    async fn test_unknown_client() {
        let fx = fixture(vec![]);
        let err = fx
            .service
            .handle(&request("client_credentials", "ghost", None))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidClient { .. }));
    }

    #[tokio::test]
    async fn test_secret_mismatch_never_issues_token() {
        let fx = fixture(vec![confidential_app()]);
        let err = fx
            .service
            .handle(&request("client_credentials", "c1", Some("wrong")))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::UnauthorizedClient { .. }));
        assert_eq!(fx.tokens.count(), 0);
    }

    #[tokio::test]
    async fn test_missing_secret_is_rejected() {
        let fx = fixture(vec![confidential_app()]);
        let err = fx
            .service
            .handle(&request("client_credentials", "c1", None))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UnauthorizedClient { .. }));
    }

    #[tokio::test]
    async fn test_unknown_grant_type_is_explicit() {
        let fx = fixture(vec![confidential_app()]);
        let err = fx
            .service
            .handle(&request("device_code", "c1", Some("s1")))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UnsupportedGrantType { .. }));
    }

    #[tokio::test]
    async fn test_corrupt_client_type_is_configuration_error() {
        let mut app = confidential_app();
        app.client_type = "hybrid".to_string();
        let fx = fixture(vec![app]);

        let err = fx
            .service
            .handle(&request("client_credentials", "c1", Some("s1")))
            .await
            .unwrap_err();
        assert!(err.is_server_error());
    }

    #[tokio::test]
    async fn test_client_credentials_success_without_refresh() {
        let fx = fixture(vec![confidential_app()]);
        let response = fx
            .service
            .handle(&request("client_credentials", "c1", Some("s1")))
            .await
            .unwrap();

        assert_eq!(response.token_type, "bearer");
        assert_eq!(response.expires_in, 3600);
        assert!(response.refresh_token.is_none());
        assert_eq!(fx.tokens.count(), 1);
    }

    #[tokio::test]
    async fn test_client_credentials_rejected_for_public_client() {
        let fx = fixture(vec![public_app()]);
        let err = fx
            .service
            .handle(&request("client_credentials", "c2", None))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::UnsupportedGrantType { .. }));
        assert_eq!(fx.tokens.count(), 0);
    }

    #[tokio::test]
    async fn test_exchange_code_is_single_use() {
        let fx = fixture(vec![public_app()]);
        fx.codes
            .save_authorization_code(&AuthorizationCode {
                code: "code-1".to_string(),
                client_id: "c2".to_string(),
                user_id: "u1".to_string(),
                scope: "read".to_string(),
            })
            .await
            .unwrap();

        let mut req = request("authorization_code", "c2", None);
        req.code = Some("code-1".to_string());

        let response = fx.service.handle(&req).await.unwrap();
        assert!(response.refresh_token.is_some());

        let err = fx.service.handle(&req).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidGrant { .. }));
    }

    #[tokio::test]
    async fn test_exchange_code_wrong_client() {
        let fx = fixture(vec![confidential_app(), public_app()]);
        fx.codes
            .save_authorization_code(&AuthorizationCode {
                code: "code-1".to_string(),
                client_id: "c2".to_string(),
                user_id: "u1".to_string(),
                scope: "read".to_string(),
            })
            .await
            .unwrap();

        // c1 presents a code issued to c2
        let mut req = request("authorization_code", "c1", Some("s1"));
        req.code = Some("code-1".to_string());

        let err = fx.service.handle(&req).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidGrant { .. }));
    }

    #[tokio::test]
    async fn test_password_grant_success() {
        let fx = fixture(vec![confidential_app()]);
        let mut req = request("password", "c1", Some("s1"));
        req.username = Some("alice".to_string());
        req.password = Some("wonder".to_string());
        req.scope = Some("read".to_string());

        let response = fx.service.handle(&req).await.unwrap();
        assert!(response.refresh_token.is_some());
    }

    #[tokio::test]
    async fn test_password_grant_bad_credentials() {
        let fx = fixture(vec![confidential_app()]);
        let mut req = request("password", "c1", Some("s1"));
        req.username = Some("alice".to_string());
        req.password = Some("nope".to_string());

        let err = fx.service.handle(&req).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidGrant { .. }));
        assert_eq!(fx.tokens.count(), 0);
    }

    #[tokio::test]
    async fn test_refresh_rotation_revokes_old_token() {
        let fx = fixture(vec![confidential_app()]);

        let mut req = request("password", "c1", Some("s1"));
        req.username = Some("alice".to_string());
        req.password = Some("wonder".to_string());
        let first = fx.service.handle(&req).await.unwrap();
        let old_refresh = first.refresh_token.unwrap();

        let mut refresh_req = request("refresh_token", "c1", Some("s1"));
        refresh_req.refresh_token = Some(old_refresh.clone());

        let second = fx.service.handle(&refresh_req).await.unwrap();
        let new_refresh = second.refresh_token.unwrap();
        assert_ne!(new_refresh, old_refresh);

        // The old refresh token is dead after rotation.
        let err = fx.service.handle(&refresh_req).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidGrant { .. }));

        // The rotated pair keeps the original subject.
        let stored = fx
            .tokens
            .get_access_token_by_refresh_token("c1", &new_refresh)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.user_id.as_deref(), Some("u1"));
    }

    #[tokio::test]
    async fn test_refresh_expiry_is_after_access_expiry() {
        let fx = fixture(vec![confidential_app()]);
        let mut req = request("password", "c1", Some("s1"));
        req.username = Some("alice".to_string());
        req.password = Some("wonder".to_string());

        let response = fx.service.handle(&req).await.unwrap();
        let stored = fx
            .tokens
            .get_access_token_by_refresh_token("c1", response.refresh_token.as_deref().unwrap())
            .await
            .unwrap()
            .unwrap();

        assert!(stored.refresh_token_expires_on.unwrap() > stored.access_token_expires_on);
    }

    #[test]
    fn test_secrets_match_handles_length_differences() {
        assert!(secrets_match("s1", "s1"));
        assert!(!secrets_match("s1", "s2"));
        assert!(!secrets_match("s1", ""));
        assert!(!secrets_match("s1", "s1-but-longer"));
    }
}
