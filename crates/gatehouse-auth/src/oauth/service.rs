//! Authorization endpoint service.
//!
//! Implements the `/authorize` step of the authorization code flow:
//! validate the request against the stored registration, mint a
//! single-use code, and build the redirect back to the client.
//!
//! # Security
//!
//! - A request with no trusted redirect target yet (unknown client,
//!   unknown user) is answered inline, never with a redirect.
//! - The requested redirect URI must equal the registered one by exact
//!   string equality. Prefix or host-only matching would reopen the
//!   open-redirect/token-leak hole this check exists to close.
//! - Registration validator failures propagate as server errors and are
//!   never converted into a redirect either.

use std::sync::Arc;

use tracing::debug;

use crate::AuthResult;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::oauth::authorize::{
    AuthorizationRequest, AuthorizationResponse, AuthorizeOutcome, error_redirect_url,
};
use crate::storage::{ClientStorage, CodeStorage, UserStorage};
use crate::token::issuer::TokenIssuer;
use crate::validate;

/// Authorization service for handling OAuth 2.0 authorization requests.
pub struct AuthorizationService {
    /// Client storage for looking up registered applications.
    clients: Arc<dyn ClientStorage>,
    /// Identity storage for resolving the authenticated principal.
    users: Arc<dyn UserStorage>,
    /// Code storage for persisting issued codes.
    codes: Arc<dyn CodeStorage>,
    /// Generator for authorization codes.
    issuer: TokenIssuer,
    /// Engine configuration (login surface URL).
    config: AuthConfig,
}

impl AuthorizationService {
    /// Creates a new authorization service.
    #[must_use]
    pub fn new(
        clients: Arc<dyn ClientStorage>,
        users: Arc<dyn UserStorage>,
        codes: Arc<dyn CodeStorage>,
        issuer: TokenIssuer,
        config: AuthConfig,
    ) -> Self {
        Self {
            clients,
            users,
            codes,
            issuer,
            config,
        }
    }

    /// Processes an authorization request.
    ///
    /// `authenticated_user` is the principal id established by the
    /// out-of-scope session layer; `None` means the caller has not
    /// logged in yet and is deferred to the login surface.
    ///
    /// # Errors
    ///
    /// - `InvalidClient` - unknown client (inline 400, no redirect)
    /// - `InvalidRequest` - unknown user or redirect URI mismatch
    ///   (inline 400, no redirect)
    /// - `Configuration` - corrupt registration data (5xx)
    pub async fn authorize(
        &self,
        request: &AuthorizationRequest,
        authenticated_user: Option<&str>,
    ) -> AuthResult<AuthorizeOutcome> {
        // 1. Unauthenticated callers are deferred, not refused.
        let Some(user_id) = authenticated_user else {
            return Ok(AuthorizeOutcome::Login(self.config.login_url.clone()));
        };

        // 2. Resolve the client. No trusted redirect target exists yet,
        //    so failure is inline.
        let application = self
            .clients
            .get_application(&request.client_id)
            .await?
            .ok_or_else(|| AuthError::invalid_client("Client not found"))?;

        // 3. Registration validators.
        validate::redirect_uri(&application.redirect_uri)?;
        validate::client_type(&application.client_type)?;

        // 4. Resolve the resource owner.
        let user = self
            .users
            .get_user(user_id)
            .await?
            .ok_or_else(|| AuthError::invalid_request("User not found"))?;

        // 5. Exact string equality against the registered URI.
        if application.redirect_uri != request.redirect_uri {
            return Err(AuthError::invalid_request("Redirect URI mismatch"));
        }

        // 6/7. Issue a code for response_type=code, otherwise report
        // unsupported_response_type on the (now trusted) redirect URI.
        if request.response_type == "code" {
            let code =
                self.issuer
                    .authorization_code(&application.client_id, &user.id, &request.scope);
            self.codes.save_authorization_code(&code).await?;

            debug!(client_id = %application.client_id, "Issued authorization code");

            let url =
                AuthorizationResponse::new(code.code, request.state.clone())
                    .to_redirect_url(&application.redirect_uri)
                    .map_err(|e| {
                        AuthError::internal(format!("Failed to build redirect URL: {e}"))
                    })?;
            Ok(AuthorizeOutcome::Redirect(url))
        } else {
            let url = error_redirect_url(&application.redirect_uri, "unsupported_response_type")
                .map_err(|e| AuthError::internal(format!("Failed to build redirect URL: {e}")))?;
            Ok(AuthorizeOutcome::Redirect(url))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    use async_trait::async_trait;

    use crate::config::TokenConfig;
    use crate::types::{Application, AuthorizationCode, User};

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
        users: HashMap<String, User>,
    }

    #[async_trait]
    impl UserStorage for MockUserStorage {
        async fn get_user(&self, user_id: &str) -> AuthResult<Option<User>> {
            Ok(self.users.get(user_id).cloned())
        }

        async fn verify_username_and_password(
            &self,
            _username: &str,
            _password: &str,
        ) -> AuthResult<Option<String>> {
            Ok(None)
        }
    }

    #[derive(Default)]
    struct MockCodeStorage {
        codes: RwLock<Vec<AuthorizationCode>>,
    }

    #[async_trait]
    impl CodeStorage for MockCodeStorage {
        async fn save_authorization_code(&self, code: &AuthorizationCode) -> AuthResult<()> {
            self.codes.write().unwrap().push(code.clone());
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
                .iter()
                .find(|c| c.client_id == client_id && c.code == code)
                .cloned())
        }

        async fn revoke_authorization_code(&self, code: &str) -> AuthResult<()> {
            self.codes.write().unwrap().retain(|c| c.code != code);
            Ok(())
        }
    }

    fn public_app() -> Application {
        Application {
            name: "Spa".to_string(),
            website: String::new(),
            logo: String::new(),
            redirect_uri: "https://a.example/cb".to_string(),
            owner_user_id: "dev-1".to_string(),
            client_id: "c1".to_string(),
            client_secret: None,
            client_type: "public".to_string(),
        }
    }

    struct Fixture {
        service: AuthorizationService,
        codes: Arc<MockCodeStorage>,
    }

    fn fixture(apps: Vec<Application>) -> Fixture {
        let clients = Arc::new(MockClientStorage {
            apps: apps.into_iter().map(|a| (a.client_id.clone(), a)).collect(),
        });
        let users = Arc::new(MockUserStorage {
            users: HashMap::from([("u1".to_string(), User::new("u1"))]),
        });
        let codes = Arc::new(MockCodeStorage::default());

        let service = AuthorizationService::new(
            clients,
            users,
            codes.clone(),
            TokenIssuer::new(TokenConfig::default()),
            AuthConfig::default(),
        );

        Fixture { service, codes }
    }

    fn request(response_type: &str, redirect_uri: &str, state: Option<&str>) -> AuthorizationRequest {
        AuthorizationRequest {
            response_type: response_type.to_string(),
            client_id: "c1".to_string(),
            redirect_uri: redirect_uri.to_string(),
            scope: "read".to_string(),
            state: state.map(ToOwned::to_owned),
        }
    }

    #[tokio::test]
    async fn test_unauthenticated_caller_is_deferred_to_login() {
        let fx = fixture(vec![public_app()]);
        let outcome = fx
            .service
            .authorize(&request("code", "https://a.example/cb", None), None)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            AuthorizeOutcome::Login("http://localhost:3000/login".to_string())
        );
    }

    #[tokio::test]
    async fn test_code_flow_redirects_with_code_and_state() {
        let fx = fixture(vec![public_app()]);
        let outcome = fx
            .service
            .authorize(
                &request("code", "https://a.example/cb", Some("xyz")),
                Some("u1"),
            )
            .await
            .unwrap();

        let AuthorizeOutcome::Redirect(url) = outcome else {
            panic!("expected redirect");
        };
        assert!(url.starts_with("https://a.example/cb?"));
        assert!(url.contains("state=xyz"));

        let codes = fx.codes.codes.read().unwrap();
        assert_eq!(codes.len(), 1);
        assert_eq!(codes[0].client_id, "c1");
        assert_eq!(codes[0].user_id, "u1");
        assert_eq!(codes[0].scope, "read");
        assert!(url.contains(&format!("code={}", codes[0].code)));
    }

    #[tokio::test]
    async fn test_state_absence_round_trips() {
        let fx = fixture(vec![public_app()]);
        let outcome = fx
            .service
            .authorize(&request("code", "https://a.example/cb", None), Some("u1"))
            .await
            .unwrap();

        let AuthorizeOutcome::Redirect(url) = outcome else {
            panic!("expected redirect");
        };
        assert!(!url.contains("state="));
    }

    #[tokio::test]
    async fn test_unknown_client_fails_inline() {
        let fx = fixture(vec![]);
        let err = fx
            .service
            .authorize(&request("code", "https://a.example/cb", None), Some("u1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidClient { .. }));
    }

    #[tokio::test]
    async fn test_unknown_user_fails_inline() {
        let fx = fixture(vec![public_app()]);
        let err = fx
            .service
            .authorize(&request("code", "https://a.example/cb", None), Some("ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidRequest { .. }));
    }

    #[tokio::test]
    async fn test_redirect_uri_mismatch_is_inline_not_redirect() {
        let fx = fixture(vec![public_app()]);
        let err = fx
            .service
            .authorize(&request("code", "https://b.example/cb", None), Some("u1"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidRequest { .. }));
        assert!(fx.codes.codes.read().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_redirect_uri_is_server_error() {
        let mut app = public_app();
        app.redirect_uri = "not-a-uri".to_string();
        let fx = fixture(vec![app]);

        let err = fx
            .service
            .authorize(&request("code", "not-a-uri", None), Some("u1"))
            .await
            .unwrap_err();
        assert!(err.is_server_error());
    }

    #[tokio::test]
    async fn test_unknown_response_type_redirects_with_error() {
        let fx = fixture(vec![public_app()]);
        let outcome = fx
            .service
            .authorize(&request("token", "https://a.example/cb", None), Some("u1"))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            AuthorizeOutcome::Redirect(
                "https://a.example/cb?error=unsupported_response_type".to_string()
            )
        );
        assert!(fx.codes.codes.read().unwrap().is_empty());
    }
}
