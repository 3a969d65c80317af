//! Core business logic for the authentication system.
//!
//! `AuthService` drives the session lifecycle: register creates a user and
//! its empty session as a pair, login issues both tokens, refresh renews
//! only the access token, logout clears both. Token writes always go
//! through explicit store updates on the specific session record.

use crate::auth::models::*;
use crate::config::Config;
use crate::database::models::{CreateUser, Session, SessionChanges};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::session_repository::SessionRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::{SessionStore, UserDirectory};
use crate::utils::jwt::TokenCodec;
use crate::utils::password::CredentialHasher;
use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

/// Authentication service handling registration, login, token refresh, and
/// logout over a user directory and a session store.
pub struct AuthService<D, S> {
    directory: D,
    sessions: S,
    hasher: CredentialHasher,
    access_tokens: TokenCodec,
    refresh_tokens: TokenCodec,
    access_token_ttl_secs: i64,
}

impl<'a> AuthService<UserRepository<'a>, SessionRepository<'a>> {
    /// Creates an AuthService over the SQLite-backed stores.
    pub fn from_pool(pool: &'a SqlitePool, config: &Config) -> Self {
        Self::new(
            UserRepository::new(pool),
            SessionRepository::new(pool),
            config,
        )
    }
}

impl<D, S> AuthService<D, S>
where
    D: UserDirectory + Sync,
    S: SessionStore + Sync,
{
    /// Creates a new AuthService instance over the given stores.
    pub fn new(directory: D, sessions: S, config: &Config) -> Self {
        AuthService {
            directory,
            sessions,
            hasher: CredentialHasher::new(),
            access_tokens: TokenCodec::new(
                &config.access_token_secret,
                config.access_token_ttl_secs,
            ),
            refresh_tokens: TokenCodec::new(
                &config.refresh_token_secret,
                config.refresh_token_ttl_secs,
            ),
            access_token_ttl_secs: config.access_token_ttl_secs,
        }
    }

    /// Registers a new user and creates its paired session with both
    /// tokens empty.
    ///
    /// The pair must never exist half-created: if the session insert
    /// fails, the freshly created user is deleted again before the error
    /// is returned.
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<RegisterResponse> {
        request.validate().map_err(ServiceError::from)?;

        if self
            .directory
            .find_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(ServiceError::conflict("User", &request.email));
        }

        let password_hash = self.hasher.hash(&request.password)?;

        let user = self
            .directory
            .create(CreateUser {
                id: Uuid::now_v7().to_string(),
                firstname: request.firstname,
                lastname: request.lastname,
                email: request.email,
                password_hash,
            })
            .await?;

        let session = match self.sessions.create(&user.id, &user.firstname).await {
            Ok(session) => session,
            Err(e) => {
                // Compensate so the user never exists without a session
                if let Err(cleanup) = self.directory.delete(&user.id).await {
                    tracing::error!(
                        "Failed to roll back user {} after session creation error: {}",
                        user.id,
                        cleanup
                    );
                }
                return Err(e.into());
            }
        };

        tracing::info!("Registered user {}", user.id);

        Ok(RegisterResponse {
            user: user.into(),
            session,
        })
    }

    /// Authenticates a user and issues a fresh access and refresh token,
    /// both with the user id as subject.
    ///
    /// # Errors
    /// `NotFound` for an unknown email, `AuthenticationFailed` for a wrong
    /// password. The HTTP layer renders both identically so callers cannot
    /// probe which emails are registered.
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        request.validate().map_err(ServiceError::from)?;

        let user = self
            .directory
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", &request.email))?;

        if !self
            .hasher
            .verify(&request.password, &user.password_hash)?
        {
            return Err(ServiceError::AuthenticationFailed);
        }

        let access_token = self.access_tokens.issue(&user.id)?;
        let refresh_token = self.refresh_tokens.issue(&user.id)?;

        // Both tokens land on the session in one atomic update
        let session = self
            .sessions
            .update(
                &user.id,
                SessionChanges {
                    firstname: None,
                    access_token: Some(access_token),
                    refresh_token: Some(refresh_token),
                },
            )
            .await?
            .ok_or_else(|| ServiceError::not_found("Session", &user.id))?;

        tracing::info!("User {} logged in", user.id);

        Ok(LoginResponse {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            user: user.into(),
            expires_in: self.access_token_ttl_secs,
        })
    }

    /// Renews the access token on a session after verifying its stored
    /// refresh token. The refresh token itself is not rotated.
    ///
    /// Note the caller authorizes this call with a bare user id and never
    /// presents the refresh token; the token checked is the one already on
    /// the session. This mirrors the system this one replaces and is a
    /// known weakness of its refresh contract.
    pub async fn refresh(&self, user_id: &str) -> ServiceResult<Session> {
        let session = self
            .sessions
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Session", user_id))?;

        if session.refresh_token.is_empty() {
            return Err(ServiceError::token_missing(user_id));
        }

        let claims = self.refresh_tokens.verify(&session.refresh_token)?;
        if claims.user_id() != session.user_id {
            return Err(ServiceError::token_invalid(
                "Refresh token subject does not match session",
            ));
        }

        let access_token = self.access_tokens.issue(&session.user_id)?;

        // Field-scoped update: only the access token moves
        let session = self
            .sessions
            .update(
                user_id,
                SessionChanges {
                    firstname: None,
                    access_token: Some(access_token),
                    refresh_token: None,
                },
            )
            .await?
            .ok_or_else(|| ServiceError::not_found("Session", user_id))?;

        tracing::info!("Refreshed access token for user {}", user_id);

        Ok(session)
    }

    /// Clears both tokens on the user's session. Idempotent: logging out
    /// an already-logged-out session succeeds silently.
    pub async fn logout(&self, user_id: &str) -> ServiceResult<()> {
        self.directory
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;

        self.sessions
            .update(user_id, SessionChanges::cleared_tokens())
            .await?
            .ok_or_else(|| ServiceError::not_found("Session", user_id))?;

        tracing::info!("User {} logged out", user_id);

        Ok(())
    }

    pub fn access_token_ttl_secs(&self) -> i64 {
        self.access_token_ttl_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::SessionStore;
    use async_trait::async_trait;
    use sqlx::sqlite::SqlitePoolOptions;

    /// Session store whose inserts always fail, for exercising the
    /// register rollback path.
    struct RejectingSessionStore;

    #[async_trait]
    impl SessionStore for RejectingSessionStore {
        async fn create(&self, _user_id: &str, _firstname: &str) -> anyhow::Result<Session> {
            Err(anyhow::anyhow!("sessions table unavailable"))
        }

        async fn find_by_user_id(&self, _user_id: &str) -> anyhow::Result<Option<Session>> {
            Ok(None)
        }

        async fn update(
            &self,
            _user_id: &str,
            _changes: SessionChanges,
        ) -> anyhow::Result<Option<Session>> {
            Ok(None)
        }

        async fn delete(&self, _user_id: &str) -> anyhow::Result<bool> {
            Ok(false)
        }
    }

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    fn test_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_seconds: 3,
            access_token_secret: "access-secret".to_string(),
            refresh_token_secret: "refresh-secret".to_string(),
            access_token_ttl_secs: 120,
            refresh_token_ttl_secs: 600,
            server_port: 0,
        }
    }

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            firstname: "A".to_string(),
            lastname: "B".to_string(),
            email: "a@b.com".to_string(),
            password: "secret1".to_string(),
        }
    }

    fn login_request(password: &str) -> LoginRequest {
        LoginRequest {
            email: "a@b.com".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_creates_user_with_empty_session() {
        let pool = test_pool().await;
        let service = AuthService::from_pool(&pool, &test_config());

        let response = service.register(register_request()).await.unwrap();

        assert_eq!(response.user.email, "a@b.com");
        assert_eq!(response.session.user_id, response.user.id);
        assert_eq!(response.session.firstname, "A");
        assert!(response.session.access_token.is_empty());
        assert!(response.session.refresh_token.is_empty());
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let pool = test_pool().await;
        let service = AuthService::from_pool(&pool, &test_config());

        service.register(register_request()).await.unwrap();

        match service.register(register_request()).await {
            Err(ServiceError::Conflict { .. }) => {}
            other => panic!("expected Conflict, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_register_rolls_back_user_when_session_insert_fails() {
        let pool = test_pool().await;
        let service = AuthService::new(
            UserRepository::new(&pool),
            RejectingSessionStore,
            &test_config(),
        );

        assert!(service.register(register_request()).await.is_err());

        // The user half of the pair must not survive the failed insert
        let user = UserRepository::new(&pool)
            .find_by_email("a@b.com")
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_login_issues_both_tokens_for_user() {
        let pool = test_pool().await;
        let config = test_config();
        let service = AuthService::from_pool(&pool, &config);

        let registered = service.register(register_request()).await.unwrap();
        let response = service.login(login_request("secret1")).await.unwrap();

        assert!(!response.access_token.is_empty());
        assert!(!response.refresh_token.is_empty());
        assert_eq!(response.expires_in, 120);

        // Both tokens verify to the same user id with their own secrets
        let access_codec = TokenCodec::new(&config.access_token_secret, 120);
        let refresh_codec = TokenCodec::new(&config.refresh_token_secret, 600);
        assert_eq!(
            access_codec.verify(&response.access_token).unwrap().sub,
            registered.user.id
        );
        assert_eq!(
            refresh_codec.verify(&response.refresh_token).unwrap().sub,
            registered.user.id
        );

        // The tokens were persisted on the session record
        let session = SessionRepository::new(&pool)
            .find_by_user_id(&registered.user.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(session.access_token, response.access_token);
        assert_eq!(session.refresh_token, response.refresh_token);
    }

    #[tokio::test]
    async fn test_login_failures() {
        let pool = test_pool().await;
        let service = AuthService::from_pool(&pool, &test_config());

        service.register(register_request()).await.unwrap();

        match service.login(login_request("wrong")).await {
            Err(ServiceError::AuthenticationFailed) => {}
            other => panic!("expected AuthenticationFailed, got {:?}", other.map(|_| ())),
        }

        let unknown = LoginRequest {
            email: "nobody@b.com".to_string(),
            password: "secret1".to_string(),
        };
        match service.login(unknown).await {
            Err(ServiceError::NotFound { .. }) => {}
            other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_refresh_replaces_access_token_only() {
        let pool = test_pool().await;
        let service = AuthService::from_pool(&pool, &test_config());

        let registered = service.register(register_request()).await.unwrap();
        let login = service.login(login_request("secret1")).await.unwrap();

        // A token issued in the same second would be byte-identical
        tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

        let session = service.refresh(&registered.user.id).await.unwrap();

        assert_ne!(session.access_token, login.access_token);
        assert_eq!(session.refresh_token, login.refresh_token);
    }

    #[tokio::test]
    async fn test_refresh_without_login_is_token_missing() {
        let pool = test_pool().await;
        let service = AuthService::from_pool(&pool, &test_config());

        let registered = service.register(register_request()).await.unwrap();

        match service.refresh(&registered.user.id).await {
            Err(ServiceError::TokenMissing { .. }) => {}
            other => panic!("expected TokenMissing, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_refresh_unknown_user_is_not_found() {
        let pool = test_pool().await;
        let service = AuthService::from_pool(&pool, &test_config());

        match service.refresh("no-such-id").await {
            Err(ServiceError::NotFound { .. }) => {}
            other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_logout_clears_tokens_and_is_idempotent() {
        let pool = test_pool().await;
        let service = AuthService::from_pool(&pool, &test_config());

        let registered = service.register(register_request()).await.unwrap();
        service.login(login_request("secret1")).await.unwrap();

        service.logout(&registered.user.id).await.unwrap();

        let session = SessionRepository::new(&pool)
            .find_by_user_id(&registered.user.id)
            .await
            .unwrap()
            .unwrap();
        assert!(session.access_token.is_empty());
        assert!(session.refresh_token.is_empty());

        // Refresh now has no credential to check
        match service.refresh(&registered.user.id).await {
            Err(ServiceError::TokenMissing { .. }) => {}
            other => panic!("expected TokenMissing, got {:?}", other.map(|_| ())),
        }

        // A second logout succeeds silently
        service.logout(&registered.user.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_expired_refresh_token_is_rejected() {
        let pool = test_pool().await;
        let mut config = test_config();
        // Refresh tokens are born expired
        config.refresh_token_ttl_secs = -10;
        let service = AuthService::from_pool(&pool, &config);

        let registered = service.register(register_request()).await.unwrap();
        service.login(login_request("secret1")).await.unwrap();

        match service.refresh(&registered.user.id).await {
            Err(ServiceError::TokenExpired) => {}
            other => panic!("expected TokenExpired, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_tampered_stored_refresh_token_is_invalid() {
        let pool = test_pool().await;
        let service = AuthService::from_pool(&pool, &test_config());

        let registered = service.register(register_request()).await.unwrap();
        service.login(login_request("secret1")).await.unwrap();

        // Overwrite the stored refresh token with one from the wrong secret
        let forged = TokenCodec::new("some-other-secret", 600)
            .issue(&registered.user.id)
            .unwrap();
        SessionRepository::new(&pool)
            .update(
                &registered.user.id,
                SessionChanges {
                    firstname: None,
                    access_token: None,
                    refresh_token: Some(forged),
                },
            )
            .await
            .unwrap();

        match service.refresh(&registered.user.id).await {
            Err(ServiceError::TokenInvalid { .. }) => {}
            other => panic!("expected TokenInvalid, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_login_again_after_logout() {
        let pool = test_pool().await;
        let service = AuthService::from_pool(&pool, &test_config());

        let registered = service.register(register_request()).await.unwrap();
        service.login(login_request("secret1")).await.unwrap();
        service.logout(&registered.user.id).await.unwrap();

        // LoggedOut is not terminal
        let response = service.login(login_request("secret1")).await.unwrap();
        assert!(!response.access_token.is_empty());
        assert!(!response.refresh_token.is_empty());
    }
}
