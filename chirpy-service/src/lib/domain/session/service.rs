use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Duration;
use chrono::Utc;

use super::models::LoginCommand;
use super::models::RefreshToken;
use super::models::Session;
use super::ports::RefreshTokenRepository;
use super::ports::SessionServicePort;
use crate::domain::session::errors::SessionError;
use crate::domain::user::ports::UserRepository;

/// Concrete implementation of SessionServicePort.
///
/// Session tokens are stateless JWTs; refresh tokens are persisted with an
/// expiry and an optional revocation time.
pub struct SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    user_repository: Arc<UR>,
    refresh_token_repository: Arc<RR>,
    authenticator: Arc<Authenticator>,
    refresh_token_lifetime: Duration,
}

impl<UR, RR> SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    /// Create a new session service.
    ///
    /// # Arguments
    /// * `user_repository` - Source of stored password hashes
    /// * `refresh_token_repository` - Refresh token persistence
    /// * `authenticator` - Password verification and token issuance
    /// * `refresh_token_lifetime` - Validity window of newly issued refresh tokens
    pub fn new(
        user_repository: Arc<UR>,
        refresh_token_repository: Arc<RR>,
        authenticator: Arc<Authenticator>,
        refresh_token_lifetime: Duration,
    ) -> Self {
        Self {
            user_repository,
            refresh_token_repository,
            authenticator,
            refresh_token_lifetime,
        }
    }
}

#[async_trait]
impl<UR, RR> SessionServicePort for SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError> {
        let user = self
            .user_repository
            .find_by_email(&command.email)
            .await?
            .ok_or(SessionError::InvalidCredentials)?;

        // bcrypt verification runs on the blocking pool
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash = user.password_hash.clone();
        let user_id = user.id.0;
        let tokens = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &password_hash, user_id)
        })
        .await
        .map_err(|e| SessionError::Unknown(e.to_string()))?
        .inspect_err(|_| tracing::debug!(user_id = %user.id, "Rejected login"))?;

        let now = Utc::now();
        let refresh_token = RefreshToken {
            token: tokens.refresh_token,
            user_id: user.id,
            created_at: now,
            updated_at: now,
            expires_at: now + self.refresh_token_lifetime,
            revoked_at: None,
        };
        let refresh_token = self.refresh_token_repository.create(refresh_token).await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(Session {
            user,
            access_token: tokens.access_token,
            refresh_token: refresh_token.token,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, SessionError> {
        let stored = self
            .refresh_token_repository
            .find_by_token(refresh_token)
            .await?
            .ok_or(SessionError::InvalidRefreshToken)?;

        if !stored.is_usable(Utc::now()) {
            tracing::debug!(user_id = %stored.user_id, "Refresh token expired or revoked");
            return Err(SessionError::InvalidRefreshToken);
        }

        let access_token = self.authenticator.generate_token(stored.user_id.0)?;

        Ok(access_token)
    }

    async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError> {
        let revoked = self
            .refresh_token_repository
            .revoke(refresh_token, Utc::now())
            .await?;

        if !revoked {
            return Err(SessionError::InvalidRefreshToken);
        }

        tracing::info!("Refresh token revoked");
        Ok(())
    }
}
