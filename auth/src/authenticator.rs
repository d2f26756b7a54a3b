use chrono::Duration;
use uuid::Uuid;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::refresh::RefreshTokenError;
use crate::refresh::RefreshTokenIssuer;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds the server-wide signing secret for its whole lifetime; build one at
/// startup and share it behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    refresh_token_issuer: RefreshTokenIssuer,
    access_token_lifetime: Duration,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,

    /// Opaque refresh token (not yet persisted)
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),

    #[error("Refresh token error: {0}")]
    RefreshTokenError(#[from] RefreshTokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `access_token_lifetime` - Lifetime of issued session tokens
    ///
    /// # Returns
    /// Configured Authenticator instance using the default bcrypt cost
    pub fn new(jwt_secret: &[u8], access_token_lifetime: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            refresh_token_issuer: RefreshTokenIssuer::new(),
            access_token_lifetime,
        }
    }

    /// Replace the password hasher (e.g. with a cheaper cost in tests).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    pub fn password_hasher(&self) -> PasswordHasher {
        self.password_hasher
    }

    pub fn access_token_lifetime(&self) -> Duration {
        self.access_token_lifetime
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a session token plus a refresh token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Subject of the issued session token
    ///
    /// # Returns
    /// AuthenticationResult with access and refresh tokens
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or hash unreadable)
    /// * `JwtError` - Token signing failed
    /// * `RefreshTokenError` - Random source unavailable
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: Uuid,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        self.password_hasher
            .verify(password, stored_hash)
            .map_err(|_| AuthenticationError::InvalidCredentials)?;

        let access_token = self.generate_token(user_id)?;
        let refresh_token = self.generate_refresh_token()?;

        Ok(AuthenticationResult {
            access_token,
            refresh_token,
        })
    }

    /// Issue a session token without password verification.
    ///
    /// Used by the refresh flow, where possession of a live refresh token
    /// stands in for the password.
    pub fn generate_token(&self, user_id: Uuid) -> Result<String, JwtError> {
        self.jwt_handler.issue(user_id, self.access_token_lifetime)
    }

    /// Generate a new opaque refresh token.
    pub fn generate_refresh_token(&self) -> Result<String, RefreshTokenError> {
        self.refresh_token_issuer.generate()
    }

    /// Validate a session token and return its subject.
    ///
    /// # Errors
    /// * `JwtError` - Token malformed, expired, or carrying a bad subject
    pub fn validate_token(&self, token: &str) -> Result<Uuid, JwtError> {
        self.jwt_handler.validate(token)
    }
}
