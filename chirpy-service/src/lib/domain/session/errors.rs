use thiserror::Error;

use crate::domain::user::errors::UserError;

/// Error type for login, refresh and revoke operations
#[derive(Debug, Error)]
pub enum SessionError {
    /// Unknown email or wrong password. The two are not distinguished.
    #[error("Incorrect email or password")]
    InvalidCredentials,

    /// Refresh token unknown, expired or revoked.
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error("User error: {0}")]
    User(#[from] UserError),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for SessionError {
    fn from(err: anyhow::Error) -> Self {
        SessionError::Unknown(err.to_string())
    }
}

impl From<auth::AuthenticationError> for SessionError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidCredentials => SessionError::InvalidCredentials,
            other => SessionError::TokenIssuance(other.to_string()),
        }
    }
}

impl From<auth::JwtError> for SessionError {
    fn from(err: auth::JwtError) -> Self {
        SessionError::TokenIssuance(err.to_string())
    }
}
