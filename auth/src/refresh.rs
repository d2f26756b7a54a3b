use thiserror::Error;

/// Number of random bytes in a refresh token (hex-encoded to twice as many characters).
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Error type for refresh token generation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshTokenError {
    #[error("Secure random source unavailable: {0}")]
    EntropyUnavailable(String),
}

/// Generator for opaque refresh tokens.
///
/// Tokens carry no identity or expiry; both are attached by whoever persists them.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefreshTokenIssuer;

impl RefreshTokenIssuer {
    pub fn new() -> Self {
        Self
    }

    /// Generate a new refresh token.
    ///
    /// Draws 32 bytes from the operating system CSPRNG and hex-encodes them.
    ///
    /// # Returns
    /// 64-character lowercase hex string
    ///
    /// # Errors
    /// * `EntropyUnavailable` - The OS random source failed; nothing is returned
    pub fn generate(&self) -> Result<String, RefreshTokenError> {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        getrandom::getrandom(&mut bytes)
            .map_err(|e| RefreshTokenError::EntropyUnavailable(e.to_string()))?;

        Ok(hex::encode(bytes))
    }
}
