use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Issuer label stamped on every session token.
pub const ISSUER: &str = "chirpy";

/// Session token claims.
///
/// Registered RFC 7519 claims only; the subject is always a stringified user UUID.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Create claims for a user session.
    ///
    /// # Arguments
    /// * `user_id` - User identifier embedded as subject
    /// * `issued_at` - Issuance instant
    /// * `lifetime` - Time until expiry (zero or negative yields an already expired token)
    ///
    /// # Returns
    /// Claims with sub, iat, exp, and iss set
    pub fn for_user(user_id: Uuid, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        let expires_at = issued_at + lifetime;

        Self {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            iss: ISSUER.to_string(),
        }
    }

    /// Check if the token is expired.
    ///
    /// A token is expired from the second its `exp` is reached.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    /// Parse the subject as a user identifier.
    pub fn subject(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}
