use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::Claims;
use super::errors::JwtError;

/// JWT token handler for issuing and validating session tokens.
///
/// Bound to exactly one signing secret; there is no key rotation. Uses HS256
/// (HMAC with SHA-256).
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a session token for a user.
    ///
    /// # Arguments
    /// * `user_id` - Subject of the token
    /// * `lifetime` - Time until the token expires
    ///
    /// # Returns
    /// Signed JWT string
    ///
    /// # Errors
    /// * `SigningFailed` - Claims could not be serialized or signed
    pub fn issue(&self, user_id: Uuid, lifetime: Duration) -> Result<String, JwtError> {
        let claims = Claims::for_user(user_id, Utc::now(), lifetime);
        self.encode(&claims)
    }

    /// Validate a session token and return its subject.
    ///
    /// The signature is checked first, then expiry against the current clock
    /// (no leeway), then the subject.
    ///
    /// # Arguments
    /// * `token` - JWT string to validate
    ///
    /// # Returns
    /// User identifier carried in the `sub` claim
    ///
    /// # Errors
    /// * `Malformed` - Token structure, claims, or signature are invalid
    /// * `Expired` - Current time is at or after `exp`
    /// * `BadSubject` - `sub` is not a valid UUID
    pub fn validate(&self, token: &str) -> Result<Uuid, JwtError> {
        let claims = self.decode(token)?;

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::Expired);
        }

        claims
            .subject()
            .map_err(|_| JwtError::BadSubject(claims.sub.clone()))
    }

    fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))
    }

    fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked by the caller with an exact, leeway-free comparison
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| JwtError::Malformed(e.to_string()))
    }
}

/// Issue a session token signed with `secret`.
pub fn issue(user_id: Uuid, secret: &[u8], lifetime: Duration) -> Result<String, JwtError> {
    JwtHandler::new(secret).issue(user_id, lifetime)
}

/// Validate a session token against `secret` and return its subject.
pub fn validate(token: &str, secret: &[u8]) -> Result<Uuid, JwtError> {
    JwtHandler::new(secret).validate(token)
}
