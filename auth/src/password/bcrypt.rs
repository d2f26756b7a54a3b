use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Provides salted, deliberately slow password hashing (internally uses bcrypt).
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Work factor used for stored passwords.
    pub const DEFAULT_COST: u32 = 14;

    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher using bcrypt with cost factor 14
    pub fn new() -> Self {
        Self {
            cost: Self::DEFAULT_COST,
        }
    }

    /// Create a password hasher with a custom bcrypt cost factor.
    ///
    /// Mainly useful in tests, where the minimum cost (4) keeps hashing fast.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password.
    ///
    /// Uses bcrypt with a random salt. Passwords longer than bcrypt's 72-byte
    /// input limit are rejected instead of being silently truncated.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Modular crypt format hash (includes version, cost, salt, and digest)
    ///
    /// # Errors
    /// * `HashingFailed` - Password too long or cost out of range
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        bcrypt::non_truncating_hash(password, self.cost)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// A wrong password and an unreadable stored hash produce the same error.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored bcrypt hash
    ///
    /// # Errors
    /// * `Mismatch` - Password does not match or hash is malformed
    pub fn verify(&self, password: &str, hash: &str) -> Result<(), PasswordError> {
        match bcrypt::non_truncating_verify(password, hash) {
            Ok(true) => Ok(()),
            Ok(false) | Err(_) => Err(PasswordError::Mismatch),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
