//! Authentication primitives for the Chirpy service
//!
//! Provides the credential building blocks used by the HTTP layer:
//! - Password hashing (bcrypt, cost 14)
//! - Session tokens (HS256 JWT bound to a user UUID)
//! - Opaque refresh tokens (32 CSPRNG bytes, hex-encoded)
//! - `Authorization` header parsing
//! - Authentication coordination
//!
//! None of these hold mutable state; the signing secret is passed in at
//! construction and never read from the environment here.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_cost(4);
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! assert!(hasher.verify("other_password", &hash).is_err());
//! ```
//!
//! ## Session Tokens
//! ```
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let user_id = Uuid::new_v4();
//! let token = auth::jwt::issue(user_id, b"secret", Duration::minutes(60)).unwrap();
//! assert_eq!(auth::jwt::validate(&token, b"secret").unwrap(), user_id);
//! assert!(auth::jwt::validate(&token, b"other").is_err());
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use http::header::AUTHORIZATION;
//! use http::HeaderMap;
//!
//! let mut headers = HeaderMap::new();
//! headers.insert(AUTHORIZATION, "Bearer abc123".parse().unwrap());
//! assert_eq!(auth::extract_bearer_token(&headers).unwrap(), "abc123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, PasswordHasher};
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(60))
//!     .with_password_hasher(PasswordHasher::with_cost(4));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue tokens
//! let user_id = Uuid::new_v4();
//! let result = auth.authenticate("password123", &hash, user_id).unwrap();
//! assert_eq!(result.refresh_token.len(), 64);
//!
//! // Validate token
//! assert_eq!(auth.validate_token(&result.access_token).unwrap(), user_id);
//! ```

pub mod authenticator;
pub mod header;
pub mod jwt;
pub mod password;
pub mod refresh;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use header::extract_api_key;
pub use header::extract_bearer_token;
pub use header::AuthorizationHeaderError;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::RefreshTokenError;
pub use refresh::RefreshTokenIssuer;
