use http::header::AUTHORIZATION;
use http::HeaderMap;
use thiserror::Error;

/// Scheme prefix for session and refresh tokens.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Scheme prefix for webhook API keys.
pub const API_KEY_PREFIX: &str = "ApiKey ";

/// Error type for `Authorization` header parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorizationHeaderError {
    #[error("Missing Authorization header")]
    Missing,

    #[error("Invalid Authorization header format. Expected: {0}<credential>")]
    Malformed(&'static str),
}

/// Extract a bearer token from request headers.
///
/// Only the first `Authorization` value is consulted. The prefix match is
/// exact and case-sensitive; the remainder is returned untrimmed.
///
/// # Errors
/// * `Missing` - No `Authorization` header present
/// * `Malformed` - First value does not start with `"Bearer "` or is not visible ASCII
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthorizationHeaderError> {
    extract_credential(headers, BEARER_PREFIX)
}

/// Extract a webhook API key (`Authorization: ApiKey <key>`) from request headers.
pub fn extract_api_key(headers: &HeaderMap) -> Result<&str, AuthorizationHeaderError> {
    extract_credential(headers, API_KEY_PREFIX)
}

fn extract_credential<'a>(
    headers: &'a HeaderMap,
    prefix: &'static str,
) -> Result<&'a str, AuthorizationHeaderError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthorizationHeaderError::Missing)?;

    value
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix(prefix))
        .ok_or(AuthorizationHeaderError::Malformed(prefix))
}
