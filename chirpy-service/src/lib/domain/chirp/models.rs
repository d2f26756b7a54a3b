use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::chirp::errors::ChirpBodyError;
use crate::domain::chirp::errors::ChirpIdError;
use crate::domain::chirp::profanity;
use crate::domain::user::models::UserId;

/// Chirp aggregate root entity.
///
/// A short public post written by a single user.
#[derive(Debug, Clone)]
pub struct Chirp {
    pub id: ChirpId,
    pub user_id: UserId,
    pub body: ChirpBody,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Chirp unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChirpId(pub Uuid);

impl ChirpId {
    /// Generate a new random chirp ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a chirp ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ChirpIdError> {
        Uuid::parse_str(s)
            .map(ChirpId)
            .map_err(|e| ChirpIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ChirpId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ChirpId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for ChirpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Chirp body value object.
///
/// Length is checked on the raw input, then profane words are masked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChirpBody(String);

impl ChirpBody {
    pub const MAX_LENGTH: usize = 140;

    /// Validate and clean a chirp body.
    ///
    /// # Arguments
    /// * `body` - Raw body as submitted by the author
    ///
    /// # Returns
    /// Body with profanity replaced by `****`
    ///
    /// # Errors
    /// * `TooLong` - Body exceeds 140 bytes
    pub fn new(body: &str) -> Result<Self, ChirpBodyError> {
        let length = body.len();
        if length > Self::MAX_LENGTH {
            return Err(ChirpBodyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(profanity::clean(body)))
    }

    /// Wrap a body that was already validated, e.g. one loaded from storage.
    pub fn from_trusted(body: String) -> Self {
        Self(body)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Ordering of chirp listings by creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChirpSort {
    #[default]
    Asc,
    Desc,
}

impl ChirpSort {
    /// Interpret the `sort` query parameter.
    ///
    /// Only the literal `desc` selects descending order; anything else,
    /// including absence, is ascending.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("desc") => ChirpSort::Desc,
            _ => ChirpSort::Asc,
        }
    }
}

/// Command to post a new chirp.
#[derive(Debug)]
pub struct CreateChirpCommand {
    pub user_id: UserId,
    pub body: ChirpBody,
}
