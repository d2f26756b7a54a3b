use async_trait::async_trait;

use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::Chirp;
use crate::domain::chirp::models::ChirpId;
use crate::domain::chirp::models::ChirpSort;
use crate::domain::chirp::models::CreateChirpCommand;
use crate::domain::user::models::UserId;

/// Port for chirp domain service operations.
#[async_trait]
pub trait ChirpServicePort: Send + Sync + 'static {
    /// Post a new chirp on behalf of an authenticated user.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_chirp(&self, command: CreateChirpCommand) -> Result<Chirp, ChirpError>;

    /// Retrieve a single chirp.
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    async fn get_chirp(&self, id: &ChirpId) -> Result<Chirp, ChirpError>;

    /// List chirps ordered by creation time, optionally restricted to one author.
    async fn list_chirps(
        &self,
        author: Option<UserId>,
        sort: ChirpSort,
    ) -> Result<Vec<Chirp>, ChirpError>;

    /// Delete a chirp owned by `requester`.
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    /// * `Forbidden` - Requester is not the author
    async fn delete_chirp(&self, id: &ChirpId, requester: &UserId) -> Result<(), ChirpError>;
}

/// Persistence operations for chirp aggregate.
#[async_trait]
pub trait ChirpRepository: Send + Sync + 'static {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError>;

    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError>;

    /// Fetch chirps in creation order, filtered by author when given.
    async fn list(&self, author: Option<UserId>, sort: ChirpSort)
        -> Result<Vec<Chirp>, ChirpError>;

    /// Remove a chirp.
    ///
    /// # Errors
    /// * `NotFound` - No row was deleted
    async fn delete(&self, id: &ChirpId) -> Result<(), ChirpError>;
}
