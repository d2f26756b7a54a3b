use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::models::Chirp;
use super::models::ChirpId;
use super::models::ChirpSort;
use super::models::CreateChirpCommand;
use super::ports::ChirpRepository;
use super::ports::ChirpServicePort;
use crate::domain::chirp::errors::ChirpError;
use crate::domain::user::models::UserId;

/// Concrete implementation of ChirpServicePort.
///
/// Enforces authorship on deletion; body validation happens in `ChirpBody`.
pub struct ChirpService<CR>
where
    CR: ChirpRepository,
{
    repository: Arc<CR>,
}

impl<CR> ChirpService<CR>
where
    CR: ChirpRepository,
{
    /// Create a new chirp service.
    ///
    /// # Arguments
    /// * `repository` - Chirp persistence implementation
    pub fn new(repository: Arc<CR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<CR> ChirpServicePort for ChirpService<CR>
where
    CR: ChirpRepository,
{
    async fn create_chirp(&self, command: CreateChirpCommand) -> Result<Chirp, ChirpError> {
        let now = Utc::now();
        let chirp = Chirp {
            id: ChirpId::new(),
            user_id: command.user_id,
            body: command.body,
            created_at: now,
            updated_at: now,
        };

        let saved_chirp = self.repository.create(chirp).await?;
        tracing::debug!(chirp_id = %saved_chirp.id, user_id = %saved_chirp.user_id, "Chirp created");

        Ok(saved_chirp)
    }

    async fn get_chirp(&self, id: &ChirpId) -> Result<Chirp, ChirpError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ChirpError::NotFound(*id))
    }

    async fn list_chirps(
        &self,
        author: Option<UserId>,
        sort: ChirpSort,
    ) -> Result<Vec<Chirp>, ChirpError> {
        self.repository.list(author, sort).await
    }

    async fn delete_chirp(&self, id: &ChirpId, requester: &UserId) -> Result<(), ChirpError> {
        let chirp = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ChirpError::NotFound(*id))?;

        if chirp.user_id != *requester {
            tracing::warn!(chirp_id = %id, requester = %requester, "Refused to delete another user's chirp");
            return Err(ChirpError::Forbidden(*id));
        }

        self.repository.delete(id).await?;
        tracing::info!(chirp_id = %id, "Chirp deleted");

        Ok(())
    }
}
