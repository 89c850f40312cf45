//! Use case ports - What the HTTP layer may ask of the application

use async_trait::async_trait;

use crate::application::dto::{GenerateEncounterInput, GenerateEncounterResponse};
use crate::application::ports::outbound::{RepositoryError, StoredEncounterBatch};
use crate::domain::services::EncounterDistribution;
use crate::domain::value_objects::{
    EncounterBatchId, EncounterInstanceOptions, EncounterSettings, UserId,
};

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Per-call knobs that sit outside the generation input itself
#[derive(Debug, Clone, Default)]
pub struct GenerationContext {
    /// Owner to persist the batch for
    pub user_id: Option<UserId>,
    /// Replaces the owner's stored settings for this call
    pub settings: Option<EncounterSettings>,
    /// Seed for the random source
    pub seed: Option<u64>,
}

/// Encounter generation use cases
#[async_trait]
pub trait GenerateEncountersUseCase: Send + Sync {
    /// Generate a batch; saved when the context names a user, inline otherwise
    async fn generate(
        &self,
        input: GenerateEncounterInput,
        context: GenerationContext,
    ) -> Result<GenerateEncounterResponse, GenerationError>;

    /// Occurrence distribution for a batch without generating it
    async fn preview(
        &self,
        instances: Vec<EncounterInstanceOptions>,
        context: GenerationContext,
    ) -> Result<EncounterDistribution, GenerationError>;

    async fn get_batch(
        &self,
        id: EncounterBatchId,
    ) -> Result<Option<StoredEncounterBatch>, GenerationError>;

    async fn list_batches(&self, owner: UserId)
        -> Result<Vec<StoredEncounterBatch>, GenerationError>;
}
