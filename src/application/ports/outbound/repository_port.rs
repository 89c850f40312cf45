//! Repository ports - Interfaces for encounter persistence
//!
//! These traits define the contracts that infrastructure repositories must implement.
//! Application services depend on these traits, not concrete implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::aggregates::EncounterAggregateRecord;
use crate::domain::value_objects::{EncounterBatchId, UserId};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// A persisted batch with its identity and owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEncounterBatch {
    pub id: EncounterBatchId,
    pub owner_id: UserId,
    #[serde(flatten)]
    pub record: EncounterAggregateRecord,
}

// =============================================================================
// Encounter Repository Port
// =============================================================================

/// Repository port for encounter batch records
#[async_trait]
pub trait EncounterRepositoryPort: Send + Sync {
    /// Store a batch and link it to its owner in one transaction
    async fn save_batch(
        &self,
        owner: UserId,
        record: &EncounterAggregateRecord,
    ) -> Result<EncounterBatchId, RepositoryError>;

    /// Get a batch by ID
    async fn get(
        &self,
        id: EncounterBatchId,
    ) -> Result<Option<StoredEncounterBatch>, RepositoryError>;

    /// List an owner's batches, newest first
    async fn list_by_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<StoredEncounterBatch>, RepositoryError>;
}
