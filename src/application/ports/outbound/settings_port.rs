use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::value_objects::{EncounterSettings, UserId};

/// Per-user encounter table overrides
#[async_trait]
pub trait EncounterSettingsRepositoryPort: Send + Sync {
    /// `None` when the user has never saved settings
    async fn get(&self, user: UserId) -> Result<Option<EncounterSettings>, RepositoryError>;
    async fn save(&self, user: UserId, settings: &EncounterSettings) -> Result<(), RepositoryError>;
    async fn delete(&self, user: UserId) -> Result<(), RepositoryError>;
}
