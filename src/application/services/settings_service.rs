use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::application::ports::outbound::{EncounterSettingsRepositoryPort, RepositoryError};
use crate::domain::services::EncounterTables;
use crate::domain::value_objects::{EncounterSettings, UserId};

pub struct EncounterSettingsService {
    repository: Arc<dyn EncounterSettingsRepositoryPort>,
    defaults: EncounterTables,
    cache: RwLock<HashMap<UserId, EncounterSettings>>,
}

impl EncounterSettingsService {
    pub fn new(repository: Arc<dyn EncounterSettingsRepositoryPort>) -> Self {
        Self {
            repository,
            defaults: EncounterTables::default(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The user's stored overrides. Empty when nothing was saved.
    ///
    /// Only users with stored overrides are cached.
    pub async fn get(&self, user: UserId) -> Result<EncounterSettings, RepositoryError> {
        let cache = self.cache.read().await;
        if let Some(settings) = cache.get(&user) {
            return Ok(settings.clone());
        }
        drop(cache);

        // Load from DB
        match self.repository.get(user).await? {
            Some(settings) => {
                self.cache.write().await.insert(user, settings.clone());
                Ok(settings)
            }
            None => Ok(EncounterSettings::default()),
        }
    }

    /// Tables a generation call for this user runs against
    pub async fn tables_for(&self, user: UserId) -> Result<EncounterTables, RepositoryError> {
        let settings = self.get(user).await?;
        Ok(self.defaults.with_settings(&settings))
    }

    /// Every table with the user's overrides applied
    pub async fn effective(&self, user: UserId) -> Result<EncounterSettings, RepositoryError> {
        Ok(self.tables_for(user).await?.as_settings())
    }

    /// Tables for an explicit override, ignoring anything stored
    pub fn tables_with(&self, settings: &EncounterSettings) -> EncounterTables {
        self.defaults.with_settings(settings)
    }

    pub fn defaults(&self) -> &EncounterTables {
        &self.defaults
    }

    /// Store overrides and refresh the cache
    #[instrument(skip(self, settings))]
    pub async fn update(
        &self,
        user: UserId,
        settings: EncounterSettings,
    ) -> Result<(), RepositoryError> {
        self.repository.save(user, &settings).await?;
        self.cache.write().await.insert(user, settings);
        debug!("Encounter settings updated");
        Ok(())
    }

    /// Drop stored overrides and return the defaults
    #[instrument(skip(self))]
    pub async fn reset(&self, user: UserId) -> Result<EncounterSettings, RepositoryError> {
        self.repository.delete(user).await?;
        self.cache.write().await.remove(&user);
        debug!("Encounter settings reset");
        Ok(self.defaults.as_settings())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::domain::value_objects::{both_times, DifficultyLevel, TimeOfDay};

    /// In-memory settings store that counts reads
    #[derive(Default)]
    pub(crate) struct MemorySettingsRepository {
        stored: Mutex<HashMap<UserId, EncounterSettings>>,
        reads: AtomicUsize,
    }

    #[async_trait]
    impl EncounterSettingsRepositoryPort for MemorySettingsRepository {
        async fn get(&self, user: UserId) -> Result<Option<EncounterSettings>, RepositoryError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(self.stored.lock().unwrap().get(&user).cloned())
        }

        async fn save(
            &self,
            user: UserId,
            settings: &EncounterSettings,
        ) -> Result<(), RepositoryError> {
            self.stored.lock().unwrap().insert(user, settings.clone());
            Ok(())
        }

        async fn delete(&self, user: UserId) -> Result<(), RepositoryError> {
            self.stored.lock().unwrap().remove(&user);
            Ok(())
        }
    }

    fn only_trivial() -> EncounterSettings {
        EncounterSettings {
            difficulty_probabilities: Some(
                [(DifficultyLevel::Trivial, both_times(1.0))].into_iter().collect(),
            ),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_stored_settings_are_cached() {
        let repo = Arc::new(MemorySettingsRepository::default());
        let user = UserId::new();
        repo.stored.lock().unwrap().insert(user, only_trivial());
        let service = EncounterSettingsService::new(repo.clone());

        assert_eq!(service.get(user).await.unwrap(), only_trivial());
        assert_eq!(service.get(user).await.unwrap(), only_trivial());
        assert_eq!(repo.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_users_are_not_cached() {
        let repo = Arc::new(MemorySettingsRepository::default());
        let service = EncounterSettingsService::new(repo.clone());

        for _ in 0..5 {
            assert!(service.get(UserId::new()).await.unwrap().is_empty());
        }
        assert!(service.cache.read().await.is_empty());
        assert_eq!(repo.reads.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_update_then_tables_apply_override() {
        let service = EncounterSettingsService::new(Arc::new(MemorySettingsRepository::default()));
        let user = UserId::new();

        service.update(user, only_trivial()).await.unwrap();
        let tables = service.tables_for(user).await.unwrap();
        assert_eq!(
            tables.difficulty_weights(TimeOfDay::Day),
            vec![(DifficultyLevel::Trivial, 1.0)]
        );
        // untouched tables keep their defaults
        assert_eq!(tables.road_modifiers, service.defaults().road_modifiers);
    }

    #[tokio::test]
    async fn test_reset_returns_defaults() {
        let service = EncounterSettingsService::new(Arc::new(MemorySettingsRepository::default()));
        let user = UserId::new();

        service.update(user, only_trivial()).await.unwrap();
        let reset = service.reset(user).await.unwrap();
        assert_eq!(reset, EncounterTables::default().as_settings());
        assert!(service.get(user).await.unwrap().is_empty());
    }
}
