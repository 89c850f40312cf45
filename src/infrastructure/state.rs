//! Shared application state

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::application::ports::inbound::GenerateEncountersUseCase;
use crate::application::services::{EncounterGenerationServiceImpl, EncounterSettingsService};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::{
    self, MonsterCatalog, SqliteEncounterRepository, SqliteEncounterSettingsRepository,
};

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub catalog: MonsterCatalog,
    // Application services
    pub generation_service: Arc<dyn GenerateEncountersUseCase>,
    pub settings_service: Arc<EncounterSettingsService>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let pool = persistence::connect(&config.database_url).await?;
        let catalog = MonsterCatalog::load(&config.monster_data_path).await?;
        Self::from_parts(config, pool, catalog).await
    }

    /// Wire services over an open pool and a loaded catalog
    pub async fn from_parts(
        config: AppConfig,
        pool: SqlitePool,
        catalog: MonsterCatalog,
    ) -> Result<Self> {
        let encounters = SqliteEncounterRepository::new(pool.clone())
            .await
            .context("Failed to initialize encounter tables")?;
        let settings = SqliteEncounterSettingsRepository::new(pool)
            .await
            .context("Failed to initialize settings table")?;

        let settings_service = Arc::new(EncounterSettingsService::new(Arc::new(settings)));
        let generation_service = EncounterGenerationServiceImpl::new(
            Arc::new(encounters),
            settings_service.clone(),
            catalog.monsters(),
        )
        .with_default_seed(config.rng_seed);

        Ok(Self {
            config,
            catalog,
            generation_service: Arc::new(generation_service),
            settings_service,
        })
    }
}
