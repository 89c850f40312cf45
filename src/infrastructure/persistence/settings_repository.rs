use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::application::ports::outbound::{EncounterSettingsRepositoryPort, RepositoryError};
use crate::domain::value_objects::{EncounterSettings, UserId};

pub struct SqliteEncounterSettingsRepository {
    pool: SqlitePool,
}

impl SqliteEncounterSettingsRepository {
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        // Create table if not exists
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS encounter_settings (
                user_id TEXT PRIMARY KEY,
                settings TEXT NOT NULL,
                updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )
        "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl EncounterSettingsRepositoryPort for SqliteEncounterSettingsRepository {
    async fn get(&self, user: UserId) -> Result<Option<EncounterSettings>, RepositoryError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT settings FROM encounter_settings WHERE user_id = ?")
                .bind(user.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::Database(e.to_string()))?;

        match row {
            Some((json,)) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, user: UserId, settings: &EncounterSettings) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(settings)?;
        sqlx::query(
            "INSERT OR REPLACE INTO encounter_settings (user_id, settings, updated_at) \
             VALUES (?, ?, CURRENT_TIMESTAMP)",
        )
        .bind(user.to_string())
        .bind(json)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(())
    }

    async fn delete(&self, user: UserId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM encounter_settings WHERE user_id = ?")
            .bind(user.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(())
    }
}
