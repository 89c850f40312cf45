use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::application::ports::outbound::{
    EncounterRepositoryPort, RepositoryError, StoredEncounterBatch,
};
use crate::domain::aggregates::EncounterAggregateRecord;
use crate::domain::value_objects::{EncounterBatchId, UserId};

pub struct SqliteEncounterRepository {
    pool: SqlitePool,
}

impl SqliteEncounterRepository {
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        // Create tables if not exists
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS encounter_batches (
                id TEXT PRIMARY KEY,
                name TEXT,
                created_at TEXT NOT NULL,
                encounter_count INTEGER NOT NULL,
                payload TEXT NOT NULL
            )
        "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS encounter_owners (
                batch_id TEXT PRIMARY KEY REFERENCES encounter_batches(id),
                user_id TEXT NOT NULL
            )
        "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_encounter_owners_user ON encounter_owners (user_id)",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

fn database(err: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(err.to_string())
}

fn row_to_batch(
    (id, owner, payload): (String, String, String),
) -> Result<StoredEncounterBatch, RepositoryError> {
    let id: EncounterBatchId = id
        .parse()
        .map_err(|e| RepositoryError::Serialization(format!("Bad batch id {}: {}", id, e)))?;
    let owner_id: UserId = owner
        .parse()
        .map_err(|e| RepositoryError::Serialization(format!("Bad owner id {}: {}", owner, e)))?;
    let record: EncounterAggregateRecord = serde_json::from_str(&payload)?;
    Ok(StoredEncounterBatch {
        id,
        owner_id,
        record,
    })
}

#[async_trait]
impl EncounterRepositoryPort for SqliteEncounterRepository {
    async fn save_batch(
        &self,
        owner: UserId,
        record: &EncounterAggregateRecord,
    ) -> Result<EncounterBatchId, RepositoryError> {
        let id = EncounterBatchId::new();
        let payload = serde_json::to_string(record)?;

        let mut tx = self.pool.begin().await.map_err(database)?;
        sqlx::query(
            "INSERT INTO encounter_batches (id, name, created_at, encounter_count, payload) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(record.name())
        .bind(record.created_at().to_rfc3339())
        .bind(i64::from(record.encounter_count()))
        .bind(payload)
        .execute(&mut *tx)
        .await
        .map_err(database)?;

        sqlx::query("INSERT INTO encounter_owners (batch_id, user_id) VALUES (?, ?)")
            .bind(id.to_string())
            .bind(owner.to_string())
            .execute(&mut *tx)
            .await
            .map_err(database)?;
        tx.commit().await.map_err(database)?;

        Ok(id)
    }

    async fn get(
        &self,
        id: EncounterBatchId,
    ) -> Result<Option<StoredEncounterBatch>, RepositoryError> {
        let row: Option<(String, String, String)> = sqlx::query_as(
            "SELECT b.id, o.user_id, b.payload FROM encounter_batches b \
             JOIN encounter_owners o ON o.batch_id = b.id WHERE b.id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(database)?;

        row.map(row_to_batch).transpose()
    }

    async fn list_by_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<StoredEncounterBatch>, RepositoryError> {
        let rows: Vec<(String, String, String)> = sqlx::query_as(
            "SELECT b.id, o.user_id, b.payload FROM encounter_batches b \
             JOIN encounter_owners o ON o.batch_id = b.id \
             WHERE o.user_id = ? ORDER BY b.created_at DESC",
        )
        .bind(owner.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(database)?;

        rows.into_iter().map(row_to_batch).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    use crate::domain::entities::GeneratedEncounter;
    use crate::domain::value_objects::{Biome, DifficultyLevel, EncounterInstanceOptions};
    use crate::infrastructure::persistence::memory_pool;

    fn record(name: &str, minutes_ago: i64) -> EncounterAggregateRecord {
        let mut record =
            EncounterAggregateRecord::new(Some(name), Utc::now() - Duration::minutes(minutes_ago));
        record.record_instance(
            EncounterInstanceOptions::new(Biome::Tundra).display_options(),
            vec![GeneratedEncounter::no_party_specified(DifficultyLevel::Easy)],
        );
        record
    }

    #[tokio::test]
    async fn test_save_and_get_round_trip() {
        let repo = SqliteEncounterRepository::new(memory_pool().await).await.unwrap();
        let owner = UserId::new();
        let saved = record("Frozen road", 0);

        let id = repo.save_batch(owner, &saved).await.unwrap();
        let stored = repo.get(id).await.unwrap().unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.owner_id, owner);
        assert_eq!(stored.record, saved);

        assert!(repo.get(EncounterBatchId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_by_owner_newest_first() {
        let repo = SqliteEncounterRepository::new(memory_pool().await).await.unwrap();
        let owner = UserId::new();
        repo.save_batch(owner, &record("older", 30)).await.unwrap();
        repo.save_batch(owner, &record("newer", 1)).await.unwrap();
        repo.save_batch(UserId::new(), &record("someone else", 0)).await.unwrap();

        let names: Vec<Option<String>> = repo
            .list_by_owner(owner)
            .await
            .unwrap()
            .iter()
            .map(|b| b.record.name().map(str::to_string))
            .collect();
        assert_eq!(names, vec![Some("newer".to_string()), Some("older".to_string())]);
    }
}
