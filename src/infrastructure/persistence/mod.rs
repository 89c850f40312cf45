//! SQLite persistence adapters
//!
//! Encounter batches and per-user settings live in one SQLite database. Each
//! repository creates its own tables on construction.

mod encounter_repository;
mod monster_catalog;
mod settings_repository;

pub use encounter_repository::SqliteEncounterRepository;
pub use monster_catalog::MonsterCatalog;
pub use settings_repository::SqliteEncounterSettingsRepository;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// Open the connection pool for the configured database
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .with_context(|| format!("Failed to open database at {}", database_url))
}

#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap()
}
