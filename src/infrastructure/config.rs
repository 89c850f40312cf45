//! Application configuration

use std::collections::HashMap;

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

const ENV_PREFIX: &str = "VIZIER";

/// Application configuration loaded from environment
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// SQLite connection URL
    pub database_url: String,
    /// HTTP server port
    pub server_port: u16,
    /// JSON bestiary loaded at startup
    pub monster_data_path: String,
    /// Seed for every generation call that does not bring its own
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl AppConfig {
    /// Load configuration from `VIZIER_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::load(Environment::with_prefix(ENV_PREFIX))
    }

    /// Load configuration from an explicit variable map instead of the process environment
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        Self::load(Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    fn load(environment: Environment) -> Result<Self> {
        Config::builder()
            .set_default("database_url", "sqlite://vizier.db?mode=rwc")?
            .set_default("server_port", 3000)?
            .set_default("monster_data_path", "data/monsters.json")?
            .add_source(environment.try_parsing(true))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_vars(HashMap::new()).unwrap();
        assert_eq!(config.database_url, "sqlite://vizier.db?mode=rwc");
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.monster_data_path, "data/monsters.json");
        assert_eq!(config.rng_seed, None);
    }

    #[test]
    fn test_prefixed_overrides() {
        let vars = HashMap::from([
            ("VIZIER_SERVER_PORT".to_string(), "8080".to_string()),
            ("VIZIER_RNG_SEED".to_string(), "42".to_string()),
            ("VIZIER_DATABASE_URL".to_string(), "sqlite::memory:".to_string()),
        ]);
        let config = AppConfig::from_vars(vars).unwrap();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.rng_seed, Some(42));
        assert_eq!(config.database_url, "sqlite::memory:");
    }

    #[test]
    fn test_bad_port_is_rejected() {
        let vars = HashMap::from([("VIZIER_SERVER_PORT".to_string(), "harbor".to_string())]);
        assert!(AppConfig::from_vars(vars).is_err());
    }
}
