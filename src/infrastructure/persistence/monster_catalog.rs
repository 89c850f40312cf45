//! Monster catalog - The bestiary loaded once at startup

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::domain::entities::MonsterRecord;

/// Read-only monster pool shared by every generation call
#[derive(Debug, Clone)]
pub struct MonsterCatalog {
    monsters: Arc<[MonsterRecord]>,
}

impl MonsterCatalog {
    pub fn new(monsters: Vec<MonsterRecord>) -> Self {
        Self {
            monsters: monsters.into(),
        }
    }

    /// Load a JSON array of monster records. A missing file is an empty catalog.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            warn!(
                path = %path.display(),
                "Monster data file not found, combat encounters will have no monsters"
            );
            return Ok(Self::new(Vec::new()));
        }

        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read monster data from {}", path.display()))?;
        let catalog = Self::from_json(&json)
            .with_context(|| format!("Failed to parse monster data in {}", path.display()))?;

        info!(
            monsters = catalog.len(),
            hierarchy = catalog.has_hierarchy(),
            "Monster catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let monsters: Vec<MonsterRecord> = serde_json::from_str(json)?;
        Ok(Self::new(monsters))
    }

    pub fn monsters(&self) -> Arc<[MonsterRecord]> {
        Arc::clone(&self.monsters)
    }

    pub fn len(&self) -> usize {
        self.monsters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }

    /// Whether any record declares followers, lieutenants, sergeants or minions
    pub fn has_hierarchy(&self) -> bool {
        self.monsters.iter().any(|m| m.has_hierarchy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_reads_bestiary_rows() {
        let json = r#"[
            {"name": "Goblin Boss", "cr": "1", "habitat": "forest", "MINIONS": ["Goblin"]},
            {"name": "Goblin", "cr": "1/4", "habitat": ["forest", "grassland"]}
        ]"#;
        let catalog = MonsterCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.has_hierarchy());
        assert_eq!(catalog.monsters()[1].habitat.len(), 2);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(MonsterCatalog::from_json("{not json").is_err());
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let catalog = MonsterCatalog::load("/nonexistent/monsters.json").await.unwrap();
        assert!(catalog.is_empty());
    }
}
