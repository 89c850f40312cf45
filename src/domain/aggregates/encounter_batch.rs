//! Encounter Batch Aggregate - The record produced by one generation call
//!
//! A batch covers every instance submitted in the call. Encounters are
//! appended in instance order and the encounter count always matches the
//! encounter list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::GeneratedEncounter;
use crate::domain::value_objects::InstanceDisplayOptions;

/// The instances a batch was generated from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOptions {
    pub instances: Vec<InstanceDisplayOptions>,
    /// Number of instances in the batch
    pub quantity: u32,
}

/// The Encounter Batch Aggregate Root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterAggregateRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    created_at: DateTime<Utc>,
    encounter_count: u32,
    encounters: Vec<GeneratedEncounter>,
    options: BatchOptions,
}

impl EncounterAggregateRecord {
    /// Start an empty batch. Blank names are dropped.
    pub fn new(name: Option<&str>, created_at: DateTime<Utc>) -> Self {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        Self {
            name,
            created_at,
            encounter_count: 0,
            encounters: Vec::new(),
            options: BatchOptions {
                instances: Vec::new(),
                quantity: 0,
            },
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn encounter_count(&self) -> u32 {
        self.encounter_count
    }

    pub fn encounters(&self) -> &[GeneratedEncounter] {
        &self.encounters
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    // ========================================================================
    // Mutators
    // ========================================================================

    /// Record one processed instance and the encounters it produced.
    ///
    /// Skipped instances pass an empty list; their options are still kept.
    pub fn record_instance(
        &mut self,
        options: InstanceDisplayOptions,
        encounters: Vec<GeneratedEncounter>,
    ) {
        self.options.instances.push(options);
        self.options.quantity = self.options.instances.len() as u32;
        self.encounters.extend(encounters);
        self.encounter_count = self.encounters.len() as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Biome, DifficultyLevel, EncounterInstanceOptions};

    fn created_at() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_counts_track_recorded_instances() {
        let mut batch = EncounterAggregateRecord::new(Some("  Road to Neverwinter "), created_at());
        let tundra = EncounterInstanceOptions::new(Biome::Tundra).display_options();

        batch.record_instance(
            tundra.clone(),
            vec![
                GeneratedEncounter::no_party_specified(DifficultyLevel::Easy),
                GeneratedEncounter::no_party_specified(DifficultyLevel::Hard),
            ],
        );
        batch.record_instance(tundra, Vec::new());

        assert_eq!(batch.name(), Some("Road to Neverwinter"));
        assert_eq!(batch.encounter_count(), 2);
        assert_eq!(batch.options().quantity, 2);
        assert_eq!(batch.options().instances.len(), 2);
    }

    #[test]
    fn test_blank_name_is_omitted() {
        let batch = EncounterAggregateRecord::new(Some("   "), created_at());
        assert!(batch.name().is_none());

        let json = serde_json::to_value(&batch).unwrap();
        assert!(json.get("name").is_none());
        assert_eq!(json["encounterCount"], 0);
        assert_eq!(json["options"]["quantity"], 0);
    }
}
