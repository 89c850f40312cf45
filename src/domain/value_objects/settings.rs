//! Encounter settings value object
//!
//! # Architectural Note (Settings Serialization)
//!
//! EncounterSettings includes serde derives because:
//! 1. Settings are stored in SQLite as one JSON document per user
//! 2. Settings are transmitted via REST API for the settings editor
//! 3. The JSON schema IS the API contract for settings

use serde::{Deserialize, Serialize};

use super::{
    DifficultyProbabilityTable, EncounterProbabilityTable, PaceModifierTable, RoadModifierTable,
};

/// A user's partial override of the overridable encounter tables.
///
/// Each table is replaced wholesale when present; a missing table falls back
/// to the compiled-in default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encounter_probabilities: Option<EncounterProbabilityTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road_modifiers: Option<RoadModifierTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace_modifiers: Option<PaceModifierTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty_probabilities: Option<DifficultyProbabilityTable>,
}

impl EncounterSettings {
    pub fn is_empty(&self) -> bool {
        self.encounter_probabilities.is_none()
            && self.road_modifiers.is_none()
            && self.pace_modifiers.is_none()
            && self.difficulty_probabilities.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{DifficultyLevel, TimeOfDay};

    #[test]
    fn test_partial_settings_parse() {
        let json = r#"{"difficultyProbabilities": {"trivial": {"day": 1.0}}}"#;
        let settings: EncounterSettings = serde_json::from_str(json).unwrap();

        assert!(settings.encounter_probabilities.is_none());
        let difficulty = settings.difficulty_probabilities.unwrap();
        assert_eq!(difficulty[&DifficultyLevel::Trivial][&TimeOfDay::Day], 1.0);
    }

    #[test]
    fn test_empty_settings() {
        let settings: EncounterSettings = serde_json::from_str("{}").unwrap();
        assert!(settings.is_empty());
        assert_eq!(serde_json::to_string(&settings).unwrap(), "{}");
    }
}
