//! Encounter instance options - One leg of travel to roll encounters for

use serde::{Deserialize, Serialize};

use super::{
    random_as_none, Biome, DifficultyLevel, EncounterType, PartyComposition, Road, Season,
    TimeOfDay, TravelMedium, TravelPace,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterInstanceOptions {
    #[serde(default, deserialize_with = "random_as_none")]
    pub biome: Option<Biome>,
    #[serde(default, deserialize_with = "random_as_none")]
    pub time: Option<TimeOfDay>,
    #[serde(default, deserialize_with = "random_as_none")]
    pub road: Option<Road>,
    #[serde(default, deserialize_with = "random_as_none")]
    pub travel_pace: Option<TravelPace>,
    #[serde(default, deserialize_with = "random_as_none")]
    pub travel_medium: Option<TravelMedium>,
    #[serde(default, deserialize_with = "random_as_none")]
    pub season: Option<Season>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub encounter_type: Option<EncounterType>,
    #[serde(default)]
    pub difficulty_level: Option<DifficultyLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party: Option<PartyComposition>,
}

fn default_quantity() -> u32 {
    1
}

impl Default for EncounterInstanceOptions {
    fn default() -> Self {
        Self {
            biome: None,
            time: None,
            road: None,
            travel_pace: None,
            travel_medium: None,
            season: None,
            quantity: 1,
            encounter_type: None,
            difficulty_level: None,
            party: None,
        }
    }
}

/// How encounters are produced for one instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Type and difficulty were both requested; no rolls are made
    Guaranteed {
        encounter_type: EncounterType,
        difficulty: DifficultyLevel,
    },
    /// Occurrence is rolled. A requested type narrows the roll to that type;
    /// a requested difficulty replaces the difficulty sample.
    Rolled {
        encounter_type: Option<EncounterType>,
        difficulty: Option<DifficultyLevel>,
    },
}

impl EncounterInstanceOptions {
    pub fn new(biome: Biome) -> Self {
        Self {
            biome: Some(biome),
            ..Self::default()
        }
    }

    pub fn with_time(mut self, time: TimeOfDay) -> Self {
        self.time = Some(time);
        self
    }

    pub fn with_road(mut self, road: Road) -> Self {
        self.road = Some(road);
        self
    }

    pub fn with_pace(mut self, pace: TravelPace) -> Self {
        self.travel_pace = Some(pace);
        self
    }

    pub fn with_medium(mut self, medium: TravelMedium) -> Self {
        self.travel_medium = Some(medium);
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_encounter_type(mut self, encounter_type: EncounterType) -> Self {
        self.encounter_type = Some(encounter_type);
        self
    }

    pub fn with_difficulty(mut self, difficulty: DifficultyLevel) -> Self {
        self.difficulty_level = Some(difficulty);
        self
    }

    pub fn with_party(mut self, party: PartyComposition) -> Self {
        self.party = Some(party);
        self
    }

    /// Repetitions to generate; never below one
    pub fn effective_quantity(&self) -> u32 {
        self.quantity.max(1)
    }

    /// Time used for table lookups. Unspecified time reads the day column.
    pub fn time_key(&self) -> TimeOfDay {
        self.time.unwrap_or(TimeOfDay::Day)
    }

    pub fn mode(&self) -> GenerationMode {
        match (self.encounter_type, self.difficulty_level) {
            (Some(encounter_type), Some(difficulty)) => GenerationMode::Guaranteed {
                encounter_type,
                difficulty,
            },
            (encounter_type, difficulty) => GenerationMode::Rolled {
                encounter_type,
                difficulty,
            },
        }
    }

    pub fn display_options(&self) -> InstanceDisplayOptions {
        InstanceDisplayOptions {
            biome: self.biome,
            time: self.time,
            road: self.road,
            travel_pace: self.travel_pace,
            travel_medium: self.travel_medium,
            season: self.season,
            quantity: self.effective_quantity(),
            encounter_type: self.encounter_type,
            difficulty_level: self.difficulty_level,
        }
    }
}

/// The instance options kept on a generated record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceDisplayOptions {
    pub biome: Option<Biome>,
    pub time: Option<TimeOfDay>,
    pub road: Option<Road>,
    pub travel_pace: Option<TravelPace>,
    pub travel_medium: Option<TravelMedium>,
    pub season: Option<Season>,
    pub quantity: u32,
    pub encounter_type: Option<EncounterType>,
    pub difficulty_level: Option<DifficultyLevel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_payload_parses() {
        let json = r#"{
            "biome": "tundra",
            "time": "random",
            "road": "highway",
            "travelPace": "fast",
            "travelMedium": "random",
            "season": "winter",
            "quantity": 3,
            "encounterType": "combat",
            "party": {"pcs": [{"level": 5, "quantity": 4}]}
        }"#;
        let options: EncounterInstanceOptions = serde_json::from_str(json).unwrap();

        assert_eq!(options.biome, Some(Biome::Tundra));
        assert_eq!(options.time, None);
        assert_eq!(options.time_key(), TimeOfDay::Day);
        assert_eq!(options.travel_medium, None);
        assert_eq!(options.quantity, 3);
        assert_eq!(
            options.mode(),
            GenerationMode::Rolled {
                encounter_type: Some(EncounterType::Combat),
                difficulty: None,
            }
        );
    }

    #[test]
    fn test_guaranteed_mode_needs_type_and_difficulty() {
        let options = EncounterInstanceOptions::new(Biome::Mangroves)
            .with_encounter_type(EncounterType::Combat)
            .with_difficulty(DifficultyLevel::Hard);
        assert!(matches!(options.mode(), GenerationMode::Guaranteed { .. }));

        let options = EncounterInstanceOptions::new(Biome::Mangroves)
            .with_difficulty(DifficultyLevel::Hard);
        assert!(matches!(options.mode(), GenerationMode::Rolled { encounter_type: None, .. }));
    }

    #[test]
    fn test_zero_quantity_is_treated_as_one() {
        let options = EncounterInstanceOptions::new(Biome::Tundra).with_quantity(0);
        assert_eq!(options.effective_quantity(), 1);
        assert_eq!(options.display_options().quantity, 1);
    }
}
