//! Generated encounter entity - One encounter produced by a generation call
//!
//! Every encounter carries an explicit [`EncounterStatus`], so a combat
//! encounter with no monsters always says why it is empty.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ChallengeRating, DifficultyLevel, EncounterType};

/// Outcome of generating one encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterStatus {
    /// Monsters were composed within the budget
    Composed,
    /// No party was supplied, so no budget could be computed
    NoPartySpecified,
    /// The filtered monster pool was empty
    NoSuitableMonsters,
    /// Composition hit malformed data
    GenerationFailed,
    /// Non-combat and hazard encounters are placeholders
    NotImplemented,
}

/// A monster entry within an encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterMonster {
    pub name: String,
    pub cr: Option<ChallengeRating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cr_text: Option<String>,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Plain XP range for one encounter, before the encounter-size multiplier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XpBudget {
    pub xp_lower_bound: f64,
    pub xp_upper_bound: f64,
}

impl XpBudget {
    pub fn new(xp_lower_bound: f64, xp_upper_bound: f64) -> Self {
        Self {
            xp_lower_bound,
            xp_upper_bound,
        }
    }
}

/// XP actually spent by a composed encounter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XpTally {
    #[serde(rename = "adjustedXP")]
    pub adjusted_xp: f64,
    #[serde(rename = "totalXP")]
    pub total_xp: f64,
    #[serde(rename = "xpPerPC")]
    pub xp_per_pc: f64,
    pub number_of_creatures: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedEncounter {
    #[serde(rename = "type")]
    pub encounter_type: EncounterType,
    pub difficulty: DifficultyLevel,
    pub status: EncounterStatus,
    pub description: String,
    #[serde(default)]
    pub monsters: Vec<EncounterMonster>,
    #[serde(flatten)]
    pub budget: Option<XpBudget>,
    #[serde(flatten)]
    pub tally: Option<XpTally>,
}

impl GeneratedEncounter {
    pub fn composed(
        difficulty: DifficultyLevel,
        monsters: Vec<EncounterMonster>,
        budget: XpBudget,
        tally: XpTally,
    ) -> Self {
        let description = describe_monsters(&monsters);
        Self {
            encounter_type: EncounterType::Combat,
            difficulty,
            status: EncounterStatus::Composed,
            description,
            monsters,
            budget: Some(budget),
            tally: Some(tally),
        }
    }

    pub fn no_party_specified(difficulty: DifficultyLevel) -> Self {
        Self::empty_combat(
            difficulty,
            EncounterStatus::NoPartySpecified,
            format!("A {} combat encounter (no party specified)", difficulty),
            None,
        )
    }

    pub fn no_suitable_monsters(difficulty: DifficultyLevel, budget: XpBudget) -> Self {
        Self::empty_combat(
            difficulty,
            EncounterStatus::NoSuitableMonsters,
            "No suitable monsters found".to_string(),
            Some(budget),
        )
    }

    pub fn generation_failed(difficulty: DifficultyLevel, reason: &str) -> Self {
        Self::empty_combat(
            difficulty,
            EncounterStatus::GenerationFailed,
            format!("Combat encounter (generation failed: {})", reason),
            None,
        )
    }

    pub fn not_implemented(encounter_type: EncounterType, difficulty: DifficultyLevel) -> Self {
        Self {
            encounter_type,
            difficulty,
            status: EncounterStatus::NotImplemented,
            description: format!("{} encounter generation is not yet implemented", encounter_type),
            monsters: Vec::new(),
            budget: None,
            tally: None,
        }
    }

    fn empty_combat(
        difficulty: DifficultyLevel,
        status: EncounterStatus,
        description: String,
        budget: Option<XpBudget>,
    ) -> Self {
        Self {
            encounter_type: EncounterType::Combat,
            difficulty,
            status,
            description,
            monsters: Vec::new(),
            budget,
            tally: None,
        }
    }

    pub fn number_of_creatures(&self) -> u32 {
        self.monsters.iter().map(|m| m.quantity).sum()
    }
}

fn describe_monsters(monsters: &[EncounterMonster]) -> String {
    monsters
        .iter()
        .map(|m| match &m.label {
            Some(label) => format!("{} x {} ({})", m.quantity, m.name, label),
            None => format!("{} x {}", m.quantity, m.name),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goblins(quantity: u32) -> EncounterMonster {
        EncounterMonster {
            name: "Goblin".to_string(),
            cr: ChallengeRating::new(0.25),
            cr_text: Some("1/4".to_string()),
            quantity,
            url: None,
            label: None,
        }
    }

    #[test]
    fn test_composed_encounter_serializes_flat_xp_fields() {
        let encounter = GeneratedEncounter::composed(
            DifficultyLevel::Easy,
            vec![goblins(2)],
            XpBudget::new(100.0, 200.0),
            XpTally {
                adjusted_xp: 150.0,
                total_xp: 100.0,
                xp_per_pc: 25.0,
                number_of_creatures: 2,
            },
        );
        let json = serde_json::to_value(&encounter).unwrap();

        assert_eq!(json["type"], "combat");
        assert_eq!(json["status"], "composed");
        assert_eq!(json["xpUpperBound"], 200.0);
        assert_eq!(json["adjustedXP"], 150.0);
        assert_eq!(json["xpPerPC"], 25.0);
        assert_eq!(json["numberOfCreatures"], 2);
        assert_eq!(json["monsters"][0]["crText"], "1/4");
        assert_eq!(encounter.description, "2 x Goblin");

        let back: GeneratedEncounter = serde_json::from_value(json).unwrap();
        assert_eq!(back, encounter);
    }

    #[test]
    fn test_empty_combat_encounters_carry_a_marker() {
        let encounter =
            GeneratedEncounter::no_suitable_monsters(DifficultyLevel::Hard, XpBudget::new(0.0, 1.0));
        assert!(encounter.monsters.is_empty());
        assert_eq!(encounter.status, EncounterStatus::NoSuitableMonsters);
        assert_eq!(encounter.description, "No suitable monsters found");

        let json = serde_json::to_value(&encounter).unwrap();
        assert!(json.get("adjustedXP").is_none());
        assert_eq!(json["xpLowerBound"], 0.0);
    }
}
