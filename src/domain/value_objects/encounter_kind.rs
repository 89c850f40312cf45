//! Encounter type and difficulty tiers

use serde::{Deserialize, Serialize};

/// What kind of encounter occurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EncounterType {
    #[serde(rename = "combat")]
    Combat,
    #[serde(rename = "non-combat", alias = "non_combat")]
    NonCombat,
    #[serde(rename = "hazard")]
    Hazard,
}

impl EncounterType {
    /// Rolling order when all types are in scope
    pub const ALL: [EncounterType; 3] = [Self::NonCombat, Self::Combat, Self::Hazard];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Combat => "combat",
            Self::NonCombat => "non-combat",
            Self::Hazard => "hazard",
        }
    }
}

impl std::fmt::Display for EncounterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Encounter difficulty, ordered from least to most dangerous
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Trivial,
    Easy,
    Medium,
    Hard,
    Deadly,
    Absurd,
}

impl Default for DifficultyLevel {
    fn default() -> Self {
        Self::Medium
    }
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 6] = [
        Self::Trivial,
        Self::Easy,
        Self::Medium,
        Self::Hard,
        Self::Deadly,
        Self::Absurd,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Trivial => "trivial",
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Deadly => "deadly",
            Self::Absurd => "absurd",
        }
    }

    /// The next easier tier, if any
    pub fn lower_tier(&self) -> Option<DifficultyLevel> {
        match self {
            Self::Trivial => None,
            Self::Easy => Some(Self::Trivial),
            Self::Medium => Some(Self::Easy),
            Self::Hard => Some(Self::Medium),
            Self::Deadly => Some(Self::Hard),
            Self::Absurd => Some(Self::Deadly),
        }
    }
}

impl std::fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_ordering_matches_tiers() {
        assert!(DifficultyLevel::Trivial < DifficultyLevel::Absurd);
        assert_eq!(DifficultyLevel::Trivial.lower_tier(), None);
        assert_eq!(DifficultyLevel::Hard.lower_tier(), Some(DifficultyLevel::Medium));
        for pair in DifficultyLevel::ALL.windows(2) {
            assert_eq!(pair[1].lower_tier(), Some(pair[0]));
        }
    }

    #[test]
    fn test_encounter_type_wire_names() {
        assert_eq!(serde_json::to_string(&EncounterType::NonCombat).unwrap(), "\"non-combat\"");
        let parsed: EncounterType = serde_json::from_str("\"non_combat\"").unwrap();
        assert_eq!(parsed, EncounterType::NonCombat);
    }
}
