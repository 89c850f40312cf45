//! Probability and modifier table shapes
//!
//! Keys are typed enums so an override that names an unknown biome or road is
//! rejected at the boundary instead of silently never matching.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Biome, DifficultyLevel, EncounterType, Road, TimeOfDay, TravelPace};

/// Base chance of each encounter type for one biome at one time of day
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EncounterOdds {
    pub non_combat: f64,
    pub combat: f64,
    pub hazard: f64,
    #[serde(default)]
    pub total: f64,
}

impl EncounterOdds {
    pub fn new(non_combat: f64, combat: f64, hazard: f64) -> Self {
        Self {
            non_combat,
            combat,
            hazard,
            total: non_combat + combat + hazard,
        }
    }

    pub fn for_type(&self, encounter_type: EncounterType) -> f64 {
        match encounter_type {
            EncounterType::NonCombat => self.non_combat,
            EncounterType::Combat => self.combat,
            EncounterType::Hazard => self.hazard,
        }
    }
}

/// Relative adjustment per encounter type; -0.35 reduces a chance by 35%
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TypeModifiers {
    #[serde(default)]
    pub non_combat: f64,
    #[serde(default)]
    pub combat: f64,
    #[serde(default)]
    pub hazard: f64,
}

impl TypeModifiers {
    pub fn new(non_combat: f64, combat: f64, hazard: f64) -> Self {
        Self {
            non_combat,
            combat,
            hazard,
        }
    }

    pub fn for_type(&self, encounter_type: EncounterType) -> f64 {
        match encounter_type {
            EncounterType::NonCombat => self.non_combat,
            EncounterType::Combat => self.combat,
            EncounterType::Hazard => self.hazard,
        }
    }
}

pub type PerTime<T> = BTreeMap<TimeOfDay, T>;

pub type EncounterProbabilityTable = BTreeMap<Biome, PerTime<EncounterOdds>>;
pub type RoadModifierTable = BTreeMap<Road, PerTime<TypeModifiers>>;
pub type PaceModifierTable = BTreeMap<TravelPace, PerTime<TypeModifiers>>;
pub type DifficultyProbabilityTable = BTreeMap<DifficultyLevel, PerTime<f64>>;

/// Same entry for day and night
pub fn both_times<T: Clone>(value: T) -> PerTime<T> {
    BTreeMap::from([(TimeOfDay::Day, value.clone()), (TimeOfDay::Night, value)])
}
