//! Configuration tables - Default encounter probabilities, modifiers and XP data
//!
//! The four probability tables can be overridden per user through
//! [`EncounterSettings`]. The XP threshold and encounter multiplier tables are
//! fixed rules data.

use std::collections::BTreeMap;

use crate::domain::value_objects::{
    both_times, Biome, DifficultyLevel, DifficultyProbabilityTable,
    EncounterOdds, EncounterProbabilityTable, EncounterSettings, EncounterType,
    PaceModifierTable, Road, RoadModifierTable, TimeOfDay, TravelPace, TypeModifiers,
};

/// Per-character XP thresholds for levels 1..=20, columns in
/// trivial, easy, medium, hard, deadly, absurd order
const XP_THRESHOLDS: [[f64; 6]; 20] = [
    [8.0, 25.0, 50.0, 75.0, 100.0, 125.0],
    [17.0, 50.0, 100.0, 150.0, 200.0, 250.0],
    [25.0, 75.0, 150.0, 225.0, 400.0, 575.0],
    [42.0, 125.0, 250.0, 375.0, 500.0, 625.0],
    [83.0, 250.0, 500.0, 750.0, 1100.0, 1450.0],
    [100.0, 300.0, 600.0, 900.0, 1400.0, 1900.0],
    [117.0, 350.0, 750.0, 1100.0, 1700.0, 2300.0],
    [150.0, 450.0, 900.0, 1400.0, 2100.0, 2800.0],
    [183.0, 550.0, 1100.0, 1600.0, 2400.0, 3200.0],
    [200.0, 600.0, 1200.0, 1900.0, 2800.0, 3700.0],
    [267.0, 800.0, 1600.0, 2400.0, 3600.0, 4800.0],
    [333.0, 1000.0, 2000.0, 3000.0, 4500.0, 6000.0],
    [367.0, 1100.0, 2200.0, 3400.0, 5100.0, 6800.0],
    [417.0, 1250.0, 2500.0, 3800.0, 5700.0, 7600.0],
    [467.0, 1400.0, 2800.0, 4300.0, 6400.0, 8500.0],
    [533.0, 1600.0, 3200.0, 4800.0, 7200.0, 9600.0],
    [667.0, 2000.0, 3900.0, 5900.0, 8800.0, 11700.0],
    [700.0, 2100.0, 4200.0, 6300.0, 9500.0, 12700.0],
    [800.0, 2400.0, 4900.0, 7300.0, 10900.0, 14500.0],
    [933.0, 2800.0, 5700.0, 8500.0, 12700.0, 16900.0],
];

/// Encounter-size multipliers for party sizes 1..=6 by creature count 1..=15
const ENCOUNTER_MULTIPLIERS: [[f64; 15]; 6] = [
    [1.5, 2.0, 2.5, 2.5, 2.5, 2.5, 3.0, 3.0, 3.0, 3.0, 4.0, 4.0, 4.0, 4.0, 5.0],
    [1.5, 2.0, 2.5, 2.5, 2.5, 2.5, 3.0, 3.0, 3.0, 3.0, 4.0, 4.0, 4.0, 4.0, 5.0],
    [1.0, 1.5, 2.0, 2.0, 2.0, 2.0, 2.5, 2.5, 2.5, 2.5, 3.0, 3.0, 3.0, 3.0, 4.0],
    [1.0, 1.5, 2.0, 2.0, 2.0, 2.0, 2.5, 2.5, 2.5, 2.5, 3.0, 3.0, 3.0, 3.0, 4.0],
    [1.0, 1.5, 2.0, 2.0, 2.0, 2.0, 2.5, 2.5, 2.5, 2.5, 3.0, 3.0, 3.0, 3.0, 4.0],
    [0.5, 1.0, 1.5, 1.5, 1.5, 1.5, 2.0, 2.0, 2.0, 2.0, 2.5, 2.5, 2.5, 2.5, 3.0],
];

pub const MAX_MULTIPLIER_PARTY_SIZE: u32 = 6;
pub const MAX_MULTIPLIER_CREATURES: u32 = 15;

/// All tables consumed by one generation call
#[derive(Debug, Clone, PartialEq)]
pub struct EncounterTables {
    pub encounter_probabilities: EncounterProbabilityTable,
    pub road_modifiers: RoadModifierTable,
    pub pace_modifiers: PaceModifierTable,
    pub difficulty_probabilities: DifficultyProbabilityTable,
}

impl Default for EncounterTables {
    fn default() -> Self {
        Self {
            encounter_probabilities: default_encounter_probabilities(),
            road_modifiers: default_road_modifiers(),
            pace_modifiers: default_pace_modifiers(),
            difficulty_probabilities: default_difficulty_probabilities(),
        }
    }
}

impl EncounterTables {
    /// Apply a user's overrides. A table present in the settings replaces the
    /// default table entirely.
    pub fn with_settings(&self, settings: &EncounterSettings) -> Self {
        Self {
            encounter_probabilities: settings
                .encounter_probabilities
                .clone()
                .unwrap_or_else(|| self.encounter_probabilities.clone()),
            road_modifiers: settings
                .road_modifiers
                .clone()
                .unwrap_or_else(|| self.road_modifiers.clone()),
            pace_modifiers: settings
                .pace_modifiers
                .clone()
                .unwrap_or_else(|| self.pace_modifiers.clone()),
            difficulty_probabilities: settings
                .difficulty_probabilities
                .clone()
                .unwrap_or_else(|| self.difficulty_probabilities.clone()),
        }
    }

    /// The snapshot a user edits in the settings screen
    pub fn as_settings(&self) -> EncounterSettings {
        EncounterSettings {
            encounter_probabilities: Some(self.encounter_probabilities.clone()),
            road_modifiers: Some(self.road_modifiers.clone()),
            pace_modifiers: Some(self.pace_modifiers.clone()),
            difficulty_probabilities: Some(self.difficulty_probabilities.clone()),
        }
    }

    pub fn odds(&self, biome: Option<Biome>, time: TimeOfDay) -> Option<&EncounterOdds> {
        self.encounter_probabilities.get(&biome?)?.get(&time)
    }

    /// Road modifier for one type; 0 when the road is unspecified or has no entry
    pub fn road_modifier(
        &self,
        road: Option<Road>,
        time: TimeOfDay,
        encounter_type: EncounterType,
    ) -> f64 {
        road.and_then(|r| self.road_modifiers.get(&r))
            .and_then(|per_time| per_time.get(&time))
            .map(|m| m.for_type(encounter_type))
            .unwrap_or(0.0)
    }

    /// Pace modifier for one type; 0 when the pace is unspecified or has no entry
    pub fn pace_modifier(
        &self,
        pace: Option<TravelPace>,
        time: TimeOfDay,
        encounter_type: EncounterType,
    ) -> f64 {
        pace.and_then(|p| self.pace_modifiers.get(&p))
            .and_then(|per_time| per_time.get(&time))
            .map(|m| m.for_type(encounter_type))
            .unwrap_or(0.0)
    }

    /// Difficulty weights for one time of day, easiest first
    pub fn difficulty_weights(&self, time: TimeOfDay) -> Vec<(DifficultyLevel, f64)> {
        self.difficulty_probabilities
            .iter()
            .filter_map(|(difficulty, per_time)| {
                per_time.get(&time).map(|p| (*difficulty, *p))
            })
            .collect()
    }

    /// Per-character XP threshold; `None` outside levels 1..=20
    pub fn xp_threshold(&self, level: u32, difficulty: DifficultyLevel) -> Option<f64> {
        let row = XP_THRESHOLDS.get(usize::try_from(level).ok()?.checked_sub(1)?)?;
        let column = DifficultyLevel::ALL.iter().position(|d| *d == difficulty)?;
        row.get(column).copied()
    }

    /// Encounter-size multiplier. Party size and creature count clamp into the
    /// table; a miss yields 1.0.
    pub fn multiplier(&self, party_size: u32, creature_count: u32) -> f64 {
        let party = party_size.clamp(1, MAX_MULTIPLIER_PARTY_SIZE) as usize;
        let creatures = creature_count.clamp(1, MAX_MULTIPLIER_CREATURES) as usize;
        ENCOUNTER_MULTIPLIERS
            .get(party - 1)
            .and_then(|row| row.get(creatures - 1))
            .copied()
            .unwrap_or(1.0)
    }
}

fn odds(day: (f64, f64, f64), night: (f64, f64, f64)) -> BTreeMap<TimeOfDay, EncounterOdds> {
    BTreeMap::from([
        (TimeOfDay::Day, EncounterOdds::new(day.0, day.1, day.2)),
        (TimeOfDay::Night, EncounterOdds::new(night.0, night.1, night.2)),
    ])
}

fn default_encounter_probabilities() -> EncounterProbabilityTable {
    use Biome::*;

    // (non_combat, combat, hazard)
    let northern = odds((0.03, 0.21, 0.05), (0.03, 0.24, 0.05));
    let open_dry = odds((0.06, 0.18, 0.05), (0.03, 0.24, 0.05));
    let dense = odds((0.03, 0.24, 0.05), (0.0, 0.27, 0.05));
    let tropical_forest = odds((0.02, 0.24, 0.05), (0.0, 0.27, 0.05));

    BTreeMap::from([
        (BorealForestsTaiga, northern.clone()),
        (DesertsXericShrublands, odds((0.06, 0.18, 0.05), (0.04, 0.24, 0.05))),
        (FloodedGrasslandsSavannas, odds((0.05, 0.21, 0.05), (0.02, 0.24, 0.05))),
        (Mangroves, dense.clone()),
        (MediterraneanForests, odds((0.06, 0.18, 0.05), (0.0, 0.24, 0.05))),
        (MontaneGrasslandsShrublands, dense),
        (RockAndIce, northern.clone()),
        (TemperateBroadleafForests, northern.clone()),
        (TemperateConiferForests, northern.clone()),
        (TemperateGrasslands, open_dry.clone()),
        (TropicalConiferousForests, tropical_forest.clone()),
        (TropicalDryBroadleafForests, tropical_forest.clone()),
        (TropicalGrasslands, open_dry),
        (TropicalMoistBroadleafForests, tropical_forest),
        (Tundra, northern),
    ])
}

fn default_road_modifiers() -> RoadModifierTable {
    BTreeMap::from([
        (Road::NoRoad, both_times(TypeModifiers::default())),
        (Road::Highway, both_times(TypeModifiers::new(0.2, -0.35, -0.2))),
        (Road::Byway, both_times(TypeModifiers::new(0.1, -0.25, -0.1))),
        (Road::Royalway, both_times(TypeModifiers::new(0.15, -0.5, -0.2))),
        (Road::Bridleway, both_times(TypeModifiers::new(0.05, -0.1, -0.05))),
    ])
}

fn default_pace_modifiers() -> PaceModifierTable {
    BTreeMap::from([
        (TravelPace::Slow, both_times(TypeModifiers::new(0.2, -0.2, -0.2))),
        (TravelPace::Normal, both_times(TypeModifiers::default())),
        (TravelPace::Fast, both_times(TypeModifiers::new(-0.2, 0.2, 0.2))),
    ])
}

fn default_difficulty_probabilities() -> DifficultyProbabilityTable {
    BTreeMap::from([
        (DifficultyLevel::Trivial, both_times(0.1)),
        (DifficultyLevel::Easy, both_times(0.14)),
        (DifficultyLevel::Medium, both_times(0.4)),
        (DifficultyLevel::Hard, both_times(0.26)),
        (DifficultyLevel::Deadly, both_times(0.08)),
        (DifficultyLevel::Absurd, both_times(0.02)),
    ])
}
