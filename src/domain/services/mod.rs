//! Domain services - Pure encounter generation logic
//!
//! Every function that draws randomness takes the generator explicitly.

pub mod budget;
pub mod composer;
pub mod monster_filter;
pub mod probability;
pub mod rolling;
pub mod tables;

pub use budget::{adjusted_xp, party_stats, xp_bounds, PartyStats};
pub use composer::{CombatComposition, CompositionError, CompositionStrategy, EncounterComposer};
pub use monster_filter::{filter_monsters, MonsterCriteria};
pub use probability::{
    at_least, clamp_probability, probability_distribution, resolve_instance, resolve_probability,
    CountProbability, EncounterDistribution, ResolvedProbabilities,
};
pub use rolling::{roll_occurrence, sample_difficulty};
pub use tables::EncounterTables;
