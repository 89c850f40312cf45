//! Value objects - Immutable objects defined by their attributes

mod challenge_rating;
mod encounter_kind;
mod ids;
mod instance_options;
mod party;
mod probability_tables;
mod settings;
mod travel;

pub use challenge_rating::{ChallengeRating, CR_XP_TABLE};
pub use encounter_kind::{DifficultyLevel, EncounterType};
pub use ids::*;
pub use instance_options::{EncounterInstanceOptions, GenerationMode, InstanceDisplayOptions};
pub use party::{PartyComposition, PartyMember, MAX_CHARACTER_LEVEL, MIN_CHARACTER_LEVEL};
pub use probability_tables::{
    both_times, DifficultyProbabilityTable, EncounterOdds, EncounterProbabilityTable,
    PaceModifierTable, PerTime, RoadModifierTable, TypeModifiers,
};
pub use settings::EncounterSettings;
pub use travel::{
    random_as_none, Biome, Habitat, Road, Season, TimeOfDay, TravelMedium, TravelPace,
};
