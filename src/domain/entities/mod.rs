//! Domain entities - Core business objects

mod encounter;
mod monster;

pub use encounter::{EncounterMonster, EncounterStatus, GeneratedEncounter, XpBudget, XpTally};
pub use monster::{MonsterIndex, MonsterRecord, RelationRank};
