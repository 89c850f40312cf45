//! Monster filter - Narrow the pool to creatures that fit the budget and terrain
//!
//! Tag comparisons are case-insensitive. A monster with no tags for a
//! criterion is compatible with any value of it.

use crate::domain::entities::MonsterRecord;
use crate::domain::value_objects::{
    Biome, EncounterInstanceOptions, Habitat, TimeOfDay, TravelMedium,
};

/// Time tag matching both day and night
const ANY_TIME_TAG: &str = "all";

#[derive(Debug, Clone, PartialEq)]
pub struct MonsterCriteria {
    pub xp_ceiling: f64,
    pub habitat: Option<Habitat>,
    pub biome: Option<Biome>,
    pub time: Option<TimeOfDay>,
    pub medium: Option<TravelMedium>,
}

impl MonsterCriteria {
    pub fn for_instance(options: &EncounterInstanceOptions, xp_ceiling: f64) -> Self {
        Self {
            xp_ceiling,
            habitat: options.biome.map(|b| b.habitat()),
            biome: options.biome,
            time: options.time,
            medium: options.travel_medium,
        }
    }

    pub fn matches(&self, monster: &MonsterRecord) -> bool {
        monster.xp() <= self.xp_ceiling
            && self.matches_environment(monster)
            && self.matches_time(monster)
            && self.matches_medium(monster)
    }

    fn matches_environment(&self, monster: &MonsterRecord) -> bool {
        if self.habitat.is_none() && self.biome.is_none() {
            return true;
        }
        if monster.habitat.is_empty() && monster.biome.is_empty() {
            return true;
        }
        self.habitat
            .is_some_and(|h| has_tag(&monster.habitat, h.name()))
            || self.biome.is_some_and(|b| has_tag(&monster.biome, b.name()))
    }

    fn matches_time(&self, monster: &MonsterRecord) -> bool {
        match self.time {
            None => true,
            Some(_) if monster.time_of_day.is_empty() => true,
            Some(time) => {
                has_tag(&monster.time_of_day, time.name())
                    || has_tag(&monster.time_of_day, ANY_TIME_TAG)
            }
        }
    }

    fn matches_medium(&self, monster: &MonsterRecord) -> bool {
        match self.medium {
            None => true,
            Some(_) if monster.travel_medium.is_empty() => true,
            Some(medium) => has_tag(&monster.travel_medium, medium.monster_tag()),
        }
    }
}

fn has_tag(tags: &[String], wanted: &str) -> bool {
    tags.iter().any(|t| t.trim().eq_ignore_ascii_case(wanted))
}

/// Monsters compatible with the criteria, in pool order
pub fn filter_monsters<'a>(
    pool: &'a [MonsterRecord],
    criteria: &MonsterCriteria,
) -> Vec<&'a MonsterRecord> {
    pool.iter().filter(|m| criteria.matches(m)).collect()
}
