//! Party stats and XP budgets

use super::composer::CompositionError;
use super::tables::EncounterTables;
use crate::domain::entities::XpBudget;
use crate::domain::value_objects::{
    DifficultyLevel, PartyComposition, MAX_CHARACTER_LEVEL, MIN_CHARACTER_LEVEL,
};

/// Reduced party composition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartyStats {
    pub average_level: f64,
    pub party_size: u32,
}

impl PartyStats {
    /// Value reported when no party is supplied.
    ///
    /// A genuine party of one level-1 character reduces to the same value and
    /// is therefore also treated as "no party".
    pub const NO_PARTY: PartyStats = PartyStats {
        average_level: 1.0,
        party_size: 1,
    };

    pub fn is_no_party(&self) -> bool {
        self.party_size == Self::NO_PARTY.party_size
            && self.average_level == Self::NO_PARTY.average_level
    }

    /// Threshold table row: average level rounded down into 1..=20
    pub fn table_level(&self) -> u32 {
        let floored = self.average_level.floor();
        if floored.is_finite() {
            (floored as u32).clamp(MIN_CHARACTER_LEVEL, MAX_CHARACTER_LEVEL)
        } else {
            MIN_CHARACTER_LEVEL
        }
    }
}

pub fn party_stats(party: Option<&PartyComposition>) -> PartyStats {
    let Some(party) = party else {
        return PartyStats::NO_PARTY;
    };

    // validated parties always fit; saturate rather than wrap otherwise
    let party_size = party.size().unwrap_or(u32::MAX);
    if party_size == 0 {
        return PartyStats::NO_PARTY;
    }
    let level_sum: f64 = party
        .pcs
        .iter()
        .map(|pc| f64::from(pc.level) * f64::from(pc.quantity))
        .sum();

    PartyStats {
        average_level: level_sum / f64::from(party_size),
        party_size,
    }
}

/// XP range for a party at a difficulty.
///
/// The upper bound is the difficulty's per-character threshold times the party
/// size; the lower bound uses the next easier tier, or 0 for trivial.
pub fn xp_bounds(
    stats: &PartyStats,
    difficulty: DifficultyLevel,
    tables: &EncounterTables,
) -> Result<XpBudget, CompositionError> {
    let level = stats.table_level();
    let party_size = f64::from(stats.party_size);
    let threshold = |d: DifficultyLevel| {
        tables
            .xp_threshold(level, d)
            .ok_or(CompositionError::MissingThreshold { level, difficulty: d })
    };

    let upper = threshold(difficulty)? * party_size;
    let lower = match difficulty.lower_tier() {
        Some(tier) => threshold(tier)? * party_size,
        None => 0.0,
    };
    Ok(XpBudget::new(lower.min(upper), upper))
}

/// Raw XP scaled by the encounter-size multiplier for the creature count
pub fn adjusted_xp(
    tables: &EncounterTables,
    party_size: u32,
    total_xp: f64,
    creature_count: u32,
) -> f64 {
    total_xp * tables.multiplier(party_size, creature_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::PartyMember;

    #[test]
    fn test_party_stats_weighted_average() {
        let party = PartyComposition::new(vec![PartyMember::new(3, 2), PartyMember::new(6, 1)]);
        let stats = party_stats(Some(&party));
        assert_eq!(stats.party_size, 3);
        assert_eq!(stats.average_level, 4.0);
        assert!(!stats.is_no_party());
    }

    #[test]
    fn test_missing_party_is_the_sentinel() {
        assert!(party_stats(None).is_no_party());
        assert!(party_stats(Some(&PartyComposition::default())).is_no_party());
        // indistinguishable from no data
        let solo = PartyComposition::new(vec![PartyMember::new(1, 1)]);
        assert!(party_stats(Some(&solo)).is_no_party());
    }

    #[test]
    fn test_large_parties_are_not_capped() {
        let party = PartyComposition::new(vec![PartyMember::new(5, 8)]);
        assert_eq!(party_stats(Some(&party)).party_size, 8);
    }

    #[test]
    fn test_oversized_party_saturates() {
        let party = PartyComposition::new(vec![PartyMember::new(5, u32::MAX), PartyMember::new(5, 2)]);
        let stats = party_stats(Some(&party));
        assert_eq!(stats.party_size, u32::MAX);
        assert!(stats.average_level.is_finite());
    }

    #[test]
    fn test_xp_bounds_use_lower_tier() {
        let tables = EncounterTables::default();
        let stats = PartyStats {
            average_level: 5.7,
            party_size: 4,
        };

        let hard = xp_bounds(&stats, DifficultyLevel::Hard, &tables).unwrap();
        assert_eq!(hard, XpBudget::new(2000.0, 3000.0));

        let trivial = xp_bounds(&stats, DifficultyLevel::Trivial, &tables).unwrap();
        assert_eq!(trivial, XpBudget::new(0.0, 332.0));
    }

    #[test]
    fn test_levels_clamp_into_table() {
        let tables = EncounterTables::default();
        let stats = PartyStats {
            average_level: 27.0,
            party_size: 1,
        };
        assert_eq!(stats.table_level(), 20);
        let budget = xp_bounds(&stats, DifficultyLevel::Easy, &tables).unwrap();
        assert_eq!(budget.xp_upper_bound, 2800.0);
    }

    #[test]
    fn test_adjusted_xp_uses_multiplier() {
        let tables = EncounterTables::default();
        assert_eq!(adjusted_xp(&tables, 4, 300.0, 3), 600.0);
        assert_eq!(adjusted_xp(&tables, 4, 300.0, 1), 300.0);
    }
}
