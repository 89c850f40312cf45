//! Encounter composer - Turn a filtered monster pool into a concrete combat
//!
//! Two strategies exist. When any monster in the filtered pool declares
//! followers, lieutenants, sergeants or minions, a leader is chosen near the
//! party's average level and its entourage is added rank by rank within the
//! XP budget. Otherwise a single monster is repeated to fill the budget.
//!
//! Relation references are resolved against the full monster pool, not the
//! filtered one, so an entourage may include creatures outside the terrain
//! filter.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use super::budget::{adjusted_xp, party_stats, xp_bounds, PartyStats};
use super::monster_filter::{filter_monsters, MonsterCriteria};
use super::tables::{EncounterTables, MAX_MULTIPLIER_CREATURES};
use crate::domain::entities::{
    EncounterMonster, GeneratedEncounter, MonsterIndex, MonsterRecord, RelationRank, XpBudget,
    XpTally,
};
use crate::domain::value_objects::{DifficultyLevel, EncounterInstanceOptions};

/// Most copies the simple strategy places of one monster
pub const MAX_SIMPLE_QUANTITY: u32 = MAX_MULTIPLIER_CREATURES;

const LEADER_LABEL: &str = "leader";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompositionError {
    #[error("monster {name} has no challenge rating")]
    MissingChallengeRating { name: String },
    #[error("no XP threshold for level {level} at {difficulty} difficulty")]
    MissingThreshold {
        level: u32,
        difficulty: DifficultyLevel,
    },
}

/// How a composed encounter was built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionStrategy {
    /// A leader expanded into its entourage
    LeaderFollower,
    /// The pool had hierarchy data but no usable leader; one random monster
    LeaderFallback,
    /// The pool had no hierarchy data; one monster repeated
    Simple,
}

/// Result of composing one combat encounter
#[derive(Debug, Clone, PartialEq)]
pub struct CombatComposition {
    pub encounter: GeneratedEncounter,
    /// `None` when no monsters were composed
    pub strategy: Option<CompositionStrategy>,
    pub candidates: usize,
}

/// Stateless combat composer over one monster pool and table set
pub struct EncounterComposer<'a> {
    tables: &'a EncounterTables,
    pool: &'a [MonsterRecord],
    index: MonsterIndex<'a>,
}

impl<'a> EncounterComposer<'a> {
    pub fn new(tables: &'a EncounterTables, pool: &'a [MonsterRecord]) -> Self {
        Self {
            tables,
            pool,
            index: MonsterIndex::new(pool),
        }
    }

    /// Compose a combat encounter for one instance at one difficulty.
    ///
    /// Returns the "no party specified" stub without filtering when the
    /// instance has no party, and the "no suitable monsters" marker when the
    /// filter leaves nothing.
    pub fn compose<R: Rng>(
        &self,
        options: &EncounterInstanceOptions,
        difficulty: DifficultyLevel,
        rng: &mut R,
    ) -> Result<CombatComposition, CompositionError> {
        let stats = party_stats(options.party.as_ref());
        if stats.is_no_party() {
            return Ok(CombatComposition {
                encounter: GeneratedEncounter::no_party_specified(difficulty),
                strategy: None,
                candidates: 0,
            });
        }

        let budget = xp_bounds(&stats, difficulty, self.tables)?;
        let criteria = MonsterCriteria::for_instance(options, budget.xp_upper_bound);
        let filtered = filter_monsters(self.pool, &criteria);
        if filtered.is_empty() {
            return Ok(CombatComposition {
                encounter: GeneratedEncounter::no_suitable_monsters(difficulty, budget),
                strategy: None,
                candidates: 0,
            });
        }

        let draft = if filtered.iter().any(|m| m.has_hierarchy()) {
            self.compose_leader_follower(&filtered, &stats, &budget, rng)?
        } else {
            self.compose_simple(&filtered, &stats, &budget, rng)?
        };

        let tally = draft.tally(self.tables, stats.party_size);
        Ok(CombatComposition {
            encounter: GeneratedEncounter::composed(difficulty, draft.monsters(), budget, tally),
            strategy: Some(draft.strategy),
            candidates: filtered.len(),
        })
    }

    fn compose_leader_follower<R: Rng>(
        &self,
        filtered: &[&'a MonsterRecord],
        stats: &PartyStats,
        budget: &XpBudget,
        rng: &mut R,
    ) -> Result<Draft<'a>, CompositionError> {
        let Some(leader) = select_leader(filtered, stats.average_level, rng) else {
            let Some(pick) = filtered.choose(rng).copied() else {
                return Ok(Draft::new(CompositionStrategy::LeaderFallback));
            };
            let mut draft = Draft::new(CompositionStrategy::LeaderFallback);
            draft.push(pick, monster_xp(pick)?, 1, Some(LEADER_LABEL));
            return Ok(draft);
        };

        let mut draft = Draft::new(CompositionStrategy::LeaderFollower);
        draft.push(leader, monster_xp(leader)?, 1, Some(LEADER_LABEL));

        let mut visited = HashSet::from([leader.identity()]);
        for rank in RelationRank::EXPANSION_ORDER {
            if draft.adjusted_xp(self.tables, stats.party_size) >= budget.xp_lower_bound {
                break;
            }

            let mut references: Vec<&'a MonsterRecord> = leader
                .relations(rank)
                .iter()
                .filter_map(|name| self.index.resolve(name))
                .filter(|m| !visited.contains(&m.identity()))
                .collect();
            references.shuffle(rng);

            // first reference that fits joins; the rest of the rank is left alone
            for member in references {
                if !visited.insert(member.identity()) {
                    continue;
                }
                let xp = member.xp();
                if xp <= 0.0 {
                    continue;
                }

                let copies = draft.copies_within_budget(self.tables, stats.party_size, xp, budget);
                if copies > 0 {
                    draft.push(member, xp, copies, Some(rank.label()));
                    break;
                }
            }
        }

        Ok(draft)
    }

    fn compose_simple<R: Rng>(
        &self,
        filtered: &[&'a MonsterRecord],
        stats: &PartyStats,
        budget: &XpBudget,
        rng: &mut R,
    ) -> Result<Draft<'a>, CompositionError> {
        let mut draft = Draft::new(CompositionStrategy::Simple);
        let Some(pick) = filtered.choose(rng).copied() else {
            return Ok(draft);
        };
        let xp = monster_xp(pick)?;

        let mut quantity = 1;
        while quantity < MAX_SIMPLE_QUANTITY
            && adjusted_xp(self.tables, stats.party_size, xp * f64::from(quantity + 1), quantity + 1)
                <= budget.xp_upper_bound
        {
            quantity += 1;
        }

        draft.push(pick, xp, quantity, None);
        Ok(draft)
    }
}

/// Leader candidates are monsters with an entourage and a known rating.
/// The candidate nearest the party's average level wins; ties break at random.
fn select_leader<'a, R: Rng>(
    filtered: &[&'a MonsterRecord],
    average_level: f64,
    rng: &mut R,
) -> Option<&'a MonsterRecord> {
    let scored: Vec<(f64, &'a MonsterRecord)> = filtered
        .iter()
        .filter(|m| m.has_hierarchy())
        .filter_map(|m| m.cr.map(|cr| ((cr.value() - average_level).abs(), *m)))
        .collect();

    let nearest = scored
        .iter()
        .map(|(distance, _)| *distance)
        .min_by(f64::total_cmp)?;
    let tied: Vec<&'a MonsterRecord> = scored
        .iter()
        .filter(|(distance, _)| (distance - nearest).abs() < f64::EPSILON)
        .map(|(_, m)| *m)
        .collect();
    tied.choose(rng).copied()
}

fn monster_xp(monster: &MonsterRecord) -> Result<f64, CompositionError> {
    monster
        .cr
        .map(|cr| cr.xp())
        .ok_or_else(|| CompositionError::MissingChallengeRating {
            name: monster.name.clone(),
        })
}

struct DraftEntry<'a> {
    monster: &'a MonsterRecord,
    xp: f64,
    quantity: u32,
    label: Option<&'static str>,
}

/// Monsters selected so far
struct Draft<'a> {
    strategy: CompositionStrategy,
    entries: Vec<DraftEntry<'a>>,
}

impl<'a> Draft<'a> {
    fn new(strategy: CompositionStrategy) -> Self {
        Self {
            strategy,
            entries: Vec::new(),
        }
    }

    fn push(
        &mut self,
        monster: &'a MonsterRecord,
        xp: f64,
        quantity: u32,
        label: Option<&'static str>,
    ) {
        self.entries.push(DraftEntry {
            monster,
            xp,
            quantity,
            label,
        });
    }

    fn total_xp(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.xp * f64::from(e.quantity))
            .sum()
    }

    fn creature_count(&self) -> u32 {
        self.entries.iter().map(|e| e.quantity).sum()
    }

    fn adjusted_xp(&self, tables: &EncounterTables, party_size: u32) -> f64 {
        adjusted_xp(tables, party_size, self.total_xp(), self.creature_count())
    }

    /// Copies of a creature worth `xp` that can join without the adjusted
    /// total exceeding the upper bound. Stops early once the lower bound is met.
    fn copies_within_budget(
        &self,
        tables: &EncounterTables,
        party_size: u32,
        xp: f64,
        budget: &XpBudget,
    ) -> u32 {
        let base_xp = self.total_xp();
        let base_count = self.creature_count();
        let mut copies = 0;
        loop {
            let next = copies + 1;
            let adjusted = adjusted_xp(
                tables,
                party_size,
                base_xp + xp * f64::from(next),
                base_count + next,
            );
            if adjusted > budget.xp_upper_bound {
                return copies;
            }
            copies = next;
            if adjusted >= budget.xp_lower_bound {
                return copies;
            }
        }
    }

    fn tally(&self, tables: &EncounterTables, party_size: u32) -> XpTally {
        let total_xp = self.total_xp();
        XpTally {
            adjusted_xp: self.adjusted_xp(tables, party_size),
            total_xp,
            xp_per_pc: total_xp / f64::from(party_size.max(1)),
            number_of_creatures: self.creature_count(),
        }
    }

    fn monsters(&self) -> Vec<EncounterMonster> {
        self.entries
            .iter()
            .map(|e| EncounterMonster {
                name: e.monster.name.clone(),
                cr: e.monster.cr,
                cr_text: e
                    .monster
                    .cr_text
                    .clone()
                    .or_else(|| e.monster.cr.map(|cr| cr.to_text())),
                quantity: e.quantity,
                url: e.monster.url.clone(),
                label: e.label.map(str::to_string),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::EncounterStatus;
    use crate::domain::value_objects::{
        Biome, ChallengeRating, EncounterType, PartyComposition, PartyMember,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn monster(name: &str, cr: f64) -> MonsterRecord {
        MonsterRecord::new(name, ChallengeRating::new(cr)).with_habitat("forest")
    }

    fn party(level: u32, quantity: u32) -> PartyComposition {
        PartyComposition::new(vec![PartyMember::new(level, quantity)])
    }

    fn forest(level: u32, quantity: u32) -> EncounterInstanceOptions {
        EncounterInstanceOptions::new(Biome::TemperateBroadleafForests)
            .with_party(party(level, quantity))
    }

    fn goblin_band() -> Vec<MonsterRecord> {
        vec![
            monster("Goblin Boss", 1.0)
                .with_relation(RelationRank::Lieutenant, "Hobgoblin")
                .with_relation(RelationRank::Minion, "Goblin")
                .with_relation(RelationRank::Minion, "Nowhere Imp"),
            monster("Hobgoblin", 0.5),
            monster("Goblin", 0.25),
            monster("Hill Giant", 5.0),
        ]
    }

    #[test]
    fn test_no_party_short_circuits() {
        let tables = EncounterTables::default();
        let pool = goblin_band();
        let composer = EncounterComposer::new(&tables, &pool);
        let mut rng = StdRng::seed_from_u64(1);

        let options = EncounterInstanceOptions::new(Biome::Tundra);
        let result = composer.compose(&options, DifficultyLevel::Hard, &mut rng).unwrap();
        assert_eq!(result.encounter.status, EncounterStatus::NoPartySpecified);
        assert!(result.encounter.monsters.is_empty());
        assert!(result.encounter.budget.is_none());
    }

    #[test]
    fn test_empty_pool_gives_marker() {
        let tables = EncounterTables::default();
        let pool = vec![monster("Ancient Red Dragon", 24.0)];
        let composer = EncounterComposer::new(&tables, &pool);
        let mut rng = StdRng::seed_from_u64(1);

        let result = composer
            .compose(&forest(3, 4), DifficultyLevel::Easy, &mut rng)
            .unwrap();
        assert_eq!(result.encounter.status, EncounterStatus::NoSuitableMonsters);
        assert!(result.encounter.monsters.is_empty());
        assert_eq!(result.encounter.encounter_type, EncounterType::Combat);
    }

    #[test]
    fn test_leader_expands_in_rank_order() {
        let tables = EncounterTables::default();
        let pool = goblin_band();
        let composer = EncounterComposer::new(&tables, &pool);
        let mut rng = StdRng::seed_from_u64(42);

        // level 1 x4, deadly: 300..400
        let result = composer
            .compose(&forest(1, 4), DifficultyLevel::Deadly, &mut rng)
            .unwrap();
        assert_eq!(result.strategy, Some(CompositionStrategy::LeaderFollower));

        // a hobgoblin would push the pair to 450; one goblin lands at 375
        let encounter = result.encounter;
        let names: Vec<(&str, Option<&str>)> = encounter
            .monsters
            .iter()
            .map(|m| (m.name.as_str(), m.label.as_deref()))
            .collect();
        assert_eq!(
            names,
            vec![("Goblin Boss", Some("leader")), ("Goblin", Some("minion"))]
        );

        let tally = encounter.tally.unwrap();
        assert_eq!(tally.total_xp, 250.0);
        assert_eq!(tally.adjusted_xp, 375.0);
        assert_eq!(tally.xp_per_pc, 62.5);
        assert_eq!(tally.number_of_creatures, 2);
    }

    #[test]
    fn test_oversized_lieutenant_does_not_block_the_rank() {
        let tables = EncounterTables::default();
        let pool = vec![
            monster("Warchief", 1.0)
                .with_relation(RelationRank::Lieutenant, "Ogre")
                .with_relation(RelationRank::Lieutenant, "Goblin"),
            monster("Ogre", 2.0),
            monster("Goblin", 0.25),
        ];
        let composer = EncounterComposer::new(&tables, &pool);

        // level 1 x4, deadly: 300..400; an ogre would reach 975, a goblin 375
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = composer
                .compose(&forest(1, 4), DifficultyLevel::Deadly, &mut rng)
                .unwrap();
            let names: Vec<(&str, Option<&str>)> = result
                .encounter
                .monsters
                .iter()
                .map(|m| (m.name.as_str(), m.label.as_deref()))
                .collect();
            assert_eq!(
                names,
                vec![("Warchief", Some("leader")), ("Goblin", Some("lieutenant"))],
                "seed {}",
                seed
            );
            assert_eq!(result.encounter.tally.unwrap().adjusted_xp, 375.0);
        }
    }

    #[test]
    fn test_leader_alone_when_already_in_budget() {
        let tables = EncounterTables::default();
        let pool = goblin_band();
        let composer = EncounterComposer::new(&tables, &pool);
        let mut rng = StdRng::seed_from_u64(42);

        // level 1 x4, medium: 100..200, the boss alone is worth 200
        let result = composer
            .compose(&forest(1, 4), DifficultyLevel::Medium, &mut rng)
            .unwrap();
        assert_eq!(result.encounter.monsters.len(), 1);
        assert_eq!(result.encounter.tally.unwrap().adjusted_xp, 200.0);
    }

    #[test]
    fn test_leader_nearest_to_average_level() {
        let tables = EncounterTables::default();
        let pool = vec![
            monster("Bandit Captain", 2.0).with_relation(RelationRank::Follower, "Bandit"),
            monster("Bandit Warlord", 4.0).with_relation(RelationRank::Follower, "Bandit"),
            monster("Bandit Lord", 8.0).with_relation(RelationRank::Follower, "Bandit"),
            monster("Bandit", 0.125),
        ];
        let composer = EncounterComposer::new(&tables, &pool);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = composer
                .compose(&forest(5, 4), DifficultyLevel::Deadly, &mut rng)
                .unwrap();
            assert_eq!(result.encounter.monsters[0].name, "Bandit Warlord");
        }
    }

    #[test]
    fn test_unrated_leaders_fall_back_to_a_random_monster() {
        let tables = EncounterTables::default();
        let pool = vec![
            MonsterRecord::new("Cult Fanatic", None)
                .with_relation(RelationRank::Follower, "Cultist"),
            monster("Cultist", 0.125),
        ];
        let composer = EncounterComposer::new(&tables, &pool);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            match composer.compose(&forest(3, 4), DifficultyLevel::Medium, &mut rng) {
                Ok(result) => {
                    assert_eq!(result.strategy, Some(CompositionStrategy::LeaderFallback));
                    assert_eq!(result.encounter.monsters.len(), 1);
                    assert_eq!(result.encounter.monsters[0].name, "Cultist");
                    assert_eq!(result.encounter.monsters[0].label.as_deref(), Some("leader"));
                }
                Err(err) => {
                    assert!(matches!(err, CompositionError::MissingChallengeRating { .. }));
                }
            }
        }
    }

    #[test]
    fn test_self_reference_is_not_expanded() {
        let tables = EncounterTables::default();
        let pool = vec![monster("Mirror Knight", 1.0)
            .with_relation(RelationRank::Follower, "mirror knight")
            .with_relation(RelationRank::Minion, "Mirror Knight")];
        let composer = EncounterComposer::new(&tables, &pool);
        let mut rng = StdRng::seed_from_u64(9);

        let result = composer
            .compose(&forest(5, 4), DifficultyLevel::Hard, &mut rng)
            .unwrap();
        assert_eq!(result.encounter.monsters.len(), 1);
        assert_eq!(result.encounter.number_of_creatures(), 1);
    }

    #[test]
    fn test_simple_strategy_fills_budget() {
        let tables = EncounterTables::default();
        let pool = vec![monster("Wolf", 0.25)];
        let composer = EncounterComposer::new(&tables, &pool);
        let mut rng = StdRng::seed_from_u64(5);

        // level 3 x4, medium: upper 600; wolves 50 XP each
        let result = composer
            .compose(&forest(3, 4), DifficultyLevel::Medium, &mut rng)
            .unwrap();
        assert_eq!(result.strategy, Some(CompositionStrategy::Simple));
        let wolves = &result.encounter.monsters[0];
        assert_eq!(wolves.label, None);
        // 6 wolves: 300 XP x2 = 600; 7 wolves: 350 x2.5 = 875
        assert_eq!(wolves.quantity, 6);
        assert_eq!(result.encounter.tally.unwrap().adjusted_xp, 600.0);
    }

    #[test]
    fn test_simple_strategy_keeps_one_when_over_budget() {
        let tables = EncounterTables::default();
        let pool = vec![MonsterRecord::new("Ogre", ChallengeRating::new(2.0))];
        let composer = EncounterComposer::new(&tables, &pool);
        let mut rng = StdRng::seed_from_u64(5);

        // level 2 x2, absurd: upper 500 admits one 450 XP ogre
        let result = composer
            .compose(&forest(2, 2), DifficultyLevel::Absurd, &mut rng)
            .unwrap();
        assert_eq!(result.encounter.monsters[0].quantity, 1);
        assert!(result.encounter.tally.unwrap().adjusted_xp > 500.0);
    }

    #[test]
    fn test_missing_rating_is_an_error() {
        let tables = EncounterTables::default();
        let pool = vec![MonsterRecord::new("Shapeless Thing", None)];
        let composer = EncounterComposer::new(&tables, &pool);
        let mut rng = StdRng::seed_from_u64(5);

        let err = composer
            .compose(&forest(3, 4), DifficultyLevel::Medium, &mut rng)
            .unwrap_err();
        assert!(matches!(err, CompositionError::MissingChallengeRating { .. }));
    }

    #[test]
    fn test_fixed_seed_is_deterministic() {
        let tables = EncounterTables::default();
        let pool = goblin_band();
        let composer = EncounterComposer::new(&tables, &pool);

        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            composer
                .compose(&forest(2, 3), DifficultyLevel::Hard, &mut rng)
                .unwrap()
                .encounter
        };
        assert_eq!(run(77), run(77));
    }
}
