//! Probability resolution - Final occurrence chance per encounter type
//!
//! Road and pace modifiers are relative: a modifier of -0.35 scales the base
//! chance by 0.65. They apply in sequence (road, then pace) and the result is
//! clamped to [0, 1].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::tables::EncounterTables;
use crate::domain::value_objects::{EncounterInstanceOptions, EncounterType};

/// Largest encounter count listed in a distribution preview
pub const MAX_DISTRIBUTION_COUNT: u32 = 20;

/// Clamp into [0, 1]; non-finite values become 0
pub fn clamp_probability(p: f64) -> f64 {
    if p.is_finite() {
        p.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

pub fn resolve_probability(base: f64, road_modifier: f64, pace_modifier: f64) -> f64 {
    let after_road = clamp_probability(base) * (1.0 + road_modifier);
    clamp_probability(after_road * (1.0 + pace_modifier))
}

/// Occurrence chance of each encounter type for one instance
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedProbabilities {
    pub non_combat: f64,
    pub combat: f64,
    pub hazard: f64,
    /// Sum of the three, capped at 1
    pub total: f64,
}

impl ResolvedProbabilities {
    pub fn for_type(&self, encounter_type: EncounterType) -> f64 {
        match encounter_type {
            EncounterType::NonCombat => self.non_combat,
            EncounterType::Combat => self.combat,
            EncounterType::Hazard => self.hazard,
        }
    }
}

/// Resolve all three types for an instance; `None` when the biome and time
/// have no base entry
pub fn resolve_instance(
    options: &EncounterInstanceOptions,
    tables: &EncounterTables,
) -> Option<ResolvedProbabilities> {
    let time = options.time_key();
    let base = tables.odds(options.biome, time)?;

    let resolve = |encounter_type| {
        resolve_probability(
            base.for_type(encounter_type),
            tables.road_modifier(options.road, time, encounter_type),
            tables.pace_modifier(options.travel_pace, time, encounter_type),
        )
    };
    let non_combat = resolve(EncounterType::NonCombat);
    let combat = resolve(EncounterType::Combat);
    let hazard = resolve(EncounterType::Hazard);

    Some(ResolvedProbabilities {
        non_combat,
        combat,
        hazard,
        total: (non_combat + combat + hazard).min(1.0),
    })
}

/// P(X >= k) for X ~ Binomial(n, p)
pub fn at_least(p: f64, k: u32, n: u32) -> f64 {
    if k > n {
        return 0.0;
    }
    if k == 0 {
        return 1.0;
    }
    if p <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 {
        return 1.0;
    }

    let below: f64 = (0..k)
        .map(|i| binomial_coefficient(n, i) * p.powi(i as i32) * (1.0 - p).powi((n - i) as i32))
        .sum();
    clamp_probability(1.0 - below)
}

fn binomial_coefficient(n: u32, k: u32) -> f64 {
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * f64::from(n - i) / f64::from(i + 1))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountProbability {
    pub count: u32,
    pub probability: f64,
}

/// Preview of how many encounters a batch is likely to produce.
///
/// The entry for count 0 is P(X = 0); every other entry is P(X >= count).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterDistribution {
    pub rolls: u32,
    pub cumulative: Vec<CountProbability>,
    pub by_type: BTreeMap<EncounterType, Vec<CountProbability>>,
}

/// Binomial preview over every roll of a batch, using the mean per-roll chance.
/// Instances without a base entry contribute rolls with zero chance.
pub fn probability_distribution(
    instances: &[EncounterInstanceOptions],
    tables: &EncounterTables,
) -> EncounterDistribution {
    let rolls: Vec<ResolvedProbabilities> = instances
        .iter()
        .flat_map(|instance| {
            let resolved = resolve_instance(instance, tables).unwrap_or_default();
            std::iter::repeat(resolved).take(instance.effective_quantity() as usize)
        })
        .collect();

    let n = rolls.len() as u32;
    let mean = |pick: fn(&ResolvedProbabilities) -> f64| -> f64 {
        if rolls.is_empty() {
            0.0
        } else {
            rolls.iter().map(pick).sum::<f64>() / rolls.len() as f64
        }
    };

    let series = |p: f64| -> Vec<CountProbability> {
        (0..=n.min(MAX_DISTRIBUTION_COUNT))
            .map(|count| CountProbability {
                count,
                probability: if count == 0 {
                    clamp_probability((1.0 - p).powi(n as i32))
                } else {
                    at_least(p, count, n)
                },
            })
            .collect()
    };

    let by_type = EncounterType::ALL
        .iter()
        .map(|t| {
            let p = match t {
                EncounterType::NonCombat => mean(|r| r.non_combat),
                EncounterType::Combat => mean(|r| r.combat),
                EncounterType::Hazard => mean(|r| r.hazard),
            };
            (*t, series(p))
        })
        .collect();

    EncounterDistribution {
        rolls: n,
        cumulative: series(mean(|r| r.total)),
        by_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Biome, Road, TimeOfDay, TravelPace};
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_relative_modifiers_multiply() {
        assert!(approx(resolve_probability(0.3, -0.5, 0.0), 0.15));
        assert!(approx(resolve_probability(0.2, 0.5, 0.5), 0.45));
        assert_eq!(resolve_probability(0.9, 1.0, 1.0), 1.0);
        assert_eq!(resolve_probability(0.5, -2.0, 0.0), 0.0);
        assert_eq!(resolve_probability(f64::NAN, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_resolve_instance_applies_road_then_pace() {
        let tables = EncounterTables::default();
        let options = EncounterInstanceOptions::new(Biome::Tundra)
            .with_time(TimeOfDay::Day)
            .with_road(Road::Highway)
            .with_pace(TravelPace::Fast);

        let resolved = resolve_instance(&options, &tables).unwrap();
        assert!(approx(resolved.combat, 0.21 * 0.65 * 1.2));
        assert!(approx(resolved.non_combat, 0.03 * 1.2 * 0.8));
        assert!(approx(resolved.hazard, 0.05 * 0.8 * 1.2));
        assert!(approx(
            resolved.total,
            resolved.combat + resolved.non_combat + resolved.hazard
        ));

        let unknown = EncounterInstanceOptions::default();
        assert!(resolve_instance(&unknown, &tables).is_none());
    }

    #[test]
    fn test_at_least_edges() {
        assert_eq!(at_least(0.5, 3, 2), 0.0);
        assert_eq!(at_least(0.5, 0, 2), 1.0);
        assert_eq!(at_least(0.0, 1, 2), 0.0);
        assert_eq!(at_least(1.0, 2, 2), 1.0);
        assert!(approx(at_least(0.5, 1, 2), 0.75));
        assert!(approx(at_least(0.5, 2, 2), 0.25));
    }

    #[test]
    fn test_distribution_counts_every_roll() {
        let tables = EncounterTables::default();
        let instances = vec![
            EncounterInstanceOptions::new(Biome::Tundra).with_quantity(3),
            EncounterInstanceOptions::new(Biome::Mangroves),
        ];
        let distribution = probability_distribution(&instances, &tables);

        assert_eq!(distribution.rolls, 4);
        assert_eq!(distribution.cumulative.len(), 5);
        assert_eq!(distribution.by_type.len(), 3);
        let json = serde_json::to_value(&distribution).unwrap();
        assert!(json["byType"]["non-combat"].is_array());
    }

    #[test]
    fn test_empty_batch_is_certain_zero() {
        let distribution = probability_distribution(&[], &EncounterTables::default());
        assert_eq!(distribution.rolls, 0);
        assert_eq!(
            distribution.cumulative,
            vec![CountProbability { count: 0, probability: 1.0 }]
        );
    }

    proptest! {
        #[test]
        fn prop_resolved_probability_is_clamped(
            p in -10.0f64..10.0,
            r in -100.0f64..100.0,
            c in -100.0f64..100.0,
        ) {
            let resolved = resolve_probability(p, r, c);
            prop_assert!((0.0..=1.0).contains(&resolved));
        }

        #[test]
        fn prop_at_least_is_a_probability(p in 0.0f64..=1.0, k in 0u32..30, n in 0u32..30) {
            let tail = at_least(p, k, n);
            prop_assert!((0.0..=1.0).contains(&tail));
        }
    }
}
