//! Monster entity - A creature that can appear in a combat encounter
//!
//! Monster records come from an imported bestiary. Relation lists
//! (`FOLLOWERS`, `LIEUTENANTS`, `SERGEANTS`, `MINIONS`) reference other
//! records by name and describe a themed command hierarchy.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::value_objects::ChallengeRating;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterRecord {
    pub name: String,
    /// Unparsable ratings are kept as `None` so one bad row never rejects the catalog
    #[serde(default, deserialize_with = "lenient_challenge_rating")]
    pub cr: Option<ChallengeRating>,
    #[serde(default, rename = "crText", alias = "cr_text", skip_serializing_if = "Option::is_none")]
    pub cr_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub habitat: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub biome: Vec<String>,
    #[serde(default, alias = "timeOfDay", deserialize_with = "one_or_many")]
    pub time_of_day: Vec<String>,
    #[serde(default, rename = "travelMedium", alias = "travel_medium", deserialize_with = "one_or_many")]
    pub travel_medium: Vec<String>,
    #[serde(default, rename = "FOLLOWERS", deserialize_with = "one_or_many")]
    pub followers: Vec<String>,
    #[serde(default, rename = "LIEUTENANTS", deserialize_with = "one_or_many")]
    pub lieutenants: Vec<String>,
    #[serde(default, rename = "SERGEANTS", deserialize_with = "one_or_many")]
    pub sergeants: Vec<String>,
    #[serde(default, rename = "MINIONS", deserialize_with = "one_or_many")]
    pub minions: Vec<String>,
}

impl MonsterRecord {
    pub fn new(name: impl Into<String>, cr: Option<ChallengeRating>) -> Self {
        Self {
            name: name.into(),
            cr,
            cr_text: cr.map(|c| c.to_text()),
            url: None,
            habitat: Vec::new(),
            biome: Vec::new(),
            time_of_day: Vec::new(),
            travel_medium: Vec::new(),
            followers: Vec::new(),
            lieutenants: Vec::new(),
            sergeants: Vec::new(),
            minions: Vec::new(),
        }
    }

    pub fn with_habitat(mut self, habitat: impl Into<String>) -> Self {
        self.habitat.push(habitat.into());
        self
    }

    pub fn with_time_of_day(mut self, time: impl Into<String>) -> Self {
        self.time_of_day.push(time.into());
        self
    }

    pub fn with_travel_medium(mut self, medium: impl Into<String>) -> Self {
        self.travel_medium.push(medium.into());
        self
    }

    pub fn with_relation(mut self, rank: RelationRank, name: impl Into<String>) -> Self {
        let name = name.into();
        match rank {
            RelationRank::Follower => self.followers.push(name),
            RelationRank::Lieutenant => self.lieutenants.push(name),
            RelationRank::Sergeant => self.sergeants.push(name),
            RelationRank::Minion => self.minions.push(name),
        }
        self
    }

    /// Case-insensitive identity used by relation references
    pub fn identity(&self) -> String {
        identity_of(&self.name)
    }

    /// XP from the challenge rating; an unrated monster is worth nothing
    pub fn xp(&self) -> f64 {
        self.cr.map(|cr| cr.xp()).unwrap_or(0.0)
    }

    pub fn relations(&self, rank: RelationRank) -> &[String] {
        match rank {
            RelationRank::Follower => &self.followers,
            RelationRank::Lieutenant => &self.lieutenants,
            RelationRank::Sergeant => &self.sergeants,
            RelationRank::Minion => &self.minions,
        }
    }

    /// Whether this monster can anchor a leader-follower encounter
    pub fn has_hierarchy(&self) -> bool {
        RelationRank::EXPANSION_ORDER
            .iter()
            .any(|rank| !self.relations(*rank).is_empty())
    }
}

fn identity_of(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Rank of a related creature beneath an encounter leader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationRank {
    Follower,
    Lieutenant,
    Sergeant,
    Minion,
}

impl RelationRank {
    /// Order in which a leader's entourage is added to an encounter
    pub const EXPANSION_ORDER: [RelationRank; 4] =
        [Self::Follower, Self::Lieutenant, Self::Sergeant, Self::Minion];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Follower => "follower",
            Self::Lieutenant => "lieutenant",
            Self::Sergeant => "sergeant",
            Self::Minion => "minion",
        }
    }
}

/// Lookup from monster identity to record. The first record wins on duplicate names.
#[derive(Debug)]
pub struct MonsterIndex<'a> {
    by_identity: HashMap<String, &'a MonsterRecord>,
}

impl<'a> MonsterIndex<'a> {
    pub fn new(monsters: &'a [MonsterRecord]) -> Self {
        let mut by_identity = HashMap::with_capacity(monsters.len());
        for monster in monsters {
            by_identity.entry(monster.identity()).or_insert(monster);
        }
        Self { by_identity }
    }

    pub fn resolve(&self, name: &str) -> Option<&'a MonsterRecord> {
        self.by_identity.get(&identity_of(name)).copied()
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<Option<String>>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(value)) if !value.trim().is_empty() => vec![value],
        Some(OneOrMany::Many(values)) => values
            .into_iter()
            .flatten()
            .filter(|v| !v.trim().is_empty())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_challenge_rating<'de, D>(deserializer: D) -> Result<Option<ChallengeRating>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => ChallengeRating::new(n),
        Some(Raw::Text(t)) => ChallengeRating::parse(&t),
        Some(Raw::Other(_)) | None => None,
    })
}
