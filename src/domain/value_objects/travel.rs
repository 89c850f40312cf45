//! Travel conditions - Where, when, and how the party is travelling
//!
//! These are the inputs that drive encounter probability lookups and monster
//! filtering. Client payloads may send the literal string `"random"` (or
//! `null`) for any of them; both deserialize to `None`, meaning "unspecified".

use serde::{Deserialize, Deserializer, Serialize};

/// Terrestrial ecoregion used for probability lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Biome {
    #[serde(rename = "boreal forests/taiga")]
    BorealForestsTaiga,
    #[serde(rename = "deserts & xeric shrublands")]
    DesertsXericShrublands,
    #[serde(rename = "flooded grasslands & savannas")]
    FloodedGrasslandsSavannas,
    #[serde(rename = "mangroves")]
    Mangroves,
    #[serde(
        rename = "mediterranean forests, woodlands, & scrub",
        alias = "Mediterranean forests, woodlands, & scrub"
    )]
    MediterraneanForests,
    #[serde(rename = "montane grasslands & shrublands")]
    MontaneGrasslandsShrublands,
    #[serde(rename = "rock and ice")]
    RockAndIce,
    #[serde(rename = "temperate broadleaf & mixed forests")]
    TemperateBroadleafForests,
    #[serde(rename = "temperate conifer forests")]
    TemperateConiferForests,
    #[serde(rename = "temperate grasslands, savannas, & shrublands")]
    TemperateGrasslands,
    #[serde(rename = "tropical & subtropical coniferous forests")]
    TropicalConiferousForests,
    #[serde(rename = "tropical & subtropical dry broadleaf forests")]
    TropicalDryBroadleafForests,
    #[serde(rename = "tropical & subtropical grasslands, savannas & shrublands")]
    TropicalGrasslands,
    #[serde(rename = "tropical & subtropical moist broadleaf forests")]
    TropicalMoistBroadleafForests,
    #[serde(rename = "tundra", alias = "Tundra")]
    Tundra,
}

impl Biome {
    pub const ALL: [Biome; 15] = [
        Self::BorealForestsTaiga,
        Self::DesertsXericShrublands,
        Self::FloodedGrasslandsSavannas,
        Self::Mangroves,
        Self::MediterraneanForests,
        Self::MontaneGrasslandsShrublands,
        Self::RockAndIce,
        Self::TemperateBroadleafForests,
        Self::TemperateConiferForests,
        Self::TemperateGrasslands,
        Self::TropicalConiferousForests,
        Self::TropicalDryBroadleafForests,
        Self::TropicalGrasslands,
        Self::TropicalMoistBroadleafForests,
        Self::Tundra,
    ];

    /// The wire name, also used to match a monster's own biome tags
    pub fn name(&self) -> &'static str {
        match self {
            Self::BorealForestsTaiga => "boreal forests/taiga",
            Self::DesertsXericShrublands => "deserts & xeric shrublands",
            Self::FloodedGrasslandsSavannas => "flooded grasslands & savannas",
            Self::Mangroves => "mangroves",
            Self::MediterraneanForests => "mediterranean forests, woodlands, & scrub",
            Self::MontaneGrasslandsShrublands => "montane grasslands & shrublands",
            Self::RockAndIce => "rock and ice",
            Self::TemperateBroadleafForests => "temperate broadleaf & mixed forests",
            Self::TemperateConiferForests => "temperate conifer forests",
            Self::TemperateGrasslands => "temperate grasslands, savannas, & shrublands",
            Self::TropicalConiferousForests => "tropical & subtropical coniferous forests",
            Self::TropicalDryBroadleafForests => "tropical & subtropical dry broadleaf forests",
            Self::TropicalGrasslands => "tropical & subtropical grasslands, savannas & shrublands",
            Self::TropicalMoistBroadleafForests => "tropical & subtropical moist broadleaf forests",
            Self::Tundra => "tundra",
        }
    }

    /// Coarse habitat used when matching monsters. Many biomes share one habitat.
    ///
    /// Every grassland biome is grassland, including the flooded and montane ones.
    pub fn habitat(&self) -> Habitat {
        match self {
            Self::BorealForestsTaiga | Self::RockAndIce | Self::Tundra => Habitat::Arctic,
            Self::DesertsXericShrublands => Habitat::Desert,
            Self::Mangroves => Habitat::Swamp,
            Self::FloodedGrasslandsSavannas
            | Self::MontaneGrasslandsShrublands
            | Self::TemperateGrasslands
            | Self::TropicalGrasslands => Habitat::Grassland,
            Self::MediterraneanForests
            | Self::TemperateBroadleafForests
            | Self::TemperateConiferForests
            | Self::TropicalConiferousForests
            | Self::TropicalDryBroadleafForests
            | Self::TropicalMoistBroadleafForests => Habitat::Forest,
        }
    }
}

/// Monster habitat category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Habitat {
    Arctic,
    Desert,
    Forest,
    Grassland,
    Mountain,
    Swamp,
    Coastal,
    Underdark,
    Underwater,
}

impl Habitat {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Arctic => "arctic",
            Self::Desert => "desert",
            Self::Forest => "forest",
            Self::Grassland => "grassland",
            Self::Mountain => "mountain",
            Self::Swamp => "swamp",
            Self::Coastal => "coastal",
            Self::Underdark => "underdark",
            Self::Underwater => "underwater",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Day,
    Night,
}

impl TimeOfDay {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Night => "night",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Road {
    #[serde(rename = "no road")]
    NoRoad,
    #[serde(rename = "highway")]
    Highway,
    #[serde(rename = "byway")]
    Byway,
    #[serde(rename = "royalway")]
    Royalway,
    #[serde(rename = "bridleway")]
    Bridleway,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelPace {
    Slow,
    Normal,
    Fast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMedium {
    Ground,
    Air,
    Sea,
}

impl TravelMedium {
    /// Movement tag carried by monster records for this medium
    pub fn monster_tag(&self) -> &'static str {
        match self {
            Self::Ground => "land",
            Self::Air => "air",
            Self::Sea => "water",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    #[serde(alias = "autumn")]
    Fall,
    Winter,
}

#[derive(Deserialize)]
enum RandomMarker {
    #[serde(rename = "random")]
    Random,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RandomOr<T> {
    Random(RandomMarker),
    Value(T),
}

/// Deserialize an optional travel condition where `"random"` means unspecified
pub fn random_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<RandomOr<T>>::deserialize(deserializer)? {
        Some(RandomOr::Value(value)) => Some(value),
        Some(RandomOr::Random(RandomMarker::Random)) | None => None,
    })
}
