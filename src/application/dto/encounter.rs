use serde::{Deserialize, Serialize};

use crate::domain::aggregates::EncounterAggregateRecord;
use crate::domain::value_objects::{
    EncounterBatchId, EncounterInstanceOptions, EncounterSettings, UserId,
};

/// A single value or a list of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }

    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        }
    }
}

// ============================================================================
// Generation input/output
// ============================================================================

/// Input to one generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateEncounterInput {
    #[serde(default)]
    pub name: Option<String>,
    pub options: OneOrMany<EncounterInstanceOptions>,
    /// Accepted for compatibility; repetitions are set per instance
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl GenerateEncounterInput {
    pub fn new(options: Vec<EncounterInstanceOptions>) -> Self {
        Self {
            name: None,
            options: OneOrMany::Many(options),
            quantity: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn instances(&self) -> &[EncounterInstanceOptions] {
        self.options.as_slice()
    }

    /// Check every instance's party before any generation work
    pub fn validate(&self) -> Result<(), String> {
        if self.instances().is_empty() {
            return Err("At least one encounter instance is required".to_string());
        }
        for (index, instance) in self.instances().iter().enumerate() {
            if let Some(party) = &instance.party {
                party
                    .validate()
                    .map_err(|e| format!("Instance {}: {}", index + 1, e))?;
            }
        }
        Ok(())
    }
}

/// Saved batches return their id; everything else comes back inline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerateEncounterResponse {
    Saved { id: EncounterBatchId },
    Ephemeral { encounter: EncounterAggregateRecord },
}

// ============================================================================
// Request DTOs (HTTP layer)
// ============================================================================

/// Body of `POST /api/encounters/generate`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateEncounterRequestDto {
    #[serde(default)]
    pub name: Option<String>,
    pub options: OneOrMany<EncounterInstanceOptions>,
    #[serde(default)]
    pub quantity: Option<u32>,
    /// Owner to save the batch for; omitted means the result is not stored
    #[serde(default)]
    pub user_id: Option<UserId>,
    /// Seed for reproducible output
    #[serde(default)]
    pub seed: Option<u64>,
    /// Replaces the user's stored settings for this call only
    #[serde(default)]
    pub settings: Option<EncounterSettings>,
}

impl GenerateEncounterRequestDto {
    pub fn input(&self) -> GenerateEncounterInput {
        GenerateEncounterInput {
            name: self.name.clone(),
            options: self.options.clone(),
            quantity: self.quantity,
        }
    }
}

/// Body of `POST /api/encounters/probabilities`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbabilityPreviewRequestDto {
    pub options: OneOrMany<EncounterInstanceOptions>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub settings: Option<EncounterSettings>,
}
