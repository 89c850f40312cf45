//! Encounter Generation Service - Batch orchestration over the domain services
//!
//! Each instance is resolved independently into an [`InstanceOutcome`] and the
//! outcomes are folded into a single [`EncounterAggregateRecord`], which is
//! saved for an owner or handed back inline.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument, warn};

use crate::application::dto::{GenerateEncounterInput, GenerateEncounterResponse};
use crate::application::ports::inbound::{
    GenerateEncountersUseCase, GenerationContext, GenerationError,
};
use crate::application::ports::outbound::{EncounterRepositoryPort, StoredEncounterBatch};
use crate::application::services::EncounterSettingsService;
use crate::domain::aggregates::EncounterAggregateRecord;
use crate::domain::entities::{GeneratedEncounter, MonsterRecord};
use crate::domain::services::{
    probability_distribution, resolve_instance, roll_occurrence, sample_difficulty,
    CompositionStrategy, EncounterComposer, EncounterDistribution, EncounterTables,
};
use crate::domain::value_objects::{
    DifficultyLevel, EncounterBatchId, EncounterInstanceOptions, EncounterType, GenerationMode,
    UserId,
};

/// What one instance contributed to a batch
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceOutcome {
    /// No base probabilities exist for the instance's biome and time
    Skipped,
    /// Rolls were made; the list may be empty
    Rolled(Vec<GeneratedEncounter>),
}

impl InstanceOutcome {
    pub fn into_encounters(self) -> Vec<GeneratedEncounter> {
        match self {
            Self::Skipped => Vec::new(),
            Self::Rolled(encounters) => encounters,
        }
    }
}

/// Compose a whole batch. Instances run in order and never fail the batch.
pub fn compose_batch<R: Rng>(
    input: &GenerateEncounterInput,
    tables: &EncounterTables,
    pool: &[MonsterRecord],
    rng: &mut R,
    created_at: DateTime<Utc>,
) -> EncounterAggregateRecord {
    let composer = EncounterComposer::new(tables, pool);
    input.instances().iter().fold(
        EncounterAggregateRecord::new(input.name.as_deref(), created_at),
        |mut record, instance| {
            let outcome = resolve_instance_outcome(instance, tables, &composer, rng);
            record.record_instance(instance.display_options(), outcome.into_encounters());
            record
        },
    )
}

/// Run every repetition of one instance
pub fn resolve_instance_outcome<R: Rng>(
    options: &EncounterInstanceOptions,
    tables: &EncounterTables,
    composer: &EncounterComposer<'_>,
    rng: &mut R,
) -> InstanceOutcome {
    let repetitions = options.effective_quantity();

    match options.mode() {
        GenerationMode::Guaranteed {
            encounter_type,
            difficulty,
        } => InstanceOutcome::Rolled(
            (0..repetitions)
                .map(|_| build_encounter(options, encounter_type, difficulty, composer, rng))
                .collect(),
        ),
        GenerationMode::Rolled {
            encounter_type,
            difficulty,
        } => {
            let Some(resolved) = resolve_instance(options, tables) else {
                debug!(biome = ?options.biome, "No base probabilities, instance skipped");
                return InstanceOutcome::Skipped;
            };

            let in_scope: Vec<EncounterType> = match encounter_type {
                Some(requested) => vec![requested],
                None => EncounterType::ALL.to_vec(),
            };
            let weights = tables.difficulty_weights(options.time_key());

            let mut encounters = Vec::new();
            for _ in 0..repetitions {
                for encounter_type in &in_scope {
                    let probability = resolved.for_type(*encounter_type);
                    if !roll_occurrence(probability, rng) {
                        continue;
                    }
                    let difficulty =
                        difficulty.unwrap_or_else(|| sample_difficulty(&weights, rng));
                    debug!(
                        encounter_type = %encounter_type.name(),
                        difficulty = %difficulty.name(),
                        probability,
                        "Encounter rolled"
                    );
                    encounters.push(build_encounter(
                        options,
                        *encounter_type,
                        difficulty,
                        composer,
                        rng,
                    ));
                }
            }
            InstanceOutcome::Rolled(encounters)
        }
    }
}

fn build_encounter<R: Rng>(
    options: &EncounterInstanceOptions,
    encounter_type: EncounterType,
    difficulty: DifficultyLevel,
    composer: &EncounterComposer<'_>,
    rng: &mut R,
) -> GeneratedEncounter {
    if encounter_type != EncounterType::Combat {
        return GeneratedEncounter::not_implemented(encounter_type, difficulty);
    }

    match composer.compose(options, difficulty, rng) {
        Ok(composition) => {
            match composition.strategy {
                Some(CompositionStrategy::Simple) => warn!(
                    candidates = composition.candidates,
                    "Monster pool has no hierarchy data, using simple composition"
                ),
                Some(CompositionStrategy::LeaderFallback) => warn!(
                    candidates = composition.candidates,
                    "No leader candidate, using a random monster"
                ),
                _ => {}
            }
            composition.encounter
        }
        Err(e) => {
            warn!(error = %e, difficulty = %difficulty.name(), "Combat composition failed");
            GeneratedEncounter::generation_failed(difficulty, &e.to_string())
        }
    }
}

/// Default implementation backed by the encounter and settings repositories
pub struct EncounterGenerationServiceImpl {
    repository: Arc<dyn EncounterRepositoryPort>,
    settings: Arc<EncounterSettingsService>,
    monsters: Arc<[MonsterRecord]>,
    default_seed: Option<u64>,
}

impl EncounterGenerationServiceImpl {
    pub fn new(
        repository: Arc<dyn EncounterRepositoryPort>,
        settings: Arc<EncounterSettingsService>,
        monsters: Arc<[MonsterRecord]>,
    ) -> Self {
        Self {
            repository,
            settings,
            monsters,
            default_seed: None,
        }
    }

    /// Seed used when a request does not carry its own
    pub fn with_default_seed(mut self, seed: Option<u64>) -> Self {
        self.default_seed = seed;
        self
    }

    async fn tables(&self, context: &GenerationContext) -> Result<EncounterTables, GenerationError> {
        if let Some(settings) = &context.settings {
            return Ok(self.settings.tables_with(settings));
        }
        match context.user_id {
            Some(user) => Ok(self.settings.tables_for(user).await?),
            None => Ok(self.settings.defaults().clone()),
        }
    }

    fn rng(&self, seed: Option<u64>) -> StdRng {
        match seed.or(self.default_seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[async_trait]
impl GenerateEncountersUseCase for EncounterGenerationServiceImpl {
    #[instrument(skip(self, input, context), fields(instances = input.instances().len(), user = ?context.user_id))]
    async fn generate(
        &self,
        input: GenerateEncounterInput,
        context: GenerationContext,
    ) -> Result<GenerateEncounterResponse, GenerationError> {
        input.validate().map_err(GenerationError::InvalidInput)?;

        let tables = self.tables(&context).await?;
        let record = {
            let mut rng = self.rng(context.seed);
            compose_batch(&input, &tables, &self.monsters, &mut rng, Utc::now())
        };
        info!(
            encounters = record.encounter_count(),
            instances = record.options().quantity,
            "Encounter batch composed"
        );

        match context.user_id {
            Some(owner) => {
                let id = self.repository.save_batch(owner, &record).await?;
                info!(batch_id = %id, "Encounter batch saved");
                Ok(GenerateEncounterResponse::Saved { id })
            }
            None => Ok(GenerateEncounterResponse::Ephemeral { encounter: record }),
        }
    }

    #[instrument(skip(self, instances, context), fields(instances = instances.len()))]
    async fn preview(
        &self,
        instances: Vec<EncounterInstanceOptions>,
        context: GenerationContext,
    ) -> Result<EncounterDistribution, GenerationError> {
        let tables = self.tables(&context).await?;
        Ok(probability_distribution(&instances, &tables))
    }

    async fn get_batch(
        &self,
        id: EncounterBatchId,
    ) -> Result<Option<StoredEncounterBatch>, GenerationError> {
        Ok(self.repository.get(id).await?)
    }

    async fn list_batches(
        &self,
        owner: UserId,
    ) -> Result<Vec<StoredEncounterBatch>, GenerationError> {
        Ok(self.repository.list_by_owner(owner).await?)
    }
}
