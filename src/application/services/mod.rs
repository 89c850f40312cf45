//! Application services - Use case implementations
//!
//! Services accept repository ports and the shared monster catalog, and
//! return domain aggregates or DTOs.

pub mod encounter_generation_service;
pub mod settings_service;

pub use encounter_generation_service::{
    compose_batch, resolve_instance_outcome, EncounterGenerationServiceImpl, InstanceOutcome,
};
pub use settings_service::EncounterSettingsService;
