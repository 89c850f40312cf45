//! Aggregates - Cluster of domain objects treated as a single unit

pub mod encounter_batch;

pub use encounter_batch::{BatchOptions, EncounterAggregateRecord};
