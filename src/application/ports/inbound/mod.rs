//! Inbound ports - Interfaces that the application exposes to the outside world

pub mod use_cases;

pub use use_cases::{GenerateEncountersUseCase, GenerationContext, GenerationError};
