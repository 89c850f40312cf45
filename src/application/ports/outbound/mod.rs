//! Outbound ports - Interfaces that the application requires from external systems

mod repository_port;
mod settings_port;

pub use repository_port::{EncounterRepositoryPort, RepositoryError, StoredEncounterBatch};
pub use settings_port::EncounterSettingsRepositoryPort;
