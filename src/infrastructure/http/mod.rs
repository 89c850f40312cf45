//! HTTP REST API routes

mod encounter_routes;
mod settings_routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

pub use encounter_routes::*;
pub use settings_routes::*;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Encounter routes
        .route(
            "/api/encounters/generate",
            post(encounter_routes::generate_encounters),
        )
        .route(
            "/api/encounters/probabilities",
            post(encounter_routes::preview_probabilities),
        )
        .route(
            "/api/encounters/{id}",
            get(encounter_routes::get_encounter_batch),
        )
        .route(
            "/api/users/{user_id}/encounters",
            get(encounter_routes::list_user_encounters),
        )
        // Settings routes
        .route(
            "/api/users/{user_id}/settings/encounters",
            get(settings_routes::get_settings).put(settings_routes::update_settings),
        )
        .route(
            "/api/users/{user_id}/settings/encounters/reset",
            post(settings_routes::reset_settings),
        )
}
