//! Per-user encounter settings routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::encounter_routes::parse_user_id;
use crate::domain::value_objects::EncounterSettings;
use crate::infrastructure::state::AppState;

/// Every table with the user's overrides applied
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<EncounterSettings>, (StatusCode, String)> {
    let user = parse_user_id(&user_id)?;
    state
        .settings_service
        .effective(user)
        .await
        .map(Json)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(settings): Json<EncounterSettings>,
) -> Result<Json<EncounterSettings>, (StatusCode, String)> {
    let user = parse_user_id(&user_id)?;
    state
        .settings_service
        .update(user, settings.clone())
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Json(settings))
}

pub async fn reset_settings(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<EncounterSettings>, (StatusCode, String)> {
    let user = parse_user_id(&user_id)?;
    state
        .settings_service
        .reset(user)
        .await
        .map(Json)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}
