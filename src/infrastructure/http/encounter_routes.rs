//! Encounter API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::dto::{
    GenerateEncounterRequestDto, GenerateEncounterResponse, ProbabilityPreviewRequestDto,
};
use crate::application::ports::inbound::{GenerationContext, GenerationError};
use crate::application::ports::outbound::{RepositoryError, StoredEncounterBatch};
use crate::domain::services::EncounterDistribution;
use crate::domain::value_objects::{EncounterBatchId, UserId};
use crate::infrastructure::state::AppState;

pub(crate) fn error_response(err: GenerationError) -> (StatusCode, String) {
    let status = match &err {
        GenerationError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        GenerationError::Repository(RepositoryError::NotFound(_)) => StatusCode::NOT_FOUND,
        GenerationError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

pub(crate) fn parse_user_id(id: &str) -> Result<UserId, (StatusCode, String)> {
    Uuid::parse_str(id)
        .map(UserId::from_uuid)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid user ID".to_string()))
}

/// Generate a batch of encounters
pub async fn generate_encounters(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateEncounterRequestDto>,
) -> Result<(StatusCode, Json<GenerateEncounterResponse>), (StatusCode, String)> {
    let input = req.input();
    let context = GenerationContext {
        user_id: req.user_id,
        settings: req.settings,
        seed: req.seed,
    };

    let response = state
        .generation_service
        .generate(input, context)
        .await
        .map_err(error_response)?;

    let status = match response {
        GenerateEncounterResponse::Saved { .. } => StatusCode::CREATED,
        GenerateEncounterResponse::Ephemeral { .. } => StatusCode::OK,
    };
    Ok((status, Json(response)))
}

/// Preview occurrence probabilities for a batch
pub async fn preview_probabilities(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProbabilityPreviewRequestDto>,
) -> Result<Json<EncounterDistribution>, (StatusCode, String)> {
    let context = GenerationContext {
        user_id: req.user_id,
        settings: req.settings,
        seed: None,
    };

    state
        .generation_service
        .preview(req.options.into_vec(), context)
        .await
        .map(Json)
        .map_err(error_response)
}

/// Get a saved batch by ID
pub async fn get_encounter_batch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<StoredEncounterBatch>, (StatusCode, String)> {
    let uuid = Uuid::parse_str(&id)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid encounter ID".to_string()))?;

    let batch = state
        .generation_service
        .get_batch(EncounterBatchId::from_uuid(uuid))
        .await
        .map_err(error_response)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Encounter batch not found".to_string()))?;

    Ok(Json(batch))
}

/// List a user's saved batches
pub async fn list_user_encounters(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<StoredEncounterBatch>>, (StatusCode, String)> {
    let user = parse_user_id(&user_id)?;

    state
        .generation_service
        .list_batches(user)
        .await
        .map(Json)
        .map_err(error_response)
}
