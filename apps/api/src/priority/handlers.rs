use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::priority::features::PriorityRequest;
use crate::priority::predict_priority;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PriorityResponse {
    pub predicted_priority: String,
}

/// POST /api/candidate_priority/predict
pub async fn handle_predict_priority(
    State(state): State<AppState>,
    Json(req): Json<PriorityRequest>,
) -> Result<Json<PriorityResponse>, AppError> {
    let bundle = state.artifacts.priority()?;
    let predicted_priority = predict_priority(&req, bundle)?;
    Ok(Json(PriorityResponse { predicted_priority }))
}
