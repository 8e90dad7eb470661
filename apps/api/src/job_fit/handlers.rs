use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::job_fit::features::JobFitRequest;
use crate::job_fit::predict_fit;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JobFitResponse {
    pub fit: bool,
}

/// POST /api/job_fit/predict
pub async fn handle_predict_fit(
    State(state): State<AppState>,
    Json(req): Json<JobFitRequest>,
) -> Result<Json<JobFitResponse>, AppError> {
    let bundle = state.artifacts.job_fit()?;
    let fit = predict_fit(&req, bundle)?;
    Ok(Json(JobFitResponse { fit }))
}
