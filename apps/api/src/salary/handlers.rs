use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::salary::features::SalaryRequest;
use crate::salary::predict_salary;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SalaryResponse {
    pub predicted_salary_mad: f64,
}

/// POST /api/salary/predict
pub async fn handle_predict_salary(
    State(state): State<AppState>,
    Json(req): Json<SalaryRequest>,
) -> Result<Json<SalaryResponse>, AppError> {
    let bundle = state.artifacts.salary()?;
    let predicted_salary_mad = predict_salary(&req, bundle)?;
    Ok(Json(SalaryResponse {
        predicted_salary_mad,
    }))
}
