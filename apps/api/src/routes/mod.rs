pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::state::AppState;

/// Resume screening has no trained artifact yet; the route is reserved.
async fn not_implemented() -> Result<(), AppError> {
    Err(AppError::NotImplemented)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/salary/predict",
            post(crate::salary::handlers::handle_predict_salary),
        )
        .route(
            "/api/candidate_priority/predict",
            post(crate::priority::handlers::handle_predict_priority),
        )
        .route(
            "/api/job_fit/predict",
            post(crate::job_fit::handlers::handle_predict_fit),
        )
        .route("/api/resume_screen/predict", post(not_implemented))
        .with_state(state)
}
