use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::encoding::UnknownCategory;
use crate::inference::InferenceError;

/// Application-level error type, one variant per class in the error
/// taxonomy: missing artifact, missing required field, rejected unknown
/// category, prediction-runtime failure.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),

    #[error("{0} model artifacts are not loaded")]
    ModelUnavailable(&'static str),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),

    #[error("Not implemented")]
    NotImplemented,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnknownCategory(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNKNOWN_CATEGORY",
                e.to_string(),
            ),
            AppError::ModelUnavailable(task) => {
                tracing::warn!("prediction refused: {task} artifacts missing");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "MODEL_UNAVAILABLE",
                    self.to_string(),
                )
            }
            AppError::Inference(e) => {
                tracing::error!("Inference error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "COMPUTATION_ERROR",
                    "A prediction computation error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
            AppError::NotImplemented => (
                StatusCode::NOT_IMPLEMENTED,
                "NOT_IMPLEMENTED",
                "This endpoint is not yet implemented".to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
