//! Salary estimation: a linear-regression model over six features built
//! from the request's experience and categorical fields.

pub mod features;
pub mod handlers;

use crate::artifacts::SalaryBundle;
use crate::errors::AppError;
use crate::salary::features::SalaryRequest;

/// Builds the feature vector, runs the regression and rounds the estimate
/// to 2 decimal places (the response is a MAD amount).
pub fn predict_salary(req: &SalaryRequest, bundle: &SalaryBundle) -> Result<f64, AppError> {
    let feature_vector = features::build_features(req, bundle)?;
    let score = bundle.model.predict(&feature_vector)?.into_score()?;
    Ok((score * 100.0).round() / 100.0)
}
