//! Salary feature builder.
//!
//! Vector layout (fixed, matches what the regression was fit on):
//! `[years_experience, role, degree, company_size, location, level]`.
//! `years_experience` is required; every categorical field title-cases
//! before lookup. `role` and `location` use the nominal tables persisted
//! with the model; the rest are fixed ordinal tables.

use serde::Deserialize;

use crate::artifacts::SalaryBundle;
use crate::encoding::{EncodingTable, Normalization};
use crate::errors::AppError;
use crate::inference::FeatureVector;

pub const LEVEL_ORDER: &[&str] = &["Intern", "Junior", "Mid", "Senior", "Lead"];
pub const COMPANY_SIZE_ORDER: &[&str] = &["Small", "Mid", "Large", "Enterprise"];
pub const DEGREE_ORDER: &[&str] = &["No Degree", "Bachelors", "Masters", "Phd"];

pub fn level_table() -> EncodingTable {
    EncodingTable::ordinal("level", Normalization::TitleCase, LEVEL_ORDER)
}

pub fn company_size_table() -> EncodingTable {
    EncodingTable::ordinal("company_size", Normalization::TitleCase, COMPANY_SIZE_ORDER)
}

pub fn degree_table() -> EncodingTable {
    EncodingTable::ordinal("degree", Normalization::TitleCase, DEGREE_ORDER)
}

#[derive(Debug, Clone, Deserialize)]
pub struct SalaryRequest {
    /// Required; absence is a client-input error, not a fallback.
    pub years_experience: Option<f64>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub company_size: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub level: String,
}

pub fn build_features(
    req: &SalaryRequest,
    bundle: &SalaryBundle,
) -> Result<FeatureVector, AppError> {
    let years_experience = req.years_experience.ok_or_else(|| {
        AppError::Validation("'years_experience' is required".to_string())
    })?;

    Ok(FeatureVector::dense(vec![
        years_experience,
        bundle.role.encode(&req.role)? as f64,
        bundle.degree.encode(&req.degree)? as f64,
        bundle.company_size.encode(&req.company_size)? as f64,
        bundle.location.encode(&req.location)? as f64,
        bundle.level.encode(&req.level)? as f64,
    ]))
}
