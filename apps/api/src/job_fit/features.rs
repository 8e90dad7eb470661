//! Job-fit feature derivation.
//!
//! Skill lists are comma-separated strings, normalized into sets
//! (lowercased, trimmed, duplicates collapsed, empty tokens dropped). The
//! numeric block is derived from the set overlap plus degree and
//! experience; its column order comes from the persisted feature-name list,
//! never from source order.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::encoding::{EncodingTable, Normalization, UnknownPolicy};
use crate::errors::AppError;
use crate::inference::InferenceError;

/// Degree codes the job-fit model was trained with. Distinct from the
/// salary ordinal: "no degree" and "bachelors" share code 0 here.
pub fn degree_table() -> EncodingTable {
    EncodingTable::with_codes(
        "degree",
        Normalization::Lowercase,
        UnknownPolicy::FallbackZero,
        &[("bachelors", 0), ("masters", 1), ("phd", 2), ("no degree", 0)],
    )
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobFitRequest {
    #[serde(default)]
    pub required_skills: String,
    #[serde(default)]
    pub candidate_skills: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub years_experience: f64,
}

/// Normalized set of skill tokens from a comma-separated list.
pub fn skill_set(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

/// The five numeric features, addressable by their persisted names.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericFeatures {
    pub degree_encoded: f64,
    pub years_experience: f64,
    pub skill_match_ratio: f64,
    pub candidate_coverage: f64,
    pub required_skill_count: f64,
}

impl NumericFeatures {
    pub fn by_name(&self, name: &str) -> Result<f64, InferenceError> {
        match name {
            "degree_encoded" => Ok(self.degree_encoded),
            "years_experience" => Ok(self.years_experience),
            "skill_match_ratio" => Ok(self.skill_match_ratio),
            "candidate_coverage" => Ok(self.candidate_coverage),
            "required_skill_count" => Ok(self.required_skill_count),
            other => Err(InferenceError::UnknownFeature(other.to_string())),
        }
    }
}

pub fn derive_numeric(
    req: &JobFitRequest,
    degree: &EncodingTable,
) -> Result<NumericFeatures, AppError> {
    let required = skill_set(&req.required_skills);
    let candidate = skill_set(&req.candidate_skills);

    // An empty requirement list zeroes the whole overlap block; no
    // division by zero.
    let (skill_match_ratio, candidate_coverage, required_skill_count) = if required.is_empty() {
        (0.0, 0.0, 0.0)
    } else {
        let overlap = required.intersection(&candidate).count() as f64;
        (
            overlap / required.len() as f64,
            overlap / candidate.len().max(1) as f64,
            required.len() as f64,
        )
    };

    Ok(NumericFeatures {
        degree_encoded: degree.encode(&req.degree)? as f64,
        years_experience: req.years_experience,
        skill_match_ratio,
        candidate_coverage,
        required_skill_count,
    })
}
