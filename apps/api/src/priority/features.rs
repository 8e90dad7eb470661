//! Candidate-priority feature builder.
//!
//! Vector layout: `[years_exp_band, skills_coverage_band, referral_flag,
//! english_level, location_match]`. All tables are fixed maps; every
//! unknown or missing value falls back to 0.

use serde::Deserialize;

use crate::artifacts::PriorityBundle;
use crate::encoding::{EncodingTable, Normalization, UnknownPolicy};
use crate::errors::AppError;
use crate::inference::FeatureVector;

pub const SKILLS_BAND_ORDER: &[&str] = &["Low", "Medium", "High"];
pub const ENGLISH_ORDER: &[&str] = &["A1", "A2", "B1", "B2", "C1", "C2"];

pub fn years_band_table() -> EncodingTable {
    EncodingTable::with_codes(
        "years_exp_band",
        Normalization::Capitalize,
        UnknownPolicy::FallbackZero,
        &[("0-1", 0), ("1-3", 1), ("3-6", 2), ("6+", 3)],
    )
}

pub fn skills_band_table() -> EncodingTable {
    EncodingTable::ordinal(
        "skills_coverage_band",
        Normalization::Capitalize,
        SKILLS_BAND_ORDER,
    )
}

pub fn english_table() -> EncodingTable {
    EncodingTable::ordinal("english_level", Normalization::Capitalize, ENGLISH_ORDER)
}

pub fn location_match_table() -> EncodingTable {
    EncodingTable::with_codes(
        "location_match",
        Normalization::Capitalize,
        UnknownPolicy::FallbackZero,
        &[("Remote", 0), ("RemoteOK", 1), ("Local", 2)],
    )
}

#[derive(Debug, Clone, Deserialize)]
pub struct PriorityRequest {
    #[serde(default)]
    pub years_exp_band: String,
    #[serde(default)]
    pub skills_coverage_band: String,
    /// 0/1; missing counts as 0 like every other absent input here.
    #[serde(default)]
    pub referral_flag: Option<i64>,
    #[serde(default)]
    pub english_level: String,
    #[serde(default)]
    pub location_match: String,
}

pub fn build_features(
    req: &PriorityRequest,
    bundle: &PriorityBundle,
) -> Result<FeatureVector, AppError> {
    Ok(FeatureVector::dense(vec![
        bundle.years_band.encode(&req.years_exp_band)? as f64,
        bundle.skills_band.encode(&req.skills_coverage_band)? as f64,
        req.referral_flag.unwrap_or(0) as f64,
        bundle.english.encode(&req.english_level)? as f64,
        bundle.location_match.encode(&req.location_match)? as f64,
    ]))
}
