//! Artifact store: per-task model bundles loaded once at startup from the
//! configured models directory.
//!
//! Bundles load independently and degrade independently: a bundle that
//! fails to load is logged and recorded as absent, and every prediction for
//! that task fails fast with a model-unavailable error while the other
//! tasks keep serving. Once loaded, bundles are immutable and shared across
//! requests; teardown is process exit.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{info, warn};

use crate::encoding::EncodingTable;
use crate::errors::AppError;
use crate::inference::scaler::StandardScaler;
use crate::inference::tfidf::TfidfVectorizer;
use crate::inference::ModelArtifact;
use crate::{job_fit, priority, salary};

pub const SALARY_MODEL_FILE: &str = "salary_model.json";
pub const SALARY_ENCODERS_FILE: &str = "salary_encoders.json";
pub const PRIORITY_MODEL_FILE: &str = "candidate_model.json";
pub const JOB_FIT_MODEL_FILE: &str = "job_fit_model.json";
pub const TFIDF_FILE: &str = "tfidf_vectorizer.json";
pub const SCALER_FILE: &str = "feature_scaler.json";
pub const FEATURE_NAMES_FILE: &str = "feature_names.json";

/// Fit-derived nominal tables persisted next to the salary model.
#[derive(Debug, Clone, Deserialize)]
struct SalaryEncoders {
    role: EncodingTable,
    location: EncodingTable,
}

/// Everything the salary task needs: the regression model, the persisted
/// nominal tables and the fixed ordinal tables.
#[derive(Debug, Clone)]
pub struct SalaryBundle {
    pub model: ModelArtifact,
    pub role: EncodingTable,
    pub location: EncodingTable,
    pub degree: EncodingTable,
    pub company_size: EncodingTable,
    pub level: EncodingTable,
}

impl SalaryBundle {
    fn load(dir: &Path) -> Result<Self> {
        let model = load_json(dir, SALARY_MODEL_FILE)?;
        let encoders: SalaryEncoders = load_json(dir, SALARY_ENCODERS_FILE)?;
        Ok(SalaryBundle {
            model,
            role: encoders.role,
            location: encoders.location,
            degree: salary::features::degree_table(),
            company_size: salary::features::company_size_table(),
            level: salary::features::level_table(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct PriorityBundle {
    pub model: ModelArtifact,
    pub years_band: EncodingTable,
    pub skills_band: EncodingTable,
    pub english: EncodingTable,
    pub location_match: EncodingTable,
}

impl PriorityBundle {
    fn load(dir: &Path) -> Result<Self> {
        Ok(PriorityBundle {
            model: load_json(dir, PRIORITY_MODEL_FILE)?,
            years_band: priority::features::years_band_table(),
            skills_band: priority::features::skills_band_table(),
            english: priority::features::english_table(),
            location_match: priority::features::location_match_table(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct JobFitBundle {
    pub model: ModelArtifact,
    pub vectorizer: TfidfVectorizer,
    /// Optional: when the training run did not persist a scaler, raw
    /// numeric values pass through unscaled.
    pub scaler: Option<StandardScaler>,
    /// Persisted training-time order of the numeric block. Required; the
    /// numeric column order is never hardcoded at serving time.
    pub feature_names: Vec<String>,
    pub degree: EncodingTable,
}

impl JobFitBundle {
    fn load(dir: &Path) -> Result<Self> {
        let scaler = if dir.join(SCALER_FILE).exists() {
            Some(load_json(dir, SCALER_FILE)?)
        } else {
            None
        };
        Ok(JobFitBundle {
            model: load_json(dir, JOB_FIT_MODEL_FILE)?,
            vectorizer: load_json(dir, TFIDF_FILE)?,
            scaler,
            feature_names: load_json(dir, FEATURE_NAMES_FILE)?,
            degree: job_fit::features::degree_table(),
        })
    }
}

#[derive(Debug, Default)]
pub struct ArtifactStore {
    pub salary: Option<SalaryBundle>,
    pub priority: Option<PriorityBundle>,
    pub job_fit: Option<JobFitBundle>,
}

impl ArtifactStore {
    pub fn load(dir: &Path) -> Self {
        ArtifactStore {
            salary: report("salary", SalaryBundle::load(dir)),
            priority: report("candidate_priority", PriorityBundle::load(dir)),
            job_fit: report("job_fit", JobFitBundle::load(dir)),
        }
    }

    pub fn salary(&self) -> Result<&SalaryBundle, AppError> {
        self.salary
            .as_ref()
            .ok_or(AppError::ModelUnavailable("salary"))
    }

    pub fn priority(&self) -> Result<&PriorityBundle, AppError> {
        self.priority
            .as_ref()
            .ok_or(AppError::ModelUnavailable("candidate_priority"))
    }

    pub fn job_fit(&self) -> Result<&JobFitBundle, AppError> {
        self.job_fit
            .as_ref()
            .ok_or(AppError::ModelUnavailable("job_fit"))
    }
}

fn report<T>(task: &str, loaded: Result<T>) -> Option<T> {
    match loaded {
        Ok(bundle) => {
            info!("{task} artifacts loaded");
            Some(bundle)
        }
        Err(e) => {
            warn!("{task} artifacts unavailable: {e:#}");
            None
        }
    }
}

fn load_json<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<T> {
    let path = dir.join(name);
    let file = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file)).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    fn write_salary_bundle(dir: &Path) {
        write(
            dir,
            SALARY_MODEL_FILE,
            r#"{"kind": "linear_regression",
                "coefficients": [1000.0, 10.0, 500.0, 200.0, 50.0, 800.0],
                "intercept": 8000.0}"#,
        );
        write(
            dir,
            SALARY_ENCODERS_FILE,
            r#"{"role": {"field": "role", "normalization": "title_case",
                         "codes": {"Ml Engineer": 4, "Data Analyst": 1}},
                "location": {"field": "location", "normalization": "title_case",
                             "codes": {"Marrakech": 3, "Agadir": 0}}}"#,
        );
    }

    fn write_job_fit_bundle(dir: &Path) {
        write(
            dir,
            JOB_FIT_MODEL_FILE,
            r#"{"kind": "logistic_regression",
                "coefficients": [0.5, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6],
                "intercept": -0.2}"#,
        );
        write(
            dir,
            TFIDF_FILE,
            r#"{"vocabulary": {"python": 0, "sql": 1},
                "idf": [1.2, 1.5],
                "ngram_range": [1, 2]}"#,
        );
        write(
            dir,
            FEATURE_NAMES_FILE,
            r#"["degree_encoded", "years_experience", "skill_match_ratio",
                "candidate_coverage", "required_skill_count"]"#,
        );
    }

    #[test]
    fn test_full_store_loads_from_directory() {
        let dir = TempDir::new().unwrap();
        write_salary_bundle(dir.path());
        write(
            dir.path(),
            PRIORITY_MODEL_FILE,
            r#"{"kind": "random_forest",
                "classes": ["High", "Low", "Medium"],
                "trees": [{"nodes": [{"probabilities": [1.0, 0.0, 0.0]}]}]}"#,
        );
        write_job_fit_bundle(dir.path());

        let store = ArtifactStore::load(dir.path());
        assert!(store.salary().is_ok());
        assert!(store.priority().is_ok());
        let job_fit = store.job_fit().unwrap();
        assert_eq!(job_fit.feature_names.len(), 5);
        assert!(job_fit.scaler.is_none());
    }

    #[test]
    fn test_missing_bundle_degrades_only_that_task() {
        let dir = TempDir::new().unwrap();
        write_salary_bundle(dir.path());

        let store = ArtifactStore::load(dir.path());
        assert!(store.salary().is_ok());
        assert!(matches!(
            store.priority(),
            Err(AppError::ModelUnavailable("candidate_priority"))
        ));
        assert!(matches!(
            store.job_fit(),
            Err(AppError::ModelUnavailable("job_fit"))
        ));
    }

    #[test]
    fn test_persisted_nominal_tables_drive_salary_encoding() {
        let dir = TempDir::new().unwrap();
        write_salary_bundle(dir.path());

        let bundle = SalaryBundle::load(dir.path()).unwrap();
        assert_eq!(bundle.role.encode("ml engineer").unwrap(), 4);
        assert_eq!(bundle.location.encode("MARRAKECH").unwrap(), 3);
        // Unknown nominal falls back to 0 under the shipped policy.
        assert_eq!(bundle.role.encode("astronaut").unwrap(), 0);
    }

    #[test]
    fn test_job_fit_requires_persisted_feature_names() {
        let dir = TempDir::new().unwrap();
        write_job_fit_bundle(dir.path());
        fs::remove_file(dir.path().join(FEATURE_NAMES_FILE)).unwrap();

        assert!(JobFitBundle::load(dir.path()).is_err());
    }

    #[test]
    fn test_optional_scaler_is_picked_up_when_present() {
        let dir = TempDir::new().unwrap();
        write_job_fit_bundle(dir.path());
        write(
            dir.path(),
            SCALER_FILE,
            r#"{"mean": [0.0, 0.0, 0.0, 0.0, 0.0], "scale": [1.0, 1.0, 1.0, 1.0, 1.0]}"#,
        );

        let bundle = JobFitBundle::load(dir.path()).unwrap();
        assert!(bundle.scaler.is_some());
    }

    #[test]
    fn test_corrupt_artifact_is_a_load_error() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), SALARY_MODEL_FILE, "not json");
        write(
            dir.path(),
            SALARY_ENCODERS_FILE,
            r#"{"role": {"field": "role", "normalization": "title_case", "codes": {}},
                "location": {"field": "location", "normalization": "title_case", "codes": {}}}"#,
        );
        assert!(SalaryBundle::load(dir.path()).is_err());
    }
}
