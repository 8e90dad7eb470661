//! Job-fit scoring: TF-IDF over the concatenated skill lists, horizontally
//! stacked with the scaled numeric block, pushed through a binary logistic
//! model. The decision rule is `fit = P(positive) >= 0.5`.

pub mod features;
pub mod handlers;

use crate::artifacts::JobFitBundle;
use crate::errors::AppError;
use crate::inference::FeatureVector;
use crate::job_fit::features::JobFitRequest;

pub fn predict_fit(req: &JobFitRequest, bundle: &JobFitBundle) -> Result<bool, AppError> {
    let numeric = features::derive_numeric(req, &bundle.degree)?;

    // Assemble the numeric block in the training-time persisted order.
    let ordered = bundle
        .feature_names
        .iter()
        .map(|name| numeric.by_name(name))
        .collect::<Result<Vec<f64>, _>>()?;
    let scaled = match &bundle.scaler {
        Some(scaler) => scaler.transform(&ordered)?,
        None => ordered,
    };

    let skills_text = format!("{} {}", req.required_skills, req.candidate_skills);
    let sparse = bundle.vectorizer.transform(&skills_text);
    let feature_vector =
        FeatureVector::with_sparse_block(sparse, bundle.vectorizer.n_features(), scaled);

    let probability = bundle.model.predict(&feature_vector)?.into_probability()?;
    Ok(probability >= 0.5)
}
