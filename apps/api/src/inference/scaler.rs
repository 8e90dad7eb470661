//! Standard scaler fitted at training time and applied to the job-fit
//! numeric block before it is concatenated with the TF-IDF columns.

use serde::Deserialize;

use crate::inference::InferenceError;

#[derive(Debug, Clone, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// `(x - mean) / scale` per column. A zero scale (constant training
    /// column) divides by 1 instead, matching how the scaler was persisted.
    pub fn transform(&self, values: &[f64]) -> Result<Vec<f64>, InferenceError> {
        if values.len() != self.mean.len() || self.mean.len() != self.scale.len() {
            return Err(InferenceError::DimensionMismatch {
                expected: self.mean.len(),
                got: values.len(),
            });
        }
        Ok(values
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(value, (mean, scale))| {
                let divisor = if *scale == 0.0 { 1.0 } else { *scale };
                (value - mean) / divisor
            })
            .collect())
    }
}
