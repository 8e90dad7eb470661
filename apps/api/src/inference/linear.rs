//! Linear-family models: ordinary linear regression (salary) and binary
//! logistic regression (job fit). Both are a dot product over the artifact's
//! coefficient vector plus an intercept; logistic pushes the margin through
//! a sigmoid to get the positive-class probability.

use serde::Deserialize;

use crate::inference::{FeatureVector, InferenceError};

#[derive(Debug, Clone, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    pub fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        check_dimensions(self.coefficients.len(), features)?;
        Ok(features.dot(&self.coefficients) + self.intercept)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogisticModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticModel {
    /// Positive-class probability, `sigmoid(w . x + b)`.
    pub fn predict_proba(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        check_dimensions(self.coefficients.len(), features)?;
        let margin = features.dot(&self.coefficients) + self.intercept;
        Ok(sigmoid(margin))
    }
}

fn check_dimensions(expected: usize, features: &FeatureVector) -> Result<(), InferenceError> {
    if features.len() != expected {
        return Err(InferenceError::DimensionMismatch {
            expected,
            got: features.len(),
        });
    }
    Ok(())
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_prediction_is_weighted_sum_plus_intercept() {
        let model = LinearModel {
            coefficients: vec![1000.0, 500.0],
            intercept: 8000.0,
        };
        let predicted = model
            .predict(&FeatureVector::dense(vec![4.0, 2.0]))
            .unwrap();
        assert!((predicted - 13_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_linear_rejects_wrong_column_count() {
        let model = LinearModel {
            coefficients: vec![1.0, 1.0, 1.0],
            intercept: 0.0,
        };
        let err = model
            .predict(&FeatureVector::dense(vec![1.0, 2.0]))
            .unwrap_err();
        assert_eq!(
            err,
            InferenceError::DimensionMismatch {
                expected: 3,
                got: 2,
            }
        );
    }

    #[test]
    fn test_logistic_zero_margin_is_half() {
        let model = LogisticModel {
            coefficients: vec![1.0, -1.0],
            intercept: 0.0,
        };
        let p = model
            .predict_proba(&FeatureVector::dense(vec![2.0, 2.0]))
            .unwrap();
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_logistic_probability_is_bounded_and_monotone() {
        let model = LogisticModel {
            coefficients: vec![1.0],
            intercept: 0.0,
        };
        let low = model
            .predict_proba(&FeatureVector::dense(vec![-5.0]))
            .unwrap();
        let high = model
            .predict_proba(&FeatureVector::dense(vec![5.0]))
            .unwrap();
        assert!(low > 0.0 && low < 0.5);
        assert!(high > 0.5 && high < 1.0);
    }

    #[test]
    fn test_logistic_accepts_sparse_block_input() {
        let model = LogisticModel {
            coefficients: vec![2.0, 0.0, 0.0, 1.0],
            intercept: -1.0,
        };
        let features = FeatureVector::with_sparse_block(vec![(0, 0.5)], 3, vec![0.0]);
        let p = model.predict_proba(&features).unwrap();
        // margin = 2*0.5 - 1 = 0
        assert!((p - 0.5).abs() < 1e-12);
    }
}
