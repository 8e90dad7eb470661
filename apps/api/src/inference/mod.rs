//! Model adapter layer.
//!
//! Trained models are shipped as opaque JSON artifacts (coefficient vectors,
//! tree node arrays, fitted vectorizer state) and deserialized once at
//! startup. `ModelArtifact::predict` is the single inference entry point; it
//! hides whether the artifact is a regressor or a classifier behind the
//! `Prediction` output. Everything here is a pure read of immutable state.

pub mod forest;
pub mod linear;
pub mod scaler;
pub mod tfidf;

use serde::Deserialize;
use thiserror::Error;

use crate::inference::forest::ForestModel;
use crate::inference::linear::{LinearModel, LogisticModel};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum InferenceError {
    #[error("feature vector has {got} columns but the model expects {expected}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("expected a {expected} prediction but the model produced a {got}")]
    UnexpectedOutput {
        expected: &'static str,
        got: &'static str,
    },

    #[error("persisted feature name '{0}' has no derived value")]
    UnknownFeature(String),

    #[error("malformed model artifact: {0}")]
    Malformed(String),
}

/// Fixed-order numeric input to a model: a dense block, optionally prefixed
/// by a sparse block (job fit concatenates the TF-IDF columns before the
/// scaled numerics). Column order and count must match what the model was
/// fit on; the adapters check the count before any arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    sparse: Vec<(usize, f64)>,
    sparse_dim: usize,
    dense: Vec<f64>,
}

impl FeatureVector {
    pub fn dense(values: Vec<f64>) -> Self {
        FeatureVector {
            sparse: Vec::new(),
            sparse_dim: 0,
            dense: values,
        }
    }

    /// Sparse block of `sparse_dim` columns followed by a dense tail.
    /// `sparse` holds (column, value) pairs for the non-zero columns.
    pub fn with_sparse_block(sparse: Vec<(usize, f64)>, sparse_dim: usize, dense: Vec<f64>) -> Self {
        FeatureVector {
            sparse,
            sparse_dim,
            dense,
        }
    }

    /// Total column count, zeros included.
    pub fn len(&self) -> usize {
        self.sparse_dim + self.dense.len()
    }

    /// Value of one column; `None` when the column is past the end.
    pub fn value_at(&self, column: usize) -> Option<f64> {
        if column < self.sparse_dim {
            Some(
                self.sparse
                    .iter()
                    .find(|(c, _)| *c == column)
                    .map(|(_, v)| *v)
                    .unwrap_or(0.0),
            )
        } else {
            self.dense.get(column - self.sparse_dim).copied()
        }
    }

    /// Dot product against a weight vector of matching length.
    pub(crate) fn dot(&self, weights: &[f64]) -> f64 {
        let mut sum = 0.0;
        for (column, value) in &self.sparse {
            sum += value * weights[*column];
        }
        for (i, value) in self.dense.iter().enumerate() {
            sum += value * weights[self.sparse_dim + i];
        }
        sum
    }
}

/// Output of a model, tagged with what the value means.
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    /// Continuous regression output.
    Score(f64),
    /// Positive-class probability in [0, 1].
    Probability(f64),
    /// Predicted class label.
    Label(String),
}

impl Prediction {
    fn kind(&self) -> &'static str {
        match self {
            Prediction::Score(_) => "score",
            Prediction::Probability(_) => "probability",
            Prediction::Label(_) => "label",
        }
    }

    pub fn into_score(self) -> Result<f64, InferenceError> {
        match self {
            Prediction::Score(value) => Ok(value),
            other => Err(InferenceError::UnexpectedOutput {
                expected: "score",
                got: other.kind(),
            }),
        }
    }

    pub fn into_probability(self) -> Result<f64, InferenceError> {
        match self {
            Prediction::Probability(value) => Ok(value),
            other => Err(InferenceError::UnexpectedOutput {
                expected: "probability",
                got: other.kind(),
            }),
        }
    }

    pub fn into_label(self) -> Result<String, InferenceError> {
        match self {
            Prediction::Label(label) => Ok(label),
            other => Err(InferenceError::UnexpectedOutput {
                expected: "label",
                got: other.kind(),
            }),
        }
    }
}

/// A deserialized trained model. The `kind` tag in the artifact selects the
/// variant; callers only see `predict`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    LinearRegression(LinearModel),
    LogisticRegression(LogisticModel),
    RandomForest(ForestModel),
}

impl ModelArtifact {
    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction, InferenceError> {
        match self {
            ModelArtifact::LinearRegression(model) => {
                Ok(Prediction::Score(model.predict(features)?))
            }
            ModelArtifact::LogisticRegression(model) => {
                Ok(Prediction::Probability(model.predict_proba(features)?))
            }
            ModelArtifact::RandomForest(model) => Ok(Prediction::Label(model.predict(features)?)),
        }
    }
}
