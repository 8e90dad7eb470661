//! Random-forest classifier inference (candidate priority).
//!
//! Each tree is a flat node array: split nodes route on
//! `x[feature] <= threshold` (left on true), leaves carry a class-probability
//! vector. The forest averages leaf distributions across trees and the
//! predicted label is the argmax into the persisted class list, first class
//! winning ties.

use serde::Deserialize;

use crate::inference::{FeatureVector, InferenceError};

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        probabilities: Vec<f64>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Walks from the root to a leaf. Bounded by the node count so a
    /// corrupt artifact with a cycle cannot loop forever.
    fn leaf_probabilities(&self, features: &FeatureVector) -> Result<&[f64], InferenceError> {
        let mut index = 0usize;
        for _ in 0..=self.nodes.len() {
            let node = self.nodes.get(index).ok_or_else(|| {
                InferenceError::Malformed(format!("tree node index {index} out of range"))
            })?;
            match node {
                TreeNode::Leaf { probabilities } => return Ok(probabilities),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.value_at(*feature).ok_or(
                        InferenceError::DimensionMismatch {
                            expected: *feature + 1,
                            got: features.len(),
                        },
                    )?;
                    index = if value <= *threshold { *left } else { *right };
                }
            }
        }
        Err(InferenceError::Malformed(
            "tree traversal did not reach a leaf".to_string(),
        ))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForestModel {
    /// Class labels in the order the probability vectors are laid out.
    pub classes: Vec<String>,
    pub trees: Vec<DecisionTree>,
}

impl ForestModel {
    /// Mean of the per-tree leaf distributions, in class-list order.
    pub fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, InferenceError> {
        if self.trees.is_empty() {
            return Err(InferenceError::Malformed(
                "random forest has no trees".to_string(),
            ));
        }
        let mut totals = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            let probabilities = tree.leaf_probabilities(features)?;
            if probabilities.len() != totals.len() {
                return Err(InferenceError::Malformed(format!(
                    "leaf has {} class probabilities but the forest has {} classes",
                    probabilities.len(),
                    totals.len()
                )));
            }
            for (total, p) in totals.iter_mut().zip(probabilities) {
                *total += p;
            }
        }
        let tree_count = self.trees.len() as f64;
        for total in &mut totals {
            *total /= tree_count;
        }
        Ok(totals)
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<String, InferenceError> {
        let probabilities = self.predict_proba(features)?;
        let mut best = 0usize;
        for (i, p) in probabilities.iter().enumerate() {
            if *p > probabilities[best] {
                best = i;
            }
        }
        self.classes
            .get(best)
            .cloned()
            .ok_or_else(|| InferenceError::Malformed("random forest has no classes".to_string()))
    }
}
