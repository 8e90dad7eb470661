//! Candidate priority scoring: a random-forest classifier over five banded
//! features, returning the predicted priority label.

pub mod features;
pub mod handlers;

use crate::artifacts::PriorityBundle;
use crate::errors::AppError;
use crate::priority::features::PriorityRequest;

pub fn predict_priority(req: &PriorityRequest, bundle: &PriorityBundle) -> Result<String, AppError> {
    let feature_vector = features::build_features(req, bundle)?;
    let label = bundle.model.predict(&feature_vector)?.into_label()?;
    Ok(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::forest::{DecisionTree, ForestModel, TreeNode};
    use crate::inference::ModelArtifact;

    /// Forest that calls "High" when skills_coverage_band (column 1) > 1.5,
    /// "Low" otherwise.
    fn bundle() -> PriorityBundle {
        PriorityBundle {
            model: ModelArtifact::RandomForest(ForestModel {
                classes: vec!["High".to_string(), "Low".to_string()],
                trees: vec![DecisionTree {
                    nodes: vec![
                        TreeNode::Split {
                            feature: 1,
                            threshold: 1.5,
                            left: 1,
                            right: 2,
                        },
                        TreeNode::Leaf {
                            probabilities: vec![0.1, 0.9],
                        },
                        TreeNode::Leaf {
                            probabilities: vec![0.9, 0.1],
                        },
                    ],
                }],
            }),
            years_band: features::years_band_table(),
            skills_band: features::skills_band_table(),
            english: features::english_table(),
            location_match: features::location_match_table(),
        }
    }

    #[test]
    fn test_forest_label_reflects_feature_vector() {
        let mut req = PriorityRequest {
            years_exp_band: "3-6".to_string(),
            skills_coverage_band: "high".to_string(),
            referral_flag: Some(1),
            english_level: "b2".to_string(),
            location_match: "remote".to_string(),
        };
        assert_eq!(predict_priority(&req, &bundle()).unwrap(), "High");

        req.skills_coverage_band = "low".to_string();
        assert_eq!(predict_priority(&req, &bundle()).unwrap(), "Low");
    }
}
