use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ml::metrics::sigmoid;

/// Single-node decision tree used as a weak learner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stump {
    /// Feature index used for the split.
    pub feature_index: u16,
    /// Threshold in feature units.
    pub threshold: f32,
    /// Prediction for `feature <= threshold`.
    pub left_value: f32,
    /// Prediction for `feature > threshold`.
    pub right_value: f32,
}

impl Stump {
    /// Predict the stump value for a feature vector.
    pub fn predict(&self, features: &[f32]) -> f32 {
        let idx = self.feature_index as usize;
        let value = features.get(idx).copied().unwrap_or(0.0);
        if value <= self.threshold {
            self.left_value
        } else {
            self.right_value
        }
    }
}

/// Gradient-boosted decision stump model for binary classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StumpModel {
    /// Model format version.
    pub model_version: i64,
    /// Learning rate applied to each stump prediction.
    pub learning_rate: f32,
    /// Initial raw log-odds before boosting rounds.
    pub base_score: f32,
    /// One stump per boosting round.
    pub stumps: Vec<Stump>,
}

impl StumpModel {
    /// Validate structural invariants of the model.
    pub fn validate(&self) -> Result<(), String> {
        if !self.base_score.is_finite() {
            return Err("base_score must be finite".to_string());
        }
        if !(self.learning_rate > 0.0) {
            return Err("learning_rate must be positive".to_string());
        }
        for (round_idx, stump) in self.stumps.iter().enumerate() {
            if !stump.threshold.is_finite() {
                return Err(format!("Round {round_idx} has a non-finite split threshold"));
            }
        }
        Ok(())
    }

    /// Load a model from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self, String> {
        let bytes = std::fs::read(path).map_err(|err| err.to_string())?;
        let model: Self = serde_json::from_slice(&bytes).map_err(|err| err.to_string())?;
        model.validate()?;
        Ok(model)
    }

    /// Predict the raw logit for a feature vector.
    pub fn predict_raw(&self, features: &[f32]) -> f32 {
        let mut raw = self.base_score;
        for stump in &self.stumps {
            raw += self.learning_rate * stump.predict(features);
        }
        raw
    }

    /// Predict the positive-class probability for a feature vector.
    pub fn predict_proba(&self, features: &[f32]) -> f32 {
        sigmoid(self.predict_raw(features))
    }

    /// Predict the binary label for a feature vector at a decision threshold.
    pub fn predict_label(&self, features: &[f32], threshold: f32) -> bool {
        self.predict_proba(features) > threshold
    }
}
