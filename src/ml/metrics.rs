//! Evaluation metrics for binary classification.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default)]
/// Confusion counts for a binary classifier.
pub struct BinaryConfusion {
    /// Positive examples predicted positive.
    pub tp: u32,
    /// Negative examples predicted positive.
    pub fp: u32,
    /// Positive examples predicted negative.
    pub fn_: u32,
    /// Negative examples predicted negative.
    pub tn: u32,
}

impl BinaryConfusion {
    /// Tally counts from parallel prediction/target slices.
    pub fn from_predictions(predicted: &[bool], targets: &[bool]) -> Self {
        let mut counts = Self::default();
        for (&pred, &truth) in predicted.iter().zip(targets.iter()) {
            counts.add(truth, pred);
        }
        counts
    }

    pub fn add(&mut self, truth: bool, predicted: bool) {
        let slot = match (truth, predicted) {
            (true, true) => &mut self.tp,
            (false, true) => &mut self.fp,
            (true, false) => &mut self.fn_,
            (false, false) => &mut self.tn,
        };
        *slot = slot.saturating_add(1);
    }

    /// `TP / (TP + FP)`, or `0.0` with no positive predictions.
    pub fn precision(&self) -> f32 {
        let denom = self.tp + self.fp;
        if denom == 0 {
            0.0
        } else {
            self.tp as f32 / denom as f32
        }
    }

    /// `TP / (TP + FN)`, or `0.0` with no positive examples.
    pub fn recall(&self) -> f32 {
        let denom = self.tp + self.fn_;
        if denom == 0 {
            0.0
        } else {
            self.tp as f32 / denom as f32
        }
    }

    /// Harmonic mean of precision and recall; `0.0` when both are zero.
    pub fn f1(&self) -> f32 {
        let precision = self.precision();
        let recall = self.recall();
        if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        }
    }
}

/// Logistic transform of a raw score into a probability.
pub fn sigmoid(x: f32) -> f32 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// F1 of thresholded probabilities against binary targets.
///
/// Predictions are `p > threshold` (strict), so a probability equal to the
/// threshold counts as negative.
pub fn f1_at_threshold(probs: &[f32], targets: &[bool], threshold: f32) -> f32 {
    let predicted: Vec<bool> = probs.iter().map(|&p| p > threshold).collect();
    BinaryConfusion::from_predictions(&predicted, targets).f1()
}

/// Serialized sweep snapshot for export alongside a trained model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalReport {
    pub best_f1: f32,
    pub best_threshold: f32,
    pub thresholds: Vec<f32>,
    pub scores: Vec<f32>,
}

/// Sweep a threshold grid over predicted probabilities and collect the scores.
pub fn sweep_report(probs: &[f32], targets: &[bool], thresholds: &[f32]) -> EvalReport {
    let scores: Vec<f32> = thresholds
        .iter()
        .map(|&t| f1_at_threshold(probs, targets, t))
        .collect();
    let mut best_idx = 0usize;
    for (idx, &score) in scores.iter().enumerate() {
        if score > scores[best_idx] {
            best_idx = idx;
        }
    }
    EvalReport {
        best_f1: scores.get(best_idx).copied().unwrap_or(0.0),
        best_threshold: thresholds.get(best_idx).copied().unwrap_or(0.0),
        thresholds: thresholds.to_vec(),
        scores,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f1_known_binary_case() {
        // TP=2, FP=1, FN=1 -> precision 2/3, recall 2/3, F1 2/3
        let targets = [true, true, true, false, false];
        let predicted = [true, true, false, true, false];
        let counts = BinaryConfusion::from_predictions(&predicted, &targets);
        assert!((counts.f1() - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn f1_is_zero_without_true_positives() {
        let targets = [false, false, false];
        let predicted = [false, false, false];
        let counts = BinaryConfusion::from_predictions(&predicted, &targets);
        assert_eq!(counts.precision(), 0.0);
        assert_eq!(counts.recall(), 0.0);
        assert_eq!(counts.f1(), 0.0);
    }

    #[test]
    fn sigmoid_matches_logistic_values() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-6);
        assert!((sigmoid(2.0) - 0.880_797).abs() < 1e-5);
        assert!((sigmoid(-2.0) - 0.119_203).abs() < 1e-5);
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn threshold_is_strict() {
        let probs = [0.5, 0.6];
        let targets = [true, true];
        // 0.5 is not above the 0.5 threshold, so only one prediction fires.
        let at_half = f1_at_threshold(&probs, &targets, 0.5);
        let at_low = f1_at_threshold(&probs, &targets, 0.4);
        assert!(at_half < at_low);
        assert!((at_low - 1.0).abs() < 1e-6);
    }

    #[test]
    fn sweep_report_picks_best_threshold() {
        let probs = [0.9, 0.1, 0.6];
        let targets = [true, false, true];
        let report = sweep_report(&probs, &targets, &[0.3, 0.5, 0.7]);
        assert!((report.best_f1 - 1.0).abs() < 1e-6);
        assert!((report.best_threshold - 0.3).abs() < 1e-6);
        assert_eq!(report.scores.len(), 3);
    }
}
