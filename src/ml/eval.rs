//! Pluggable evaluation metrics for the boosting trainer.
//!
//! Mirrors the custom-metric extension point of gradient-boosting hosts:
//! the trainer queries the optimization direction once at setup, then calls
//! `evaluate` in bookkeeping/report pairs every round. The bookkeeping
//! result is discarded by the host, so a metric may answer it cheaply.

use crate::ml::metrics::{f1_at_threshold, sigmoid};

/// Custom evaluation metric consumed by the boosting trainer.
pub trait MetricEval {
    /// Score one eval pass.
    ///
    /// `approxes` holds one row of raw model scores per output dimension and
    /// `targets` the ground-truth labels for the same examples. `weights`
    /// carries optional per-example weights. Returns
    /// `(score, aggregation_weight)`.
    fn evaluate(
        &mut self,
        approxes: &[Vec<f32>],
        targets: &[f32],
        weights: Option<&[f32]>,
    ) -> (f32, f32);

    /// `true` when larger scores indicate a better model.
    fn is_max_optimal(&self) -> bool;

    /// Combine an accumulated error with its total weight into the final
    /// reported value.
    fn final_error(&self, error: f32, weight: f32) -> f32;
}

/// Threshold-sweep F1 metric over logistic-transformed raw scores.
///
/// Sweeps an immutable grid of decision thresholds and reports the best
/// attainable F1 for the positive class. The host invokes `evaluate` twice
/// per round; this metric skips the first (bookkeeping) call of each pair
/// and only computes on the second, inferring the phase from call parity.
/// One instance must serve exactly one training run.
pub struct SweepF1 {
    thresholds: Vec<f32>,
    train_call: bool,
}

impl SweepF1 {
    /// Build a metric sweeping `steps` evenly spaced thresholds from
    /// `start` to `stop` inclusive.
    pub fn new(start: f32, stop: f32, steps: usize) -> Result<Self, String> {
        if steps == 0 {
            return Err("Threshold grid needs at least one step".to_string());
        }
        if !start.is_finite() || !stop.is_finite() {
            return Err(format!(
                "Threshold grid bounds must be finite (got {start}..{stop})"
            ));
        }
        Ok(Self {
            thresholds: linspace(start, stop, steps),
            train_call: false,
        })
    }

    /// The immutable threshold grid.
    pub fn thresholds(&self) -> &[f32] {
        &self.thresholds
    }
}

impl MetricEval for SweepF1 {
    fn evaluate(
        &mut self,
        approxes: &[Vec<f32>],
        targets: &[f32],
        _weights: Option<&[f32]>,
    ) -> (f32, f32) {
        self.train_call = !self.train_call;
        if self.train_call {
            return (0.0, 1.0);
        }

        assert_eq!(
            approxes.len(),
            1,
            "sweep F1 handles exactly one output dimension, got {}",
            approxes.len()
        );
        assert_eq!(
            approxes[0].len(),
            targets.len(),
            "approx/target length mismatch: {} vs {}",
            approxes[0].len(),
            targets.len()
        );

        let probs: Vec<f32> = approxes[0].iter().map(|&a| sigmoid(a)).collect();
        let labels: Vec<bool> = targets.iter().map(|&t| t > 0.5).collect();
        let best = self
            .thresholds
            .iter()
            .map(|&t| f1_at_threshold(&probs, &labels, t))
            .fold(0.0f32, f32::max);
        (best, 1.0)
    }

    fn is_max_optimal(&self) -> bool {
        true
    }

    fn final_error(&self, error: f32, _weight: f32) -> f32 {
        error
    }
}

/// `steps` evenly spaced values from `start` to `stop` inclusive.
///
/// `steps == 1` yields `[start]`.
pub fn linspace(start: f32, stop: f32, steps: usize) -> Vec<f32> {
    if steps <= 1 {
        return vec![start; steps];
    }
    let span = stop - start;
    let denom = (steps - 1) as f32;
    (0..steps)
        .map(|i| start + span * (i as f32 / denom))
        .collect()
}
