use tracing::{debug, info};

use super::model::{Stump, StumpModel};
use crate::ml::eval::MetricEval;
use crate::ml::metrics::sigmoid;

/// Training hyperparameters for stump boosting.
#[derive(Debug, Clone)]
pub struct TrainOptions {
    /// Number of boosting rounds.
    pub rounds: usize,
    /// Learning rate applied per round.
    pub learning_rate: f32,
    /// Number of bins used for split search.
    pub bins: usize,
    /// Truncate the ensemble to the best eval-metric round.
    pub use_best_model: bool,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            rounds: 100,
            learning_rate: 0.1,
            bins: 32,
            use_best_model: false,
        }
    }
}

/// In-memory dataset used for training and evaluation.
#[derive(Debug, Clone)]
pub struct TrainDataset {
    /// Feature matrix, row-major.
    pub x: Vec<Vec<f32>>,
    /// Binary labels (`0` or `1`) aligned with `x`.
    pub y: Vec<u8>,
}

impl TrainDataset {
    /// Number of `f32` values per feature vector.
    pub fn feature_len(&self) -> usize {
        self.x.first().map(|row| row.len()).unwrap_or(0)
    }
}

/// Train a binary stump-GBDT model with logloss gradient boosting.
///
/// When `eval` is provided the metric is invoked twice per round in
/// bookkeeping/report order and only the report score is kept. With
/// `use_best_model` the ensemble is truncated to the best-scoring round,
/// where "best" follows the metric's `is_max_optimal` direction.
pub fn train_stumps(
    train: &TrainDataset,
    eval: Option<&TrainDataset>,
    metric: &mut dyn MetricEval,
    options: &TrainOptions,
) -> Result<StumpModel, String> {
    if train.x.len() != train.y.len() {
        return Err("Mismatched X/Y lengths".to_string());
    }
    if train.x.is_empty() {
        return Err("Empty dataset".to_string());
    }
    if train.y.iter().any(|&label| label > 1) {
        return Err("Labels must be 0 or 1".to_string());
    }
    if let Some(eval) = eval {
        if eval.x.len() != eval.y.len() {
            return Err("Mismatched eval X/Y lengths".to_string());
        }
        if eval.x.is_empty() {
            return Err("Empty eval set".to_string());
        }
    }
    if !(options.learning_rate > 0.0) {
        return Err("learning_rate must be positive".to_string());
    }

    let n = train.x.len();
    let d = train.feature_len();
    let (mins, maxs) = compute_feature_min_max(&train.x, d);
    let binned = bin_features(&train.x, &mins, &maxs, options.bins);

    let base_score = prior_log_odds(&train.y);
    let mut raw = vec![base_score; n];
    let mut stumps: Vec<Stump> = Vec::with_capacity(options.rounds);

    let mut eval_raw: Vec<f32> = eval.map(|ds| vec![base_score; ds.x.len()]).unwrap_or_default();
    let eval_targets: Vec<f32> = eval
        .map(|ds| ds.y.iter().map(|&label| label as f32).collect())
        .unwrap_or_default();
    let mut best: Option<(usize, f32)> = None;

    for round in 0..options.rounds {
        let residuals: Vec<f32> = train
            .y
            .iter()
            .zip(raw.iter())
            .map(|(&label, &score)| label as f32 - sigmoid(score))
            .collect();
        let stump = fit_best_stump(&binned, &train.x, &mins, &maxs, options.bins, &residuals);
        for i in 0..n {
            raw[i] += options.learning_rate * stump.predict(&train.x[i]);
        }

        if let Some(eval) = eval {
            for (score, row) in eval_raw.iter_mut().zip(eval.x.iter()) {
                *score += options.learning_rate * stump.predict(row);
            }
            let approxes = vec![eval_raw.clone()];
            // Bookkeeping pass; the host protocol discards this result.
            let _ = metric.evaluate(&approxes, &eval_targets, None);
            let (score, _weight) = metric.evaluate(&approxes, &eval_targets, None);
            debug!(round, score, "eval round");
            let improved = match best {
                None => true,
                Some((_, best_score)) => {
                    if metric.is_max_optimal() {
                        score > best_score
                    } else {
                        score < best_score
                    }
                }
            };
            if improved {
                best = Some((round + 1, score));
            }
        }

        stumps.push(stump);
    }

    if options.use_best_model {
        if let Some((keep, score)) = best {
            stumps.truncate(keep);
            info!(rounds = keep, score, "kept best model");
        }
    }

    let model = StumpModel {
        model_version: 1,
        learning_rate: options.learning_rate,
        base_score,
        stumps,
    };
    model.validate()?;
    Ok(model)
}

/// Log-odds of the positive class, clamped away from degenerate priors.
fn prior_log_odds(y: &[u8]) -> f32 {
    let positives = y.iter().filter(|&&label| label == 1).count();
    let p = (positives as f32 / y.len().max(1) as f32).clamp(1e-6, 1.0 - 1e-6);
    (p / (1.0 - p)).ln()
}

fn compute_feature_min_max(x: &[Vec<f32>], feature_len: usize) -> (Vec<f32>, Vec<f32>) {
    let mut mins = vec![f32::INFINITY; feature_len];
    let mut maxs = vec![f32::NEG_INFINITY; feature_len];
    for row in x {
        for (j, &v) in row.iter().take(feature_len).enumerate() {
            if v.is_finite() {
                mins[j] = mins[j].min(v);
                maxs[j] = maxs[j].max(v);
            }
        }
    }
    for j in 0..feature_len {
        if !mins[j].is_finite() || !maxs[j].is_finite() {
            mins[j] = 0.0;
            maxs[j] = 0.0;
        }
        if mins[j] == maxs[j] {
            maxs[j] = mins[j] + 1.0;
        }
    }
    (mins, maxs)
}

fn bin_features(x: &[Vec<f32>], mins: &[f32], maxs: &[f32], bins: usize) -> Vec<Vec<u8>> {
    let bins = bins.clamp(2, 256) as f32;
    let mut out: Vec<Vec<u8>> = Vec::with_capacity(x.len());
    for row in x {
        let mut binned = Vec::with_capacity(mins.len());
        for (j, &min) in mins.iter().enumerate() {
            let max = maxs[j];
            let v = row.get(j).copied().unwrap_or(0.0);
            let t = if max > min {
                ((v - min) / (max - min)).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let b = (t * (bins - 1.0)).round() as u8;
            binned.push(b);
        }
        out.push(binned);
    }
    out
}

fn fit_best_stump(
    binned: &[Vec<u8>],
    x: &[Vec<f32>],
    mins: &[f32],
    maxs: &[f32],
    bins: usize,
    residuals: &[f32],
) -> Stump {
    let n_features = mins.len();
    let bins = bins.clamp(2, 256);

    let mut best = BestSplit::default();
    for feature_idx in 0..n_features {
        let split = best_split_for_feature(binned, residuals, feature_idx, bins);
        if split.score < best.score {
            best = split;
        }
    }

    let feature_idx = best.feature_index;
    let threshold = threshold_for_bin(mins[feature_idx], maxs[feature_idx], best.split_bin, bins);
    let (left_value, right_value) = leaf_means_for_threshold(x, residuals, feature_idx, threshold);
    Stump {
        feature_index: feature_idx as u16,
        threshold,
        left_value,
        right_value,
    }
}

#[derive(Debug, Clone)]
struct BestSplit {
    score: f64,
    feature_index: usize,
    split_bin: usize,
}

impl Default for BestSplit {
    fn default() -> Self {
        Self {
            score: f64::INFINITY,
            feature_index: 0,
            split_bin: 0,
        }
    }
}

fn best_split_for_feature(
    binned: &[Vec<u8>],
    residuals: &[f32],
    feature_idx: usize,
    bins: usize,
) -> BestSplit {
    let mut counts = vec![0u32; bins];
    let mut sums = vec![0f64; bins];
    let mut sums_sq = vec![0f64; bins];
    for (i, row) in binned.iter().enumerate() {
        let b = row.get(feature_idx).copied().unwrap_or(0) as usize;
        let r = residuals[i] as f64;
        counts[b] += 1;
        sums[b] += r;
        sums_sq[b] += r * r;
    }
    let total_count: u32 = counts.iter().sum();
    if total_count == 0 {
        return BestSplit::default();
    }
    let total_sum: f64 = sums.iter().sum();
    let total_sum_sq: f64 = sums_sq.iter().sum();

    let mut best_score = f64::INFINITY;
    let mut best_bin = 0usize;

    let mut left_count = 0u32;
    let mut left_sum = 0f64;
    let mut left_sum_sq = 0f64;

    for split_bin in 0..(bins - 1) {
        left_count += counts[split_bin];
        left_sum += sums[split_bin];
        left_sum_sq += sums_sq[split_bin];
        let right_count = total_count - left_count;
        if left_count == 0 || right_count == 0 {
            continue;
        }
        let right_sum = total_sum - left_sum;
        let right_sum_sq = total_sum_sq - left_sum_sq;
        let left_sse = left_sum_sq - (left_sum * left_sum) / left_count as f64;
        let right_sse = right_sum_sq - (right_sum * right_sum) / right_count as f64;
        let score = left_sse + right_sse;
        if score < best_score {
            best_score = score;
            best_bin = split_bin;
        }
    }

    BestSplit {
        score: best_score,
        feature_index: feature_idx,
        split_bin: best_bin,
    }
}

fn threshold_for_bin(min: f32, max: f32, split_bin: usize, bins: usize) -> f32 {
    let bins_f = bins as f32;
    let t = ((split_bin + 1) as f32) / bins_f;
    min + t * (max - min)
}

fn leaf_means_for_threshold(
    x: &[Vec<f32>],
    residuals: &[f32],
    feature_idx: usize,
    threshold: f32,
) -> (f32, f32) {
    let mut left_sum = 0.0f32;
    let mut left_count = 0u32;
    let mut right_sum = 0.0f32;
    let mut right_count = 0u32;
    for (i, row) in x.iter().enumerate() {
        let v = row.get(feature_idx).copied().unwrap_or(0.0);
        if v <= threshold {
            left_sum += residuals[i];
            left_count += 1;
        } else {
            right_sum += residuals[i];
            right_count += 1;
        }
    }
    let left_mean = if left_count == 0 {
        0.0
    } else {
        left_sum / left_count as f32
    };
    let right_mean = if right_count == 0 {
        0.0
    } else {
        right_sum / right_count as f32
    };
    (left_mean, right_mean)
}
