//! End-to-end checks for the sweep metric inside the boosting trainer.

use tempfile::tempdir;

use sweepf1::dataset::{synthetic_split, toy_split};
use sweepf1::ml::eval::{MetricEval, SweepF1};
use sweepf1::ml::gbdt_stump::{StumpModel, TrainOptions, train_stumps};
use sweepf1::ml::metrics::sweep_report;

/// Wraps the sweep metric and counts `evaluate` invocations.
struct CountingMetric {
    inner: SweepF1,
    calls: usize,
}

impl MetricEval for CountingMetric {
    fn evaluate(
        &mut self,
        approxes: &[Vec<f32>],
        targets: &[f32],
        weights: Option<&[f32]>,
    ) -> (f32, f32) {
        self.calls += 1;
        self.inner.evaluate(approxes, targets, weights)
    }

    fn is_max_optimal(&self) -> bool {
        self.inner.is_max_optimal()
    }

    fn final_error(&self, error: f32, weight: f32) -> f32 {
        self.inner.final_error(error, weight)
    }
}

#[test]
fn trainer_issues_bookkeeping_and_report_pairs() {
    let (train, eval) = toy_split();
    let mut metric = CountingMetric {
        inner: SweepF1::new(0.1, 0.7, 10).unwrap(),
        calls: 0,
    };
    let options = TrainOptions {
        rounds: 4,
        learning_rate: 0.1,
        bins: 8,
        use_best_model: false,
    };
    let model = train_stumps(&train, Some(&eval), &mut metric, &options).unwrap();
    assert_eq!(metric.calls, 8);
    assert_eq!(model.stumps.len(), 4);
}

#[test]
fn metric_is_untouched_without_an_eval_set() {
    let (train, _) = toy_split();
    let mut metric = CountingMetric {
        inner: SweepF1::new(0.1, 0.7, 10).unwrap(),
        calls: 0,
    };
    let options = TrainOptions {
        rounds: 3,
        ..TrainOptions::default()
    };
    train_stumps(&train, None, &mut metric, &options).unwrap();
    assert_eq!(metric.calls, 0);
}

#[test]
fn toy_run_reports_a_bounded_score() {
    let (train, eval) = toy_split();
    let mut metric = SweepF1::new(0.1, 0.7, 10).unwrap();
    let options = TrainOptions {
        rounds: 5,
        learning_rate: 0.1,
        bins: 16,
        use_best_model: true,
    };
    let model = train_stumps(&train, Some(&eval), &mut metric, &options).unwrap();
    assert!(!model.stumps.is_empty());
    assert!(model.stumps.len() <= 5);

    let probs: Vec<f32> = eval.x.iter().map(|row| model.predict_proba(row)).collect();
    let targets: Vec<bool> = eval.y.iter().map(|&y| y == 1).collect();
    let report = sweep_report(&probs, &targets, metric.thresholds());
    assert!(report.best_f1.is_finite());
    assert!((0.0..=1.0).contains(&report.best_f1));
}

#[test]
fn synthetic_run_beats_the_trivial_classifier() {
    let (train, eval) = synthetic_split(200, 7);
    let mut metric = SweepF1::new(0.1, 0.9, 17).unwrap();
    let options = TrainOptions {
        rounds: 30,
        learning_rate: 0.2,
        bins: 16,
        use_best_model: true,
    };
    let model = train_stumps(&train, Some(&eval), &mut metric, &options).unwrap();
    let probs: Vec<f32> = eval.x.iter().map(|row| model.predict_proba(row)).collect();
    let targets: Vec<bool> = eval.y.iter().map(|&y| y == 1).collect();
    let report = sweep_report(&probs, &targets, metric.thresholds());
    // Predicting everything positive already scores ~0.67 on a balanced set;
    // the trained model has to do better than that.
    assert!(report.best_f1 > 0.7, "best f1 was {}", report.best_f1);
}

#[test]
fn model_json_round_trip_preserves_predictions() {
    let (train, eval) = toy_split();
    let mut metric = SweepF1::new(0.1, 0.7, 10).unwrap();
    let options = TrainOptions {
        rounds: 5,
        ..TrainOptions::default()
    };
    let model = train_stumps(&train, Some(&eval), &mut metric, &options).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("model.json");
    std::fs::write(&path, serde_json::to_vec_pretty(&model).unwrap()).unwrap();
    let loaded = StumpModel::load_json(&path).unwrap();
    for row in &eval.x {
        assert_eq!(model.predict_raw(row), loaded.predict_raw(row));
    }
}
