//! Deterministic gradient-boosted decision-stump classifier.
//!
//! This is a lightweight binary-classification host that avoids external ML
//! dependencies while still supporting:
//! - Logloss gradient boosting over histogram-binned splits.
//! - Pluggable evaluation metrics with the bookkeeping/report call protocol.
//! - Reproducible JSON model export/load.

mod model;
mod train;

pub use model::{Stump, StumpModel};
pub use train::{TrainDataset, TrainOptions, train_stumps};
