use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ml::gbdt_stump::TrainDataset;

/// Feature count for generated rows.
const FEATURES: usize = 6;

/// Seeded two-cluster binary dataset split into train and eval halves.
///
/// Rows alternate between the splits so both stay class-balanced. `n` is the
/// total row count across both halves.
pub fn synthetic_split(n: usize, seed: u64) -> (TrainDataset, TrainDataset) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = TrainDataset { x: Vec::new(), y: Vec::new() };
    let mut eval = TrainDataset { x: Vec::new(), y: Vec::new() };

    for i in 0..n {
        let label = (i % 2) as u8;
        let center = if label == 1 { 1.0 } else { -1.0 };
        let row: Vec<f32> = (0..FEATURES)
            .map(|_| center + (rng.random::<f32>() - 0.5) * 1.5)
            .collect();
        let split = if i % 4 < 2 { &mut train } else { &mut eval };
        split.x.push(row);
        split.y.push(label);
    }

    (train, eval)
}
