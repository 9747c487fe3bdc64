use crate::ml::gbdt_stump::TrainDataset;

/// Fixed demonstration dataset.
///
/// Six features per row; the two leading columns are categorical values
/// carried as small integer codes (`a=0, b=1, c=2, d=3`), already encoded so
/// the trainer sees plain numeric features.
pub fn toy_split() -> (TrainDataset, TrainDataset) {
    let train = TrainDataset {
        x: vec![
            vec![0.0, 1.0, 1.0, 4.0, 5.0, 6.0],
            vec![0.0, 1.0, 4.0, 5.0, 6.0, 7.0],
            vec![2.0, 3.0, 30.0, 40.0, 50.0, 60.0],
        ],
        y: vec![1, 1, 0],
    };
    let eval = TrainDataset {
        x: vec![
            vec![0.0, 2.0, 3.0, 4.0, 4.0, 1.0],
            vec![0.0, 3.0, 1.0, 5.0, 5.0, 5.0],
            vec![1.0, 3.0, 31.0, 25.0, 60.0, 70.0],
            vec![1.0, 0.0, 31.0, 1.0, 60.0, 70.0],
            vec![1.0, 0.0, 31.0, 1.0, 2.0, 1.0],
        ],
        y: vec![0, 1, 1, 0, 1],
    };
    (train, eval)
}
