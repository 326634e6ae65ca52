//! Deterministic train/holdout split of the iris dataset.

use linfa::{Dataset, DatasetBase};
use ndarray::{Array1, Array2, Axis, Ix1};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Fraction of samples that goes into the training set.
const TRAIN_RATIO: f64 = 0.8;

pub struct SplitData {
    pub train: Dataset<f64, usize, Ix1>,
    pub holdout_records: Array2<f64>,
    pub holdout_targets: Array1<usize>,
}

/// Shuffle the 150-sample iris dataset with the given RNG and split 80/20.
///
/// The shuffle is required: the raw dataset is ordered by class, so an
/// in-order split would leave one class entirely out of training.
pub fn load_split(rng: &mut StdRng) -> SplitData {
    let ds = linfa_datasets::iris();
    let records = ds.records().to_owned();
    let targets = ds.targets().to_owned();

    let n = records.nrows();
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(rng);

    let n_train = (n as f64 * TRAIN_RATIO) as usize;
    let (train_idx, holdout_idx) = indices.split_at(n_train);

    let train = DatasetBase::from(records.select(Axis(0), train_idx))
        .with_targets(targets.select(Axis(0), train_idx));

    SplitData {
        train,
        holdout_records: records.select(Axis(0), holdout_idx),
        holdout_targets: targets.select(Axis(0), holdout_idx),
    }
}
