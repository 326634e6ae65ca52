//! Bagged ensemble of decision trees.
//!
//! Each tree is fit on a bootstrap resample of the training set; prediction
//! is a majority vote and the probability vector is the per-class vote
//! share, aligned to `IrisClass::ALL`.

use linfa::traits::{Fit, Predict};
use linfa::{Dataset, DatasetBase};
use linfa_trees::DecisionTree;
use ndarray::{Array1, Array2, Axis, Ix1};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use irisml_core::error::{Result, ServeError};
use irisml_core::schema::IrisClass;

const NUM_CLASSES: usize = IrisClass::ALL.len();

#[derive(Serialize, Deserialize)]
pub struct BaggedForest {
    trees: Vec<DecisionTree<f64, usize>>,
}

impl BaggedForest {
    /// Fit `n_trees` trees, each on a bootstrap resample drawn from `rng`.
    pub fn fit(
        train: &Dataset<f64, usize, Ix1>,
        n_trees: usize,
        max_depth: usize,
        rng: &mut StdRng,
    ) -> Result<Self> {
        if n_trees == 0 {
            return Err(ServeError::Training("ensemble needs at least one tree".into()));
        }

        let n = train.records().nrows();
        let mut trees = Vec::with_capacity(n_trees);
        for _ in 0..n_trees {
            let indices: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
            let bootstrap = DatasetBase::from(train.records().select(Axis(0), &indices))
                .with_targets(train.targets().select(Axis(0), &indices));

            let tree = DecisionTree::params()
                .max_depth(Some(max_depth))
                .fit(&bootstrap)
                .map_err(|e| ServeError::Training(format!("tree fit failed: {e}")))?;
            trees.push(tree);
        }
        Ok(Self { trees })
    }

    /// Predict a single sample: majority-vote class plus per-class vote share.
    pub fn predict_probabilities(&self, features: &[f64; 4]) -> Result<(IrisClass, [f64; 3])> {
        let records = Array2::from_shape_vec((1, features.len()), features.to_vec())
            .map_err(|e| ServeError::Inference(format!("bad feature shape: {e}")))?;
        let ds = DatasetBase::from(records);

        let mut votes = [0usize; NUM_CLASSES];
        for tree in &self.trees {
            let pred = tree.predict(&ds);
            let idx = pred
                .first()
                .copied()
                .ok_or_else(|| ServeError::Inference("empty prediction".into()))?;
            let slot = votes
                .get_mut(idx)
                .ok_or_else(|| ServeError::Inference(format!("target index {idx} out of class range")))?;
            *slot += 1;
        }

        let total = self.trees.len() as f64;
        let probabilities = [
            votes[0] as f64 / total,
            votes[1] as f64 / total,
            votes[2] as f64 / total,
        ];
        let class = IrisClass::from_index(argmax(&votes))
            .ok_or_else(|| ServeError::Inference("vote index out of class range".into()))?;
        Ok((class, probabilities))
    }

    /// Majority-vote predictions for a batch (holdout evaluation path).
    pub fn predict_batch(&self, records: &Array2<f64>) -> Result<Array1<usize>> {
        let ds = DatasetBase::from(records.to_owned());
        let mut votes = vec![[0usize; NUM_CLASSES]; records.nrows()];

        for tree in &self.trees {
            let pred = tree.predict(&ds);
            for (row, idx) in pred.iter().enumerate() {
                let slot = votes
                    .get_mut(row)
                    .and_then(|v| v.get_mut(*idx))
                    .ok_or_else(|| ServeError::Inference(format!("target index {idx} out of class range")))?;
                *slot += 1;
            }
        }

        Ok(votes.iter().map(argmax).collect())
    }
}

/// Index of the largest vote count; ties break toward the lower index so the
/// result is deterministic.
fn argmax(votes: &[usize; NUM_CLASSES]) -> usize {
    let mut best = 0;
    for (i, &count) in votes.iter().enumerate().skip(1) {
        if count > votes[best] {
            best = i;
        }
    }
    best
}
