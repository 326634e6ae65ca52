//! Iris classifier: training, inference, evaluation, persistence.

use std::fs;
use std::path::Path;

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use irisml_core::error::{Result, ServeError};
use irisml_core::schema::IrisClass;

use crate::config::ModelSection;
use crate::ml::dataset;
use crate::ml::forest::BaggedForest;

/// Contract the request pipeline depends on. The classifier is effectively
/// immutable after startup, so implementations are safe for unbounded
/// concurrent reads.
pub trait Classifier: Send + Sync {
    fn is_trained(&self) -> bool;
    fn accuracy(&self) -> f64;
    fn predict(&self, features: &[f64; 4]) -> Result<(IrisClass, [f64; 3])>;
}

/// Ensemble hyperparameters.
#[derive(Debug, Clone, Copy)]
pub struct ForestParams {
    pub trees: usize,
    pub max_depth: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            trees: 100,
            max_depth: 10,
            seed: 42,
        }
    }
}

impl From<&ModelSection> for ForestParams {
    fn from(model: &ModelSection) -> Self {
        Self {
            trees: model.trees,
            max_depth: model.max_depth,
            seed: model.seed,
        }
    }
}

const ARTIFACT_VERSION: u8 = 1;

/// Persisted model artifact. The forest is serialized to MessagePack first
/// and carried as an opaque payload next to its held-out accuracy.
#[derive(Serialize, Deserialize)]
struct ModelArtifact {
    version: u8,
    accuracy: f64,
    payload: Vec<u8>,
}

/// Lifecycle: created untrained, then `train` or `load` exactly once at
/// startup; afterwards only `predict`/`evaluate` (non-mutating) are used.
pub struct IrisClassifier {
    params: ForestParams,
    forest: Option<BaggedForest>,
    accuracy: f64,
    holdout: Option<(Array2<f64>, Array1<usize>)>,
}

impl IrisClassifier {
    pub fn new(params: ForestParams) -> Self {
        Self {
            params,
            forest: None,
            accuracy: 0.0,
            holdout: None,
        }
    }

    pub fn is_trained(&self) -> bool {
        self.forest.is_some()
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// Fit the ensemble on a fixed 80/20 split and return held-out accuracy.
    ///
    /// Deterministic for a fixed seed: the split shuffle and every bootstrap
    /// resample are drawn from the same seeded RNG.
    pub fn train(&mut self) -> Result<f64> {
        let mut rng = StdRng::seed_from_u64(self.params.seed);
        let split = dataset::load_split(&mut rng);

        let forest = BaggedForest::fit(
            &split.train,
            self.params.trees,
            self.params.max_depth,
            &mut rng,
        )?;

        self.forest = Some(forest);
        self.holdout = Some((split.holdout_records, split.holdout_targets));
        self.accuracy = self.evaluate();
        Ok(self.accuracy)
    }

    /// Recompute accuracy on the stored held-out set. Non-destructive;
    /// returns 0.0 when no held-out set exists (untrained, or loaded from an
    /// artifact that does not carry one).
    pub fn evaluate(&self) -> f64 {
        let (Some(forest), Some((records, targets))) = (self.forest.as_ref(), self.holdout.as_ref())
        else {
            return 0.0;
        };

        match forest.predict_batch(records) {
            Ok(predicted) => {
                let correct = predicted
                    .iter()
                    .zip(targets.iter())
                    .filter(|(p, t)| p == t)
                    .count();
                correct as f64 / targets.len() as f64
            }
            Err(err) => {
                tracing::warn!(%err, "holdout evaluation failed");
                0.0
            }
        }
    }

    /// Serialize the fitted forest plus its accuracy to a single artifact.
    pub fn save(&self, path: &str) -> Result<()> {
        let forest = self.forest.as_ref().ok_or(ServeError::ModelUnavailable)?;

        let payload = rmp_serde::to_vec(forest)
            .map_err(|e| ServeError::Internal(format!("model encode failed: {e}")))?;
        let artifact = ModelArtifact {
            version: ARTIFACT_VERSION,
            accuracy: self.accuracy,
            payload,
        };
        let bytes = rmp_serde::to_vec(&artifact)
            .map_err(|e| ServeError::Internal(format!("artifact encode failed: {e}")))?;
        fs::write(path, bytes).map_err(|e| ServeError::Internal(format!("artifact write failed: {e}")))
    }

    /// Load a previously saved artifact. `Ok(false)` when the file is absent;
    /// a present-but-unreadable artifact is an error.
    pub fn load(&mut self, path: &str) -> Result<bool> {
        if !Path::new(path).exists() {
            return Ok(false);
        }

        let bytes =
            fs::read(path).map_err(|e| ServeError::Internal(format!("artifact read failed: {e}")))?;
        let artifact: ModelArtifact = rmp_serde::from_slice(&bytes)
            .map_err(|e| ServeError::Internal(format!("artifact decode failed: {e}")))?;
        if artifact.version != ARTIFACT_VERSION {
            return Err(ServeError::Internal(format!(
                "unsupported artifact version: {}",
                artifact.version
            )));
        }

        let forest: BaggedForest = rmp_serde::from_slice(&artifact.payload)
            .map_err(|e| ServeError::Internal(format!("model decode failed: {e}")))?;

        self.forest = Some(forest);
        self.accuracy = artifact.accuracy;
        self.holdout = None;
        Ok(true)
    }
}

impl Classifier for IrisClassifier {
    fn is_trained(&self) -> bool {
        self.forest.is_some()
    }

    fn accuracy(&self) -> f64 {
        self.accuracy
    }

    fn predict(&self, features: &[f64; 4]) -> Result<(IrisClass, [f64; 3])> {
        let forest = self.forest.as_ref().ok_or(ServeError::ModelUnavailable)?;
        forest.predict_probabilities(features)
    }
}
