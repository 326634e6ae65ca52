//! Classifier stack: dataset split, bagged tree ensemble, persistence.

pub mod classifier;
pub mod dataset;
pub mod forest;

pub use classifier::{Classifier, ForestParams, IrisClassifier};
pub use forest::BaggedForest;

use irisml_core::error::Result;

use crate::config::ModelSection;

/// Obtain a usable classifier: load the persisted artifact when present,
/// otherwise train a new model and save it for the next start.
pub fn load_or_train(model: &ModelSection) -> Result<IrisClassifier> {
    let mut clf = IrisClassifier::new(ForestParams::from(model));

    match clf.load(&model.path) {
        Ok(true) => {
            tracing::info!(accuracy = clf.accuracy(), path = %model.path, "loaded pre-trained model");
            return Ok(clf);
        }
        Ok(false) => {}
        Err(err) => {
            tracing::warn!(%err, path = %model.path, "model artifact unreadable, retraining");
        }
    }

    tracing::info!(trees = model.trees, seed = model.seed, "training new model");
    let accuracy = clf.train()?;

    match clf.save(&model.path) {
        Ok(()) => tracing::info!(accuracy, path = %model.path, "model trained and saved"),
        Err(err) => tracing::warn!(%err, path = %model.path, "model save failed"),
    }

    Ok(clf)
}
