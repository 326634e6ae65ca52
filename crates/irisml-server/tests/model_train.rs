//! Classifier training, prediction, and persistence behavior.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use irisml_core::schema::IrisClass;
use irisml_core::ServeError;
use irisml_server::ml::{Classifier, ForestParams, IrisClassifier};

fn trained(params: ForestParams) -> IrisClassifier {
    let mut clf = IrisClassifier::new(params);
    clf.train().expect("training must succeed");
    clf
}

#[test]
fn training_reports_usable_accuracy() {
    let clf = trained(ForestParams::default());
    assert!(clf.is_trained());
    assert!(clf.accuracy() > 0.8, "accuracy was {}", clf.accuracy());
    assert!(clf.accuracy() <= 1.0);
}

#[test]
fn training_is_deterministic_for_a_fixed_seed() {
    let params = ForestParams {
        trees: 25,
        max_depth: 10,
        seed: 42,
    };
    let a = trained(params);
    let b = trained(params);
    assert_eq!(a.accuracy(), b.accuracy());

    // Same seed, same forest: predictions agree including probabilities.
    let sample = [6.1, 2.9, 4.7, 1.4];
    let (class_a, probs_a) = a.predict(&sample).unwrap();
    let (class_b, probs_b) = b.predict(&sample).unwrap();
    assert_eq!(class_a, class_b);
    assert_eq!(probs_a, probs_b);
}

#[test]
fn known_species_are_recovered() {
    let clf = trained(ForestParams {
        trees: 50,
        ..ForestParams::default()
    });

    let (class, probs) = clf.predict(&[5.0, 3.4, 1.5, 0.2]).unwrap();
    assert_eq!(class, IrisClass::Setosa);
    let confidence = probs.iter().copied().fold(0.0_f64, f64::max);
    assert!(confidence > 0.8, "confidence was {confidence}");

    let (class, _) = clf.predict(&[6.0, 2.7, 4.5, 1.5]).unwrap();
    assert_eq!(class, IrisClass::Versicolor);

    let (class, _) = clf.predict(&[6.7, 3.0, 5.5, 2.1]).unwrap();
    assert_eq!(class, IrisClass::Virginica);
}

#[test]
fn probabilities_sum_to_one() {
    let clf = trained(ForestParams {
        trees: 30,
        ..ForestParams::default()
    });

    for sample in [
        [5.0, 3.4, 1.5, 0.2],
        [6.0, 2.7, 4.5, 1.5],
        [6.7, 3.0, 5.5, 2.1],
        [5.7, 2.8, 4.1, 1.3],
    ] {
        let (class, probs) = clf.predict(&sample).unwrap();
        let sum: f64 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5, "sum was {sum}");
        assert!(probs.iter().all(|p| *p >= 0.0));

        // The predicted class carries the maximum probability.
        let max = probs.iter().copied().fold(0.0_f64, f64::max);
        let class_idx = IrisClass::ALL.iter().position(|c| *c == class).unwrap();
        assert_eq!(probs[class_idx], max);
    }
}

#[test]
fn untrained_classifier_is_unavailable() {
    let clf = IrisClassifier::new(ForestParams::default());
    assert!(!clf.is_trained());
    assert_eq!(clf.accuracy(), 0.0);
    assert_eq!(clf.evaluate(), 0.0);

    match clf.predict(&[5.0, 3.4, 1.5, 0.2]) {
        Err(ServeError::ModelUnavailable) => {}
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn evaluate_matches_training_accuracy() {
    let clf = trained(ForestParams {
        trees: 25,
        ..ForestParams::default()
    });
    // Non-destructive re-evaluation on the stored holdout.
    assert_eq!(clf.evaluate(), clf.accuracy());
    assert_eq!(clf.evaluate(), clf.accuracy());
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("iris_model.bin");
    let path = path.to_str().unwrap();

    let params = ForestParams {
        trees: 25,
        ..ForestParams::default()
    };
    let clf = trained(params);
    clf.save(path).unwrap();

    let mut loaded = IrisClassifier::new(params);
    assert!(loaded.load(path).unwrap());
    assert!(loaded.is_trained());
    assert_eq!(loaded.accuracy(), clf.accuracy());

    // No holdout travels with the artifact.
    assert_eq!(loaded.evaluate(), 0.0);

    let sample = [5.9, 3.0, 5.1, 1.8];
    let (class, probs) = clf.predict(&sample).unwrap();
    let (loaded_class, loaded_probs) = loaded.predict(&sample).unwrap();
    assert_eq!(class, loaded_class);
    assert_eq!(probs, loaded_probs);
}

#[test]
fn load_missing_artifact_returns_false() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.bin");

    let mut clf = IrisClassifier::new(ForestParams::default());
    assert!(!clf.load(path.to_str().unwrap()).unwrap());
    assert!(!clf.is_trained());
}

#[test]
fn save_untrained_model_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never.bin");

    let clf = IrisClassifier::new(ForestParams::default());
    match clf.save(path.to_str().unwrap()) {
        Err(ServeError::ModelUnavailable) => {}
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn corrupt_artifact_is_an_error_not_a_miss() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.bin");
    std::fs::write(&path, b"not a model artifact").unwrap();

    let mut clf = IrisClassifier::new(ForestParams::default());
    assert!(clf.load(path.to_str().unwrap()).is_err());
}
