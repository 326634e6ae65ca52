//! Response bodies for the HTTP surface.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::schema::classes::IrisClass;

/// Response body for `POST /predict`.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    /// Predicted iris species.
    pub predicted_class: IrisClass,
    /// Confidence score (0-1), the maximum entry of `probabilities`.
    pub confidence: f64,
    /// Probability for each class.
    pub probabilities: BTreeMap<&'static str, f64>,
}

impl PredictionResult {
    /// Build a result from a probability vector aligned to `IrisClass::ALL`.
    ///
    /// Invariant: `confidence` equals the maximum probability and the map
    /// carries exactly the three class labels.
    pub fn new(predicted_class: IrisClass, probabilities: [f64; 3]) -> Self {
        let confidence = probabilities.iter().copied().fold(0.0_f64, f64::max);
        let probabilities = IrisClass::ALL
            .iter()
            .zip(probabilities.iter())
            .map(|(class, p)| (class.as_str(), *p))
            .collect();
        Self {
            predicted_class,
            confidence,
            probabilities,
        }
    }
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
    pub model_accuracy: f64,
}

/// Response body for `GET /` (static service info).
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub health: &'static str,
    pub metrics: &'static str,
}
