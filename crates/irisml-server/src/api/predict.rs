//! Prediction endpoint.
//!
//! Outcome classification drives the ML metrics: validation failures are
//! rejected before any ML series is touched; an unavailable model records
//! `model_not_loaded` without invoking inference; a successful call records
//! inference latency and a per-class prediction count; anything else records
//! `inference_failure`. Side effects are strictly additive to the registry.

use std::time::Instant;

use axum::extract::State;
use axum::Json;

use irisml_core::error::{ErrorKind, ServeError};
use irisml_core::schema::{PredictionRequest, PredictionResult};

use crate::api::ApiError;
use crate::app_state::AppState;
use crate::ml::Classifier;

pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictionRequest>,
) -> Result<Json<PredictionResult>, ApiError> {
    // Range violations are a client error; they never reach the model or its
    // error counters.
    let features = req.features().map_err(ApiError)?;

    let metrics = state.metrics();
    let model = state.model_name();

    let start = Instant::now();
    match state.classifier().predict(&features) {
        Ok((predicted_class, probabilities)) => {
            metrics
                .prediction_latency
                .observe(&[("model", model)], start.elapsed());
            metrics.predictions.inc(&[
                ("model", model),
                ("predicted_class", predicted_class.as_str()),
            ]);
            Ok(Json(PredictionResult::new(predicted_class, probabilities)))
        }
        Err(ServeError::ModelUnavailable) => {
            metrics.prediction_errors.inc(&[
                ("model", model),
                ("error_type", ErrorKind::ModelNotLoaded.as_str()),
            ]);
            Err(ApiError(ServeError::ModelUnavailable))
        }
        Err(err) => {
            metrics.prediction_errors.inc(&[
                ("model", model),
                ("error_type", ErrorKind::InferenceFailure.as_str()),
            ]);
            Err(ApiError(ServeError::Inference(err.to_string())))
        }
    }
}
