//! Operational HTTP endpoints.
//!
//! - `/`        : static service info
//! - `/health`  : liveness + model readiness
//! - `/metrics` : Prometheus text format

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use irisml_core::schema::{HealthResponse, ServiceInfo};

use crate::app_state::AppState;
use crate::ml::Classifier;

pub const SERVICE_NAME: &str = "Iris Classifier API";

pub async fn root() -> impl IntoResponse {
    Json(ServiceInfo {
        name: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        health: "/health",
        metrics: "/metrics",
    })
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let classifier = state.classifier();
    Json(HealthResponse {
        status: "healthy",
        model_loaded: classifier.is_trained(),
        model_accuracy: classifier.accuracy(),
    })
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.metrics().render();

    (
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        body,
    )
        .into_response()
}
