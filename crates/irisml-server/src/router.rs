//! Axum router wiring.
//!
//! Every route passes through the tracking middleware; the middleware itself
//! exempts `/metrics` from recording.

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::{api, app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ops::root))
        .route("/health", get(ops::health))
        .route("/metrics", get(ops::metrics))
        .route("/predict", post(api::predict::predict))
        .layer(middleware::from_fn_with_state(state.clone(), api::track::track_http))
        .with_state(state)
}
