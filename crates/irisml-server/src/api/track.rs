//! Request tracking middleware.
//!
//! Wraps every inbound call: start timestamp, downstream handler, elapsed
//! duration, then one counter increment and one histogram observation. The
//! downstream response passes through unmodified. `/metrics` itself is
//! skipped so each scrape does not inflate the series it reports.

use std::time::Instant;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::app_state::AppState;

pub async fn track_http(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    if path == "/metrics" {
        return next.run(req).await;
    }

    let method = req.method().clone();
    let start = Instant::now();

    let response = next.run(req).await;
    let elapsed = start.elapsed();

    let metrics = state.metrics();
    metrics.http_requests.inc(&[
        ("method", method.as_str()),
        ("endpoint", &path),
        ("status", response.status().as_str()),
    ]);
    metrics
        .http_latency
        .observe(&[("method", method.as_str()), ("endpoint", &path)], elapsed);

    response
}
