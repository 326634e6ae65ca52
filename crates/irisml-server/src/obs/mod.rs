//! Lightweight in-process metrics.
//!
//! Counters, gauges, and histograms are stored as atomics keyed by label
//! sets and rendered on demand by the `/metrics` handler. No exporter crate;
//! the registry is an explicitly constructed value owned by `AppState`.

pub mod metrics;

pub use metrics::ServeMetrics;
