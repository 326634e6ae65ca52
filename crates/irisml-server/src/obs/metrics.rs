//! Metrics registry for the serving process.
//!
//! Counter/gauge/histogram vectors with dynamic labels backed by `DashMap`.
//! Labels are flattened into sorted key vectors to keep deterministic
//! ordering, and rendered series are sorted so repeated scrapes produce
//! byte-identical output absent new traffic. Values are atomics; gauges and
//! histogram sums store `f64` bit patterns inside `AtomicU64`.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// End-to-end HTTP latency buckets in seconds.
pub const HTTP_LATENCY_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Model-only inference latency buckets in seconds. Finer at the low end so
/// sub-millisecond inference resolves separately from end-to-end overhead.
pub const ML_LATENCY_BUCKETS: &[f64] = &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0];

type LabelKey = Vec<(String, String)>;

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn render_labels(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Format a float the way the exposition format expects: integral values get
/// a trailing `.0`, everything else uses the shortest round-trip form.
fn fmt_value(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

/// Add a delta to an `f64` stored as bits. Compare-exchange loop, never a
/// bare read-modify-write.
fn add_f64(cell: &AtomicU64, delta: f64) {
    let mut cur = cell.load(Ordering::Relaxed);
    loop {
        let next = (f64::from_bits(cur) + delta).to_bits();
        match cell.compare_exchange_weak(cur, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => break,
            Err(actual) => cur = actual,
        }
    }
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for a label set (0 when the series does not exist).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Sum across all series of this vector.
    pub fn total(&self) -> u64 {
        self.map.iter().map(|r| r.value().load(Ordering::Relaxed)).sum()
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {name} {help}");
        let _ = writeln!(out, "# TYPE {name} counter");
        let mut series: Vec<(String, u64)> = self
            .map
            .iter()
            .map(|r| (render_labels(r.key()), r.value().load(Ordering::Relaxed)))
            .collect();
        series.sort();
        for (labels, val) in series {
            let _ = writeln!(out, "{name}{{{labels}}} {val}");
        }
    }
}

#[derive(Default)]
pub struct GaugeVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl GaugeVec {
    /// Set the gauge to an absolute value.
    pub fn set(&self, labels: &[(&str, &str)], v: f64) {
        let gauge = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0.0_f64.to_bits()));
        gauge.store(v.to_bits(), Ordering::Relaxed);
    }

    /// Current value for a label set (0 when the series does not exist).
    pub fn get(&self, labels: &[(&str, &str)]) -> f64 {
        self.map
            .get(&label_key(labels))
            .map(|g| f64::from_bits(g.load(Ordering::Relaxed)))
            .unwrap_or(0.0)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {name} {help}");
        let _ = writeln!(out, "# TYPE {name} gauge");
        let mut series: Vec<(String, f64)> = self
            .map
            .iter()
            .map(|r| {
                (
                    render_labels(r.key()),
                    f64::from_bits(r.value().load(Ordering::Relaxed)),
                )
            })
            .collect();
        series.sort_by(|a, b| a.0.cmp(&b.0));
        for (labels, val) in series {
            let _ = writeln!(out, "{name}{{{labels}}} {}", fmt_value(val));
        }
    }
}

struct SeriesHistogram {
    count: AtomicU64,
    sum_bits: AtomicU64,
    buckets: Vec<AtomicU64>,
}

impl SeriesHistogram {
    fn new(len: usize) -> Self {
        Self {
            count: AtomicU64::new(0),
            sum_bits: AtomicU64::new(0.0_f64.to_bits()),
            buckets: (0..len).map(|_| AtomicU64::new(0)).collect(),
        }
    }
}

pub struct HistogramVec {
    bounds: &'static [f64],
    map: DashMap<LabelKey, SeriesHistogram>,
}

impl HistogramVec {
    pub fn new(bounds: &'static [f64]) -> Self {
        Self {
            bounds,
            map: DashMap::new(),
        }
    }

    /// Observe a duration in seconds and increment cumulative buckets.
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let secs = duration.as_secs_f64();
        let hist = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| SeriesHistogram::new(self.bounds.len()));

        hist.count.fetch_add(1, Ordering::Relaxed);
        add_f64(&hist.sum_bits, secs);

        // Cumulative buckets: increment every bucket whose bound covers the value.
        for (i, &le) in self.bounds.iter().enumerate() {
            if secs <= le {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Observation count for a label set (0 when the series does not exist).
    pub fn count(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|h| h.count.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {name} {help}");
        let _ = writeln!(out, "# TYPE {name} histogram");
        let mut keys: Vec<LabelKey> = self.map.iter().map(|r| r.key().clone()).collect();
        keys.sort();
        for key in keys {
            let Some(hist) = self.map.get(&key) else { continue };
            let labels = render_labels(&key);
            let prefix = if labels.is_empty() {
                String::new()
            } else {
                format!("{labels},")
            };

            for (i, &le) in self.bounds.iter().enumerate() {
                let bucket = hist.buckets[i].load(Ordering::Relaxed);
                let _ = writeln!(out, "{name}_bucket{{{prefix}le=\"{le}\"}} {bucket}");
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{name}_bucket{{{prefix}le=\"+Inf\"}} {count}");

            let sum = f64::from_bits(hist.sum_bits.load(Ordering::Relaxed));
            let _ = writeln!(out, "{name}_sum{{{labels}}} {}", fmt_value(sum));
            let _ = writeln!(out, "{name}_count{{{labels}}} {count}");
        }
    }
}

/// Process-wide metrics for the serving stack.
///
/// Explicitly constructed and owned by `AppState` — there is no global
/// registry. Counters only increase; gauges are point-in-time; histograms
/// accumulate one observation per call with fixed bucket boundaries.
pub struct ServeMetrics {
    /// Static application info, rendered as a gauge with value 1.
    pub info: GaugeVec,
    /// HTTP requests by (method, endpoint, status).
    pub http_requests: CounterVec,
    /// End-to-end HTTP latency by (method, endpoint).
    pub http_latency: HistogramVec,
    /// Predictions by (model, predicted_class).
    pub predictions: CounterVec,
    /// Model-only inference latency by (model).
    pub prediction_latency: HistogramVec,
    /// Held-out accuracy by (model).
    pub model_accuracy: GaugeVec,
    /// Failed predictions by (model, error_type).
    pub prediction_errors: CounterVec,
}

impl Default for ServeMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ServeMetrics {
    pub fn new() -> Self {
        Self {
            info: GaugeVec::default(),
            http_requests: CounterVec::default(),
            http_latency: HistogramVec::new(HTTP_LATENCY_BUCKETS),
            predictions: CounterVec::default(),
            prediction_latency: HistogramVec::new(ML_LATENCY_BUCKETS),
            model_accuracy: GaugeVec::default(),
            prediction_errors: CounterVec::default(),
        }
    }

    /// Pre-register the static series so dashboards observe defined (zero)
    /// values before first traffic.
    ///
    /// Idempotent: series registration happens when the `ServeMetrics` value
    /// is constructed, so a repeat call only rewrites the same two series.
    pub fn init(&self, model_name: &str) {
        self.info.set(
            &[
                ("version", env!("CARGO_PKG_VERSION")),
                ("model", model_name),
                ("framework", "axum"),
            ],
            1.0,
        );
        self.model_accuracy.set(&[("model", model_name)], 0.0);
    }

    /// Publish the current held-out accuracy for a model.
    pub fn set_accuracy(&self, model_name: &str, accuracy: f64) {
        self.model_accuracy.set(&[("model", model_name)], accuracy);
    }

    /// Render all registered series in Prometheus text exposition format.
    /// Pure read; family order is fixed and series are sorted.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.info
            .render("ml_api_info", "Information about the ML API application", &mut out);
        self.http_requests
            .render("http_requests_total", "Total number of HTTP requests", &mut out);
        self.http_latency.render(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
            &mut out,
        );
        self.predictions.render(
            "ml_predictions_total",
            "Total number of ML predictions made",
            &mut out,
        );
        self.prediction_latency.render(
            "ml_prediction_duration_seconds",
            "Time spent making ML predictions",
            &mut out,
        );
        self.model_accuracy
            .render("ml_model_accuracy", "Current accuracy of the ML model", &mut out);
        self.prediction_errors.render(
            "ml_prediction_errors_total",
            "Total number of failed predictions",
            &mut out,
        );
        out
    }
}
