//! Shared application state.
//!
//! The metrics registry and the classifier handle are constructed once and
//! injected here rather than living as ambient globals, so the pipeline can
//! be exercised in isolation (integration tests build their own state).

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::ml::Classifier;
use crate::obs::ServeMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServerConfig,
    metrics: ServeMetrics,
    classifier: Arc<dyn Classifier>,
}

impl AppState {
    /// Build application state: constructs the registry, pre-registers the
    /// static series, and publishes the classifier's current accuracy.
    pub fn new(cfg: ServerConfig, classifier: Arc<dyn Classifier>) -> Self {
        let metrics = ServeMetrics::new();
        metrics.init(&cfg.model.name);
        metrics.set_accuracy(&cfg.model.name, classifier.accuracy());

        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                metrics,
                classifier,
            }),
        }
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> &ServeMetrics {
        &self.inner.metrics
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.inner.classifier.as_ref()
    }

    /// Model name used in metric labels.
    pub fn model_name(&self) -> &str {
        &self.inner.cfg.model.name
    }
}
