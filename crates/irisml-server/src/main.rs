//! irisml server binary.
//!
//! Startup order: tracing -> config -> model (load, or train + save on miss)
//! -> state (metrics init + accuracy gauge) -> serve. The process must not
//! serve traffic without a usable model, so a failed train aborts startup.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use irisml_server::{app_state, config, ml, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load_or_default("irisml.yaml").expect("config load failed");
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .expect("server.listen must be a valid SocketAddr");

    let classifier = ml::load_or_train(&cfg.model).expect("failed to obtain a usable model");
    tracing::info!(accuracy = classifier.accuracy(), model = %cfg.model.name, "model ready");

    let state = app_state::AppState::new(cfg, Arc::new(classifier));
    let app = router::build_router(state);

    tracing::info!(%listen, "irisml-server starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
