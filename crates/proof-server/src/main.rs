//! HTTP API server for district membership proof generation.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod handlers;
mod routes;

use district_prover::setup::{setup_all_circuits, CircuitKeys};

/// Application state shared across handlers
pub struct AppState {
    pub keys: Arc<CircuitKeys>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("starting district proof server");

    // Load or generate circuit keys
    let keys_dir = std::path::Path::new("keys");
    let keys = if keys_dir.exists() {
        tracing::info!(?keys_dir, "loading existing circuit keys");
        CircuitKeys::load_from_directory(keys_dir).expect("Failed to load circuit keys")
    } else {
        tracing::info!("running trusted setup (this may take a while)");
        let keys = setup_all_circuits().expect("Failed to setup circuits");
        keys.save_to_directory(keys_dir)
            .expect("Failed to save circuit keys");
        tracing::info!(?keys_dir, "circuit keys saved");
        keys
    };

    let state = Arc::new(RwLock::new(AppState {
        keys: Arc::new(keys),
    }));

    // Build router
    let app = Router::new()
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 3001));
    tracing::info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
