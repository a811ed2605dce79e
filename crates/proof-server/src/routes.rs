//! API route definitions for district proof generation.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::RwLock;

use crate::handlers;
use crate::AppState;

/// Create API routes
pub fn api_routes() -> Router<Arc<RwLock<AppState>>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Proof generation endpoints
        .route("/api/prove/membership", post(handlers::prove_membership))
        .route("/api/prove/two-tier", post(handlers::prove_two_tier))
        // Utility endpoints
        .route("/api/nullifier", post(handlers::derive_nullifier_handler))
}
