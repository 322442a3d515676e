//! Axum router — maps all URL paths to handlers.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    health::health,
    identify::identify_plastic,
    monitor::monitor_degradation,
    recommend::{api_candidates, recommend_microbe},
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        .route("/health",              get(health))
        .route("/identify_plastic",    post(identify_plastic))
        .route("/recommend_microbe",   post(recommend_microbe))
        .route("/monitor_degradation", post(monitor_degradation))
        .route("/api/candidates",      get(api_candidates))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
