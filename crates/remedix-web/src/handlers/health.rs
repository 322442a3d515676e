//! Readiness information.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub reference_rows: usize,
    pub plastic_types: Vec<String>,
    pub model_loaded: bool,
}

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Json<HealthStatus> {
    let reference_rows = state.reference.len();
    Json(HealthStatus {
        status: if reference_rows > 0 { "ok" } else { "degraded" },
        reference_rows,
        plastic_types: state.reference.plastic_types().into_iter().map(String::from).collect(),
        model_loaded: state.classifier.has_model(),
    })
}
