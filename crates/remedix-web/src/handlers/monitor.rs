//! Degradation monitoring endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use remedix_common::{ApiError, DegradationResult};
use remedix_ranker::{estimate_at_optimum, estimate_with};
use serde::Deserialize;
use tracing::debug;

use crate::handlers::json_rejection;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct MonitorRequest {
    pub plastic_type: String,
    pub microbe: String,
    pub elapsed_time: f64,
    #[serde(rename = "pH", default)]
    pub ph: Option<f64>,
    #[serde(default)]
    pub temp: Option<f64>,
}

/// POST /monitor_degradation — progress of a microbe on a plastic
///
/// Without pH/temp the microbe's own optimum is assumed.
pub async fn monitor_degradation(
    State(state): State<SharedState>,
    payload: Result<Json<MonitorRequest>, JsonRejection>,
) -> Result<Json<DegradationResult>, ApiError> {
    let Json(req) = payload.map_err(json_rejection)?;
    debug!(plastic = %req.plastic_type, microbe = %req.microbe, elapsed = req.elapsed_time, "Monitor request");

    let result = match (req.ph, req.temp) {
        (Some(ph), Some(temp)) => estimate_with(
            &state.reference,
            &req.plastic_type,
            &req.microbe,
            req.elapsed_time,
            ph,
            temp,
            &state.sensitivity,
        )
        .into_result(),
        (None, None) => estimate_at_optimum(&state.reference, &req.plastic_type, &req.microbe, req.elapsed_time),
        _ => return Err(ApiError::bad_request("pH and temp must be given together")),
    };

    Ok(Json(result))
}
