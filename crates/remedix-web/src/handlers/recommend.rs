//! Microbe recommendation endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use remedix_common::ApiError;
use remedix_ranker::{rank_candidates, recommend, ScoredCandidate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::handlers::{json_rejection, query_rejection};
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub plastic_type: String,
    #[serde(rename = "pH")]
    pub ph: f64,
    pub temp: f64,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommended_microbe: String,
    #[serde(rename = "optimal_pH")]
    pub optimal_ph: f64,
    pub optimal_temp: f64,
}

/// POST /recommend_microbe — best microbe for a plastic under given conditions
pub async fn recommend_microbe(
    State(state): State<SharedState>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let Json(req) = payload.map_err(json_rejection)?;
    debug!(plastic = %req.plastic_type, ph = req.ph, temp = req.temp, "Recommend request");

    let result = recommend(&state.reference, &req.plastic_type, req.ph, req.temp);
    Ok(Json(RecommendResponse {
        recommended_microbe: result.recommended,
        optimal_ph: result.optimal_ph,
        optimal_temp: result.optimal_temp,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CandidateQuery {
    pub plastic_type: String,
    #[serde(rename = "pH")]
    pub ph: f64,
    pub temp: f64,
}

/// GET /api/candidates — every candidate microbe, best first
pub async fn api_candidates(
    State(state): State<SharedState>,
    query: Result<Query<CandidateQuery>, QueryRejection>,
) -> Result<Json<Vec<ScoredCandidate>>, ApiError> {
    let Query(query) = query.map_err(query_rejection)?;
    if !query.ph.is_finite() || !query.temp.is_finite() {
        return Err(ApiError::bad_request("pH and temp must be finite numbers"));
    }
    Ok(Json(rank_candidates(&state.reference, &query.plastic_type, query.ph, query.temp)))
}
