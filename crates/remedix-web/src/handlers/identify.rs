//! Plastic identification endpoint: classify, then report per sample.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use remedix_classifier::SpectralSample;
use remedix_common::{ApiError, RemedixError};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::handlers::json_rejection;
use crate::report::{aggregate, build_rows, ReportRow};
use crate::state::SharedState;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum IdentifyResponse {
    Single { result: ReportRow, duration_sec: f64 },
    Batch { report: Vec<ReportRow>, duration_sec: f64 },
}

/// POST /identify_plastic — one band object or an array of them
pub async fn identify_plastic(
    State(state): State<SharedState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<IdentifyResponse>, ApiError> {
    let start = Instant::now();
    let Json(body) = payload.map_err(json_rejection)?;

    let (samples, single) = match body {
        Value::Object(_) => (vec![parse_sample(&body)?], true),
        Value::Array(items) => (parse_batch(&items)?, false),
        _ => return Err(ApiError::bad_request("Expected a band object or an array of band objects")),
    };
    debug!(samples = samples.len(), "Identify request");

    let labels = state.classifier.classify(&samples);
    let rows = build_rows(&state, &labels);
    let duration_sec = start.elapsed().as_secs_f64();

    let response = if single {
        let result = rows
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::internal("classifier returned no label"))?;
        IdentifyResponse::Single { result, duration_sec }
    } else {
        let report = aggregate(rows);
        info!(samples = samples.len(), groups = report.len(), "Identified batch in {:.3}s", duration_sec);
        IdentifyResponse::Batch { report, duration_sec }
    };

    Ok(Json(response))
}

fn parse_batch(items: &[Value]) -> Result<Vec<SpectralSample>, ApiError> {
    if items.is_empty() {
        return Err(ApiError::bad_request("Missing spectral bands: empty sample list"));
    }

    let samples = items.iter().map(parse_sample).collect::<Result<Vec<_>, _>>()?;

    let width = samples[0].len();
    if let Some(i) = samples.iter().position(|s| s.len() != width) {
        return Err(ApiError::bad_request(format!(
            "Sample {} has {} bands, expected {}",
            i,
            samples[i].len(),
            width
        )));
    }
    Ok(samples)
}

fn parse_sample(value: &Value) -> Result<SpectralSample, ApiError> {
    let Value::Object(map) = value else {
        return Err(ApiError::bad_request("Each sample must be a band object"));
    };

    let named = map
        .iter()
        .map(|(key, v)| {
            v.as_f64()
                .map(|n| (key.as_str(), n))
                .ok_or_else(|| ApiError::bad_request(format!("{key} must be a number")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    SpectralSample::from_named_bands(named).map_err(|e| ApiError::from(RemedixError::from(e)))
}
