//! Per-sample report: classify → recommend → estimate.

use remedix_ranker::{estimate_with, rank, Recommendation};
use serde::Serialize;

use crate::state::AppState;

const NOT_AVAILABLE: &str = "N/A";

/// One row of the identification report, in the shape the frontend renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "Plastic_Type")]
    pub plastic_type: String,
    #[serde(rename = "Recommended_Microbe")]
    pub recommended_microbe: String,
    #[serde(rename = "Degradation_Progress")]
    pub degradation_progress: String,
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "Optimal_pH")]
    pub optimal_ph: String,
    #[serde(rename = "Optimal_Temp")]
    pub optimal_temp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

/// Build the row for one predicted label under the configured default conditions.
pub fn sample_row(state: &AppState, label: &str) -> ReportRow {
    let defaults = state.report;

    if label.contains("Error") {
        return ReportRow {
            plastic_type: label.to_string(),
            recommended_microbe: NOT_AVAILABLE.to_string(),
            degradation_progress: NOT_AVAILABLE.to_string(),
            message: label.to_string(),
            optimal_ph: NOT_AVAILABLE.to_string(),
            optimal_temp: NOT_AVAILABLE.to_string(),
            count: None,
        };
    }

    match rank(&state.reference, label, defaults.default_ph, defaults.default_temp) {
        Recommendation::Matched(best) => {
            let progress = estimate_with(
                &state.reference,
                label,
                &best.microbe,
                defaults.default_elapsed_days,
                defaults.default_ph,
                defaults.default_temp,
                &state.sensitivity,
            )
            .into_result();

            let degradation_progress = if progress.is_error() {
                NOT_AVAILABLE.to_string()
            } else {
                format!("{:.1}%", progress.progress * 100.0)
            };

            ReportRow {
                plastic_type: label.to_string(),
                recommended_microbe: best.microbe,
                degradation_progress,
                message: progress.message,
                optimal_ph: format!("{:.1}", best.optimal_ph),
                optimal_temp: format!("{:.1}", best.optimal_temp),
                count: None,
            }
        }
        unmatched => {
            let result = unmatched.into_result();
            ReportRow {
                plastic_type: label.to_string(),
                recommended_microbe: result.recommended.clone(),
                degradation_progress: NOT_AVAILABLE.to_string(),
                message: result.recommended,
                optimal_ph: format!("{:.1}", result.optimal_ph),
                optimal_temp: format!("{:.1}", result.optimal_temp),
                count: None,
            }
        }
    }
}

/// Rows for every label, in input order.
pub fn build_rows(state: &AppState, labels: &[String]) -> Vec<ReportRow> {
    labels.iter().map(|label| sample_row(state, label)).collect()
}

/// Collapse rows by plastic type in order of first appearance, counting each.
pub fn aggregate(rows: Vec<ReportRow>) -> Vec<ReportRow> {
    let mut grouped: Vec<ReportRow> = Vec::new();
    for row in rows {
        match grouped.iter_mut().find(|g| g.plastic_type == row.plastic_type) {
            Some(existing) => existing.count = Some(existing.count.unwrap_or(1) + 1),
            None => grouped.push(ReportRow { count: Some(1), ..row }),
        }
    }
    grouped
}
