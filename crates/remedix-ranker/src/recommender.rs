//! Microbe recommendation for a plastic type under given conditions.
//!
//! score = efficiency / (1 + |optimal_pH − pH| + |optimal_temp − temp|)
//!
//! Higher efficiency and a closer environmental match both raise the score;
//! the `1 +` term keeps a perfect match finite and bounds score ≤ efficiency.

use remedix_common::{normalise_key, RecommendationResult, ERROR_PREFIX};
use remedix_reference::{ReferenceRecord, ReferenceTable};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A candidate microbe with its score under the requested conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub microbe: String,
    #[serde(rename = "optimal_pH")]
    pub optimal_ph: f64,
    pub optimal_temp: f64,
    pub efficiency: f64,
    pub score: f64,
}

/// Tagged outcome of a recommendation, rendered to the flat result at the edge.
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    Matched(ScoredCandidate),
    NoMatch { plastic_type: String },
    Failed { detail: String },
}

impl Recommendation {
    /// Flatten into the sentinel-carrying result shape.
    pub fn into_result(self) -> RecommendationResult {
        match self {
            Recommendation::Matched(best) => RecommendationResult {
                recommended: best.microbe,
                optimal_ph: best.optimal_ph,
                optimal_temp: best.optimal_temp,
            },
            Recommendation::NoMatch { plastic_type } => RecommendationResult {
                recommended: format!("No suitable microbe found for {plastic_type}"),
                optimal_ph: 0.0,
                optimal_temp: 0.0,
            },
            Recommendation::Failed { detail } => RecommendationResult {
                recommended: format!("{ERROR_PREFIX}{detail}"),
                optimal_ph: 0.0,
                optimal_temp: 0.0,
            },
        }
    }
}

/// Score one reference row against the requested conditions.
pub fn score_candidate(record: &ReferenceRecord, ph: f64, temp: f64) -> f64 {
    let ph_diff = (record.optimal_ph - ph).abs();
    let temp_diff = (record.optimal_temp - temp).abs();
    record.efficiency / (1.0 + ph_diff + temp_diff)
}

/// Every candidate for `plastic_type`, best first. Equal scores keep table order.
pub fn rank_candidates(
    table: &ReferenceTable,
    plastic_type: &str,
    ph: f64,
    temp: f64,
) -> Vec<ScoredCandidate> {
    let mut ranked: Vec<ScoredCandidate> = table
        .candidates(plastic_type)
        .map(|r| ScoredCandidate {
            microbe: r.microbe.clone(),
            optimal_ph: r.optimal_ph,
            optimal_temp: r.optimal_temp,
            efficiency: r.efficiency,
            score: score_candidate(r, ph, temp),
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    ranked
}

/// Pick the best microbe; the first row wins on a tie.
pub fn rank(table: &ReferenceTable, plastic_type: &str, ph: f64, temp: f64) -> Recommendation {
    let key = normalise_key(plastic_type);

    if !ph.is_finite() || !temp.is_finite() {
        return Recommendation::Failed {
            detail: format!("non-finite conditions (pH={ph}, temp={temp})"),
        };
    }

    let mut best: Option<ScoredCandidate> = None;
    for record in table.candidates(&key) {
        let score = score_candidate(record, ph, temp);
        if !score.is_finite() {
            return Recommendation::Failed {
                detail: format!("non-finite score for {}", record.microbe),
            };
        }
        let better = match &best {
            Some(current) => score > current.score,
            None => true,
        };
        if better {
            best = Some(ScoredCandidate {
                microbe: record.microbe.clone(),
                optimal_ph: record.optimal_ph,
                optimal_temp: record.optimal_temp,
                efficiency: record.efficiency,
                score,
            });
        }
    }

    match best {
        Some(candidate) => {
            debug!(
                plastic = %key,
                microbe = %candidate.microbe,
                score = candidate.score,
                "Recommended microbe"
            );
            Recommendation::Matched(candidate)
        }
        None => Recommendation::NoMatch { plastic_type: key },
    }
}

/// Recommend a microbe, encoding no-match and failure as sentinel strings.
pub fn recommend(table: &ReferenceTable, plastic_type: &str, ph: f64, temp: f64) -> RecommendationResult {
    rank(table, plastic_type, ph, temp).into_result()
}
