//! remedix-ranker — Microbe recommendation and degradation progress scoring.

pub mod recommender;
pub mod degradation;
pub mod weights;

pub use degradation::{estimate, estimate_at_optimum, estimate_with, DegradationEstimate};
pub use recommender::{rank, rank_candidates, recommend, Recommendation, ScoredCandidate};
pub use weights::SensitivityWeights;
