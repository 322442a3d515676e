//! remedix-common — Shared types, errors, and result structures used across all Remedix crates.

pub mod error;
pub mod entities;

// Re-export commonly used types
pub use entities::{
    normalise_key, DegradationResult, PlasticType, RecommendationResult, ERROR_PREFIX,
};
pub use error::{ApiError, RemedixError, Result};
