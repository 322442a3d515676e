//! Core value types exchanged between the reference store, the ranker,
//! the classifier and the HTTP layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RemedixError;

/// Every failure sentinel embedded in a result string starts with this.
/// Callers detect failures by looking for the word "Error".
pub const ERROR_PREFIX: &str = "Error: ";

/// Normalise a lookup key: trim surrounding whitespace and upper-case.
pub fn normalise_key(raw: &str) -> String {
    raw.trim().to_uppercase()
}

// ---------------------------------------------------------------------------
// Plastic type vocabulary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlasticType {
    /// Polyethylene
    #[serde(rename = "PE")]
    Pe,
    /// Polyethylene terephthalate
    #[serde(rename = "PET")]
    Pet,
    /// Polypropylene
    #[serde(rename = "PP")]
    Pp,
}

impl PlasticType {
    /// Classifier vocabulary in label-encoder order.
    pub const ALL: [PlasticType; 3] = [PlasticType::Pe, PlasticType::Pet, PlasticType::Pp];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlasticType::Pe  => "PE",
            PlasticType::Pet => "PET",
            PlasticType::Pp  => "PP",
        }
    }
}

impl fmt::Display for PlasticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlasticType {
    type Err = RemedixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise_key(s).as_str() {
            "PE"  => Ok(PlasticType::Pe),
            "PET" => Ok(PlasticType::Pet),
            "PP"  => Ok(PlasticType::Pp),
            other => Err(RemedixError::InvalidInput(format!("Unknown plastic type: {other}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Service results
// ---------------------------------------------------------------------------

/// Outcome of a microbe recommendation, in the flat shape callers serialise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    /// Microbe name, a "No suitable microbe found" sentinel, or an "Error: ..." sentinel.
    pub recommended: String,
    #[serde(rename = "optimal_pH")]
    pub optimal_ph: f64,
    pub optimal_temp: f64,
}

impl RecommendationResult {
    pub fn is_error(&self) -> bool {
        self.recommended.contains("Error")
    }
}

/// Estimated degradation progress for a plastic/microbe pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationResult {
    /// Fraction degraded, within [0, efficiency].
    pub progress: f64,
    pub message: String,
}

impl DegradationResult {
    pub fn is_error(&self) -> bool {
        self.message.contains("Error")
    }
}
