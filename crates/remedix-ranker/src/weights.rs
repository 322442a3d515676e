//! Environmental sensitivity coefficients for the degradation model.

use serde::{Deserialize, Serialize};

/// Per-unit penalty applied when conditions drift from a microbe's optimum.
///
/// A factor of `1 - |Δ| × coefficient`, floored at zero, scales progress
/// down for each dimension independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensitivityWeights {
    /// Penalty per pH unit away from optimum
    pub ph_per_unit: f64,
    /// Penalty per °C away from optimum
    pub temp_per_degree: f64,
}

impl Default for SensitivityWeights {
    /// Temperature is penalised at half the per-unit rate of pH.
    fn default() -> Self {
        Self {
            ph_per_unit:     0.10,
            temp_per_degree: 0.05,
        }
    }
}

impl SensitivityWeights {
    /// Both coefficients must be finite and non-negative.
    pub fn validate(&self) -> bool {
        [self.ph_per_unit, self.temp_per_degree]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0)
    }

    /// Multiplier for a deviation of `delta` pH units.
    pub fn ph_factor(&self, delta: f64) -> f64 {
        (1.0 - delta.abs() * self.ph_per_unit).max(0.0)
    }

    /// Multiplier for a deviation of `delta` degrees.
    pub fn temp_factor(&self, delta: f64) -> f64 {
        (1.0 - delta.abs() * self.temp_per_degree).max(0.0)
    }
}
