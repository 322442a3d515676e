//! Degradation progress for a plastic/microbe pair.
//!
//! progress = clamp(efficiency × (t / T) × f_pH × f_temp, 0, efficiency)
//!
//! where `T` is the reference degradation time and the factors come from
//! [`SensitivityWeights`]. Progress accrues linearly with elapsed time and can
//! never exceed what the microbe is capable of.

use remedix_common::{normalise_key, DegradationResult, ERROR_PREFIX};
use remedix_reference::{ReferenceRecord, ReferenceTable};
use tracing::debug;

use crate::weights::SensitivityWeights;

/// Tagged outcome of an estimate, rendered to the flat result at the edge.
#[derive(Debug, Clone, PartialEq)]
pub enum DegradationEstimate {
    Progress {
        microbe: String,
        plastic_type: String,
        elapsed_time: f64,
        progress: f64,
    },
    NoData {
        microbe: String,
        plastic_type: String,
    },
    Failed {
        detail: String,
    },
}

impl DegradationEstimate {
    pub fn into_result(self) -> DegradationResult {
        match self {
            DegradationEstimate::Progress { microbe, plastic_type, elapsed_time, progress } => {
                DegradationResult {
                    progress,
                    message: format!(
                        "{} has degraded {:.1}% of {} in {} days",
                        microbe,
                        progress * 100.0,
                        plastic_type,
                        elapsed_time
                    ),
                }
            }
            DegradationEstimate::NoData { microbe, plastic_type } => DegradationResult {
                progress: 0.0,
                message: format!("No data for {microbe} degrading {plastic_type}"),
            },
            DegradationEstimate::Failed { detail } => DegradationResult {
                progress: 0.0,
                message: format!("{ERROR_PREFIX}{detail}"),
            },
        }
    }
}

/// Progress of one reference row after `elapsed_time` days at (pH, temp).
pub fn compute_progress(
    record: &ReferenceRecord,
    elapsed_time: f64,
    ph: f64,
    temp: f64,
    weights: &SensitivityWeights,
) -> f64 {
    let environment = weights.ph_factor(ph - record.optimal_ph)
        * weights.temp_factor(temp - record.optimal_temp);
    // An infinite base times a zero factor would be NaN.
    if environment == 0.0 {
        return 0.0;
    }
    let base = record.efficiency * (elapsed_time / record.degradation_time);

    (base * environment).clamp(0.0, record.efficiency)
}

/// Estimate with explicit sensitivity weights.
pub fn estimate_with(
    table: &ReferenceTable,
    plastic_type: &str,
    microbe: &str,
    elapsed_time: f64,
    ph: f64,
    temp: f64,
    weights: &SensitivityWeights,
) -> DegradationEstimate {
    let plastic_key = normalise_key(plastic_type);

    let Some(record) = table.find(&plastic_key, microbe) else {
        return DegradationEstimate::NoData {
            microbe: microbe.trim().to_string(),
            plastic_type: plastic_key,
        };
    };

    if !elapsed_time.is_finite() || !ph.is_finite() || !temp.is_finite() {
        return DegradationEstimate::Failed {
            detail: format!(
                "non-finite input (elapsed_time={elapsed_time}, pH={ph}, temp={temp})"
            ),
        };
    }
    if !weights.validate() {
        return DegradationEstimate::Failed {
            detail: format!("invalid sensitivity weights {weights:?}"),
        };
    }

    let progress = compute_progress(record, elapsed_time, ph, temp, weights);
    debug!(
        plastic = %plastic_key,
        microbe = %record.microbe,
        elapsed_time,
        progress,
        "Estimated degradation"
    );

    DegradationEstimate::Progress {
        microbe: record.microbe.clone(),
        plastic_type: plastic_key,
        elapsed_time,
        progress,
    }
}

/// Estimate degradation progress under the default sensitivity weights.
pub fn estimate(
    table: &ReferenceTable,
    plastic_type: &str,
    microbe: &str,
    elapsed_time: f64,
    ph: f64,
    temp: f64,
) -> DegradationResult {
    estimate_with(table, plastic_type, microbe, elapsed_time, ph, temp, &SensitivityWeights::default())
        .into_result()
}

/// Estimate at the microbe's own optimal pH and temperature.
pub fn estimate_at_optimum(
    table: &ReferenceTable,
    plastic_type: &str,
    microbe: &str,
    elapsed_time: f64,
) -> DegradationResult {
    match table.find(plastic_type, microbe) {
        Some(record) => estimate(
            table,
            plastic_type,
            microbe,
            elapsed_time,
            record.optimal_ph,
            record.optimal_temp,
        ),
        None => DegradationEstimate::NoData {
            microbe: microbe.trim().to_string(),
            plastic_type: normalise_key(plastic_type),
        }
        .into_result(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remedix_test_utils::REFERENCE_CSV;

    fn fixture() -> ReferenceTable {
        ReferenceTable::from_reader(REFERENCE_CSV.as_bytes()).unwrap()
    }

    #[test]
    fn test_missing_pair_reports_no_data() {
        let result = estimate(&fixture(), "PP", "Ideonella sakaiensis", 30.0, 7.0, 30.0);
        assert_eq!(result.progress, 0.0);
        assert_eq!(result.message, "No data for Ideonella sakaiensis degrading PP");
    }

    #[test]
    fn test_optimal_conditions_at_full_time_reach_efficiency() {
        let result = estimate(&fixture(), "PET", "Ideonella sakaiensis", 60.0, 7.0, 30.0);
        assert_eq!(result.progress, 0.85);
        assert_eq!(result.message, "Ideonella sakaiensis has degraded 85.0% of PET in 60 days");
    }

    #[test]
    fn test_progress_is_linear_before_ceiling() {
        let result = estimate(&fixture(), "pet", " ideonella sakaiensis ", 30.0, 7.0, 30.0);
        assert!((result.progress - 0.425).abs() < 1e-12);
        assert!(result.message.contains("42.5%"));
    }

    #[test]
    fn test_environment_penalises_progress() {
        // pH off by 2 → 0.8, temp off by 10 → 0.5
        let result = estimate(&fixture(), "PET", "Ideonella sakaiensis", 60.0, 9.0, 40.0);
        assert!((result.progress - 0.85 * 0.8 * 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_progress_stays_within_bounds() {
        let table = fixture();
        let efficiency = 0.65;
        for elapsed in [0.0, 1.0, 45.0, 90.0, 500.0, 1e6] {
            for ph in [0.0, 4.0, 7.5, 11.0, 14.0] {
                for temp in [-20.0, 10.0, 55.0, 120.0] {
                    let r = estimate(&table, "PET", "Thermobifida fusca", elapsed, ph, temp);
                    assert!(r.progress >= 0.0, "negative progress at {elapsed}/{ph}/{temp}");
                    assert!(r.progress <= efficiency, "progress above ceiling at {elapsed}/{ph}/{temp}");
                }
            }
        }
    }

    #[test]
    fn test_negative_elapsed_clamps_to_zero() {
        let result = estimate(&fixture(), "PET", "Ideonella sakaiensis", -10.0, 7.0, 30.0);
        assert_eq!(result.progress, 0.0);
    }

    #[test]
    fn test_non_finite_input_is_error_sentinel() {
        let result = estimate(&fixture(), "PET", "Ideonella sakaiensis", f64::INFINITY, 7.0, 30.0);
        assert_eq!(result.progress, 0.0);
        assert!(result.message.starts_with("Error"));
    }

    #[test]
    fn test_estimate_at_optimum_ignores_environment() {
        let result = estimate_at_optimum(&fixture(), "PP", "Aspergillus niger", 150.0);
        assert!((result.progress - 0.30).abs() < 1e-12);

        let missing = estimate_at_optimum(&fixture(), "PP", "Nobody", 10.0);
        assert_eq!(missing.progress, 0.0);
        assert!(missing.message.starts_with("No data"));
    }

    #[test]
    fn test_overflowing_base_with_hostile_conditions_is_zero() {
        let fast = ReferenceRecord::new("PET", "Fast", 7.0, 30.0, 0.5, 0.5).unwrap();
        let table = ReferenceTable::from_records(vec![fast]);

        // elapsed / T overflows to infinity; pH 13 units off zeroes the factor.
        let result = estimate(&table, "PET", "Fast", 1e308, 20.0, 30.0);
        assert_eq!(result.progress, 0.0);
        assert!(!result.message.contains("NaN"));

        // With a non-zero factor the overflow saturates at efficiency.
        let result = estimate(&table, "PET", "Fast", 1e308, 8.0, 30.0);
        assert_eq!(result.progress, 0.5);
    }

    #[test]
    fn test_empty_table_never_panics() {
        let result = estimate(&ReferenceTable::default(), "PET", "Ideonella sakaiensis", 30.0, 7.0, 30.0);
        assert_eq!(result.progress, 0.0);
    }
}
