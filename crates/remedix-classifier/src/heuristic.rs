//! Nearest-reference classification on band1, used for single samples.

use remedix_common::PlasticType;

/// Band-1 reflectance of representative spectra, calibrated offline.
pub const BAND1_REFERENCES: [(PlasticType, f64); 3] = [
    (PlasticType::Pe,  0.12),
    (PlasticType::Pet, 0.15),
    (PlasticType::Pp,  0.11),
];

/// Plastic type whose reference band1 is closest; ties go to the earlier entry.
pub fn nearest_reference(band1: f64) -> PlasticType {
    let mut best = BAND1_REFERENCES[0];
    let mut best_distance = (band1 - best.1).abs();

    for candidate in &BAND1_REFERENCES[1..] {
        let distance = (band1 - candidate.1).abs();
        if distance < best_distance {
            best = *candidate;
            best_distance = distance;
        }
    }

    best.0
}
