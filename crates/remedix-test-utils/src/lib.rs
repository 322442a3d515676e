//! Shared fixtures for Remedix tests.

use std::path::PathBuf;

/// Reference table used across the workspace's tests.
///
/// PET has two candidates so the recommender has something to rank; the
/// second PE row is an exact tie with the first under neutral conditions.
pub const REFERENCE_CSV: &str = "\
plastic_type,microbe,optimal_pH,optimal_temp,efficiency,degradation_time
PET,Ideonella sakaiensis,7.0,30,0.85,60
PET,Thermobifida fusca,7.5,55,0.65,90
PE,Rhodococcus ruber,7.0,30,0.40,120
PE,Bacillus sp. YP1,7.0,30,0.40,100
PP,Aspergillus niger,5.5,28,0.30,150
";

/// One good row among several that must be rejected.
pub const MALFORMED_CSV: &str = "\
plastic_type,microbe,optimal_pH,optimal_temp,efficiency,degradation_time
PE,Rhodococcus ruber,7.0,30,0.40,120
PET,Ideonella sakaiensis,seven,30,0.85,60
PP,Aspergillus niger,5.5,28,1.70,150
PP,Pseudomonas aeruginosa,7.0,37,0.25,0
,Nameless,7.0,30,0.5,10
PS,Truncated row
";

/// Write CSV content to a uniquely named file in the system temp directory.
pub fn write_temp_csv(content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("remedix-{}.csv", uuid::Uuid::new_v4()));
    std::fs::write(&path, content).expect("write temp csv");
    path
}

/// A spectral sample as the HTTP layer receives it: `{"band1": .., "band2": ..}`.
pub fn band_object(values: &[f64]) -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = values
        .iter()
        .enumerate()
        .map(|(i, v)| (format!("band{}", i + 1), serde_json::json!(v)))
        .collect();
    serde_json::Value::Object(map)
}
