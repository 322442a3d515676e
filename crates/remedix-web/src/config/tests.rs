use super::*;

#[test]
fn test_empty_file_uses_defaults() {
    let config = Config::from_toml_str("").unwrap();
    assert_eq!(config.server.bind, "0.0.0.0:5000");
    assert_eq!(config.reference.path, "data/microbial_db.csv");
    assert_eq!(config.classifier.input_width, 10);
    assert_eq!(config.ranker.sensitivity, SensitivityWeights::default());
    assert_eq!(config.report.default_ph, 7.0);
}

#[test]
fn test_partial_sections_fill_defaults() {
    let config = Config::from_toml_str(
        r#"
        [reference]
        path = "/srv/remedix/microbes.csv"

        [classifier]
        weights_path = "/srv/remedix/clf.safetensors"
        pet_ratio = [1, 2]

        [report]
        default_temp = 25.0
        "#,
    )
    .unwrap();
    assert_eq!(config.reference.path, "/srv/remedix/microbes.csv");
    assert_eq!(config.classifier.weights_path, "/srv/remedix/clf.safetensors");
    assert_eq!(config.classifier.pet_ratio, (1, 2));
    assert_eq!(config.classifier.pe_ratio, (2, 11));
    assert_eq!(config.report.default_temp, 25.0);
    assert_eq!(config.report.default_elapsed_days, 30.0);
}

#[test]
fn test_negative_sensitivity_rejected() {
    let result = Config::from_toml_str(
        r#"
        [ranker.sensitivity]
        ph_per_unit = -0.1
        temp_per_degree = 0.05
        "#,
    );
    assert!(result.is_err());
}

#[test]
fn test_partial_sensitivity_table_keeps_other_default() {
    let config = Config::from_toml_str(
        r#"
        [ranker.sensitivity]
        ph_per_unit = 0.2
        "#,
    )
    .unwrap();
    assert_eq!(config.ranker.sensitivity.ph_per_unit, 0.2);
    assert_eq!(
        config.ranker.sensitivity.temp_per_degree,
        SensitivityWeights::default().temp_per_degree
    );
}

#[test]
fn test_example_config_matches_defaults() {
    let config = Config::from_toml_str(include_str!("../../../../remedix.example.toml")).unwrap();
    let defaults = Config::default();
    assert_eq!(config.classifier.weights_path, defaults.classifier.weights_path);
    assert_eq!(config.classifier.labels_path, defaults.classifier.labels_path);
    assert_eq!(config.ranker.sensitivity, defaults.ranker.sensitivity);
    assert_eq!(config.server.bind, defaults.server.bind);
}
