//! Shared application state for the web server.

use std::sync::Arc;

use remedix_classifier::PlasticClassifier;
use remedix_ranker::SensitivityWeights;
use remedix_reference::ReferenceTable;

use crate::config::{Config, ReportConfig};

/// Shared state injected into every Axum handler. Read-only after startup.
pub struct AppState {
    pub reference: Arc<ReferenceTable>,
    pub classifier: Arc<PlasticClassifier>,
    pub sensitivity: SensitivityWeights,
    pub report: ReportConfig,
}

impl AppState {
    pub fn new(reference: ReferenceTable, classifier: PlasticClassifier, config: &Config) -> Self {
        Self {
            reference: Arc::new(reference),
            classifier: Arc::new(classifier),
            sensitivity: config.ranker.sensitivity,
            report: config.report,
        }
    }

    /// Load the reference table and classifier named in the config.
    /// Missing data degrades to an empty table / heuristic-only classifier.
    pub fn from_config(config: &Config) -> Self {
        let reference = ReferenceTable::load_or_empty(&config.reference.path);
        let classifier = PlasticClassifier::load(&config.classifier);
        Self::new(reference, classifier, config)
    }
}

pub type SharedState = Arc<AppState>;
