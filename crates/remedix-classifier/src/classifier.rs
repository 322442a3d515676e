//! Batch plastic classification.

use std::sync::Arc;

use remedix_common::PlasticType;
use tracing::{debug, warn};

use crate::heuristic::nearest_reference;
use crate::model::{LabelVocabulary, MlpClassifier, SpectralModel};
use crate::rebalance::ProportionalAllocation;
use crate::{ClassifierConfig, ClassifierError, Result, SpectralSample};

/// Placed in every output position when a batch cannot be classified.
pub const PREDICTION_ERROR: &str = "Error during prediction";

/// Classifies spectral samples into plastic types.
///
/// Built once at startup and shared read-only.
pub struct PlasticClassifier {
    model: Option<Arc<dyn SpectralModel>>,
    vocabulary: LabelVocabulary,
    allocation: ProportionalAllocation,
    pad_value: f32,
}

impl PlasticClassifier {
    pub fn new(
        model: Option<Arc<dyn SpectralModel>>,
        vocabulary: LabelVocabulary,
        allocation: ProportionalAllocation,
    ) -> Self {
        Self { model, vocabulary, allocation, pad_value: 0.5 }
    }

    /// Classifier without a model: single samples still work, batches report errors.
    pub fn heuristic_only() -> Self {
        Self::new(None, LabelVocabulary::default(), ProportionalAllocation::default())
    }

    /// Build from config. A missing or unreadable model leaves the classifier
    /// in heuristic-only mode rather than failing startup.
    pub fn load(config: &ClassifierConfig) -> Self {
        let vocabulary = match LabelVocabulary::load(&config.labels_path) {
            Ok(v) => v,
            Err(e) => {
                debug!("Using default label vocabulary ({}): {}", config.labels_path, e);
                LabelVocabulary::default()
            }
        };

        let allocation = ProportionalAllocation::new(config.pet_ratio, config.pe_ratio)
            .unwrap_or_else(|e| {
                warn!("Invalid allocation ratios, using 6/11 PET and 2/11 PE: {e}");
                ProportionalAllocation::default()
            });

        let model: Option<Arc<dyn SpectralModel>> = match MlpClassifier::load(config, vocabulary.len()) {
            Ok(m) => Some(Arc::new(m)),
            Err(e) => {
                warn!("Classifier model unavailable, multi-sample batches will fail: {e}");
                None
            }
        };

        let mut classifier = Self::new(model, vocabulary, allocation);
        classifier.pad_value = config.pad_value;
        classifier
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Classify a batch; output[i] belongs to samples[i].
    pub fn try_classify(&self, samples: &[SpectralSample]) -> Result<Vec<PlasticType>> {
        match samples {
            [] => Ok(Vec::new()),
            [single] => {
                let band1 = single
                    .band(1)
                    .ok_or_else(|| ClassifierError::InvalidInput("sample lacks band1".into()))?;
                Ok(vec![nearest_reference(band1)])
            }
            batch => self.classify_with_model(batch),
        }
    }

    /// Classify a batch, substituting [`PREDICTION_ERROR`] everywhere on failure.
    pub fn classify(&self, samples: &[SpectralSample]) -> Vec<String> {
        match self.try_classify(samples) {
            Ok(labels) => labels.iter().map(|l| l.to_string()).collect(),
            Err(e) => {
                warn!("Classification of {} samples failed: {e}", samples.len());
                vec![PREDICTION_ERROR.to_string(); samples.len()]
            }
        }
    }

    fn classify_with_model(&self, batch: &[SpectralSample]) -> Result<Vec<PlasticType>> {
        let model = self.model.as_ref().ok_or(ClassifierError::ModelUnavailable)?;
        let pet_index = self
            .vocabulary
            .index_of(PlasticType::Pet)
            .ok_or_else(|| ClassifierError::InvalidInput("label vocabulary lacks PET".into()))?;

        let width = model.input_width();
        let features: Vec<Vec<f32>> = batch.iter().map(|s| s.features(width, self.pad_value)).collect();
        let probabilities = model.predict_proba(&features)?;

        if probabilities.len() != batch.len() {
            return Err(ClassifierError::Inference(format!(
                "model returned {} rows for {} samples",
                probabilities.len(),
                batch.len()
            )));
        }

        let pet_probabilities = probabilities
            .iter()
            .map(|row| {
                row.get(pet_index).copied().ok_or_else(|| {
                    ClassifierError::Inference(format!("probability row has {} classes", row.len()))
                })
            })
            .collect::<Result<Vec<f32>>>()?;

        if pet_probabilities.iter().any(|p| !p.is_finite()) {
            return Err(ClassifierError::Inference("model produced a non-finite probability".into()));
        }

        let labels = self.allocation.assign(&pet_probabilities);
        debug!(samples = batch.len(), "Rebalanced batch predictions");
        Ok(labels)
    }
}
