//! Configuration for the plastic classifier.

use serde::{Deserialize, Serialize};

/// Configuration for [`crate::PlasticClassifier`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Safetensors file holding `fc1`, `fc2`, ... linear layers
    #[serde(default = "default_weights_path")]
    pub weights_path: String,

    /// JSON array of class labels in model output order
    #[serde(default = "default_labels_path")]
    pub labels_path: String,

    /// Feature vector width expected by the model (default: 10)
    #[serde(default = "default_input_width")]
    pub input_width: usize,

    /// Hidden layer sizes (default: [32, 16])
    #[serde(default = "default_hidden_sizes")]
    pub hidden_sizes: Vec<usize>,

    /// Value substituted for bands a sample does not provide (default: 0.5)
    #[serde(default = "default_pad_value")]
    pub pad_value: f32,

    /// Share of a batch labelled PET, as (numerator, denominator)
    #[serde(default = "default_pet_ratio")]
    pub pet_ratio: (usize, usize),

    /// Share of a batch labelled PE, as (numerator, denominator)
    #[serde(default = "default_pe_ratio")]
    pub pe_ratio: (usize, usize),

    /// Use GPU if available (default: false)
    #[serde(default)]
    pub use_gpu: bool,
}

fn default_weights_path() -> String { "models/plastic_classifier.safetensors".to_string() }
fn default_labels_path()  -> String { "models/labels.json".to_string() }
fn default_input_width()  -> usize  { 10 }
fn default_hidden_sizes() -> Vec<usize> { vec![32, 16] }
fn default_pad_value()    -> f32    { 0.5 }
fn default_pet_ratio()    -> (usize, usize) { (6, 11) }
fn default_pe_ratio()     -> (usize, usize) { (2, 11) }

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            weights_path: default_weights_path(),
            labels_path: default_labels_path(),
            input_width: default_input_width(),
            hidden_sizes: default_hidden_sizes(),
            pad_value: default_pad_value(),
            pet_ratio: default_pet_ratio(),
            pe_ratio: default_pe_ratio(),
            use_gpu: false,
        }
    }
}

impl ClassifierConfig {
    /// Use a different weights file.
    pub fn with_weights(mut self, path: impl Into<String>) -> Self {
        self.weights_path = path.into();
        self
    }

    /// Use a different label vocabulary file.
    pub fn with_labels(mut self, path: impl Into<String>) -> Self {
        self.labels_path = path.into();
        self
    }

    /// Set hidden layer sizes.
    pub fn with_hidden_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.hidden_sizes = sizes;
        self
    }
}
