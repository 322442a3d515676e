//! Pretrained spectral model and its label vocabulary.

use std::path::Path;
use std::time::Instant;

use candle_core::{DType, Device, Tensor};
use candle_nn::{linear, Linear, Module, VarBuilder};
use remedix_common::PlasticType;
use tracing::{debug, info};

use crate::{ClassifierConfig, ClassifierError, Result};

/// Anything that turns fixed-width feature rows into class probabilities.
///
/// Implementations:
/// - [`MlpClassifier`] (Candle, loaded from safetensors)
/// - [`MockSpectralModel`] (fixed probabilities, for tests)
pub trait SpectralModel: Send + Sync {
    /// Number of features each row must carry.
    fn input_width(&self) -> usize;

    /// One probability row per input row, in vocabulary order.
    fn predict_proba(&self, features: &[Vec<f32>]) -> Result<Vec<Vec<f32>>>;
}

// ── Label vocabulary ───────────────────────────────────────────────────────

/// Class labels in model output order.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelVocabulary {
    labels: Vec<PlasticType>,
}

impl Default for LabelVocabulary {
    /// Sorted label-encoder order: PE, PET, PP.
    fn default() -> Self {
        Self { labels: PlasticType::ALL.to_vec() }
    }
}

impl LabelVocabulary {
    pub fn new(labels: Vec<PlasticType>) -> Result<Self> {
        if !labels.contains(&PlasticType::Pet) {
            return Err(ClassifierError::InvalidInput("label vocabulary lacks PET".into()));
        }
        Ok(Self { labels })
    }

    /// Load a JSON array such as `["PE", "PET", "PP"]`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let raw: Vec<String> = serde_json::from_str(&content)?;
        let labels = raw
            .iter()
            .map(|s| s.parse::<PlasticType>().map_err(|e| ClassifierError::InvalidInput(e.to_string())))
            .collect::<Result<Vec<_>>>()?;
        Self::new(labels)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[PlasticType] {
        &self.labels
    }

    pub fn index_of(&self, label: PlasticType) -> Option<usize> {
        self.labels.iter().position(|l| *l == label)
    }
}

// ── Candle MLP ─────────────────────────────────────────────────────────────

/// Feed-forward network: input → hidden (ReLU) ... → classes (softmax).
pub struct MlpClassifier {
    layers: Vec<Linear>,
    input_width: usize,
    device: Device,
}

impl MlpClassifier {
    /// Load weights from the safetensors file named in the config.
    pub fn load(config: &ClassifierConfig, num_classes: usize) -> Result<Self> {
        let start = Instant::now();
        let path = Path::new(&config.weights_path);
        if !path.exists() {
            return Err(ClassifierError::ModelLoad(format!("weights not found: {}", path.display())));
        }

        let device = Self::select_device(config);
        debug!("Using device: {:?}", device);

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[path], DType::F32, &device)
                .map_err(|e| ClassifierError::ModelLoad(e.to_string()))?
        };

        let model = Self::from_var_builder(vb, config.input_width, &config.hidden_sizes, num_classes, device)
            .map_err(|e| ClassifierError::ModelLoad(e.to_string()))?;

        info!(
            "Classifier loaded from {:?} in {:.2}s",
            path,
            start.elapsed().as_secs_f32()
        );
        Ok(model)
    }

    /// Build the network from any variable source. Layers are `fc1`, `fc2`, ...
    pub fn from_var_builder(
        vb: VarBuilder,
        input_width: usize,
        hidden_sizes: &[usize],
        num_classes: usize,
        device: Device,
    ) -> Result<Self> {
        let mut layers = Vec::with_capacity(hidden_sizes.len() + 1);
        let mut in_dim = input_width;
        for (i, &out_dim) in hidden_sizes.iter().chain(std::iter::once(&num_classes)).enumerate() {
            layers.push(linear(in_dim, out_dim, vb.pp(format!("fc{}", i + 1)))?);
            in_dim = out_dim;
        }

        Ok(Self { layers, input_width, device })
    }

    fn select_device(config: &ClassifierConfig) -> Device {
        if !config.use_gpu {
            return Device::Cpu;
        }

        #[cfg(feature = "cuda")]
        {
            match Device::new_cuda(0) {
                Ok(device) => return device,
                Err(e) => debug!("CUDA not available: {}, falling back to CPU", e),
            }
        }

        #[cfg(feature = "metal")]
        {
            match Device::new_metal(0) {
                Ok(device) => return device,
                Err(e) => debug!("Metal not available: {}, falling back to CPU", e),
            }
        }

        Device::Cpu
    }
}

impl SpectralModel for MlpClassifier {
    fn input_width(&self) -> usize {
        self.input_width
    }

    fn predict_proba(&self, features: &[Vec<f32>]) -> Result<Vec<Vec<f32>>> {
        if features.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(row) = features.iter().find(|r| r.len() != self.input_width) {
            return Err(ClassifierError::InvalidInput(format!(
                "feature row has {} values, model expects {}",
                row.len(),
                self.input_width
            )));
        }

        let flat: Vec<f32> = features.iter().flatten().copied().collect();
        let mut x = Tensor::from_vec(flat, (features.len(), self.input_width), &self.device)?;

        let last = self.layers.len() - 1;
        for (i, layer) in self.layers.iter().enumerate() {
            x = layer.forward(&x)?;
            if i < last {
                x = x.relu()?;
            }
        }

        let probs = candle_nn::ops::softmax_last_dim(&x)?;
        Ok(probs.to_vec2::<f32>()?)
    }
}

// ── Mock Implementation for Testing ────────────────────────────────────────

/// Returns preset probability rows regardless of the features.
pub struct MockSpectralModel {
    rows: Vec<Vec<f32>>,
    input_width: usize,
}

impl MockSpectralModel {
    pub fn new(rows: Vec<Vec<f32>>) -> Self {
        Self { rows, input_width: 10 }
    }

    /// Rows in PE, PET, PP order with the given PET probability.
    pub fn with_pet_probabilities(pet: &[f32]) -> Self {
        Self::new(
            pet.iter()
                .map(|p| vec![(1.0 - p) / 2.0, *p, (1.0 - p) / 2.0])
                .collect(),
        )
    }
}

impl SpectralModel for MockSpectralModel {
    fn input_width(&self) -> usize {
        self.input_width
    }

    fn predict_proba(&self, features: &[Vec<f32>]) -> Result<Vec<Vec<f32>>> {
        if features.len() != self.rows.len() {
            return Err(ClassifierError::Inference(format!(
                "mock holds {} rows, got {}",
                self.rows.len(),
                features.len()
            )));
        }
        Ok(self.rows.clone())
    }
}
