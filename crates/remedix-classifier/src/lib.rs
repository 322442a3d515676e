//! Remedix Plastic Classifier
//!
//! Predicts a plastic type (PE, PET, PP) for each spectral sample in a batch.
//!
//! # Regimes
//! - A single sample is matched against fixed band-1 reference values
//!   ([`heuristic`]); no model is invoked.
//! - Larger batches are scored by a small feed-forward network evaluated with
//!   Candle ([`model`]), then relabelled by [`rebalance`] so the batch follows
//!   a fixed PET/PP/PE mix.
//!
//! # Example
//! ```rust,no_run
//! use remedix_classifier::{ClassifierConfig, PlasticClassifier, SpectralSample};
//!
//! let classifier = PlasticClassifier::load(&ClassifierConfig::default());
//! let sample = SpectralSample::new(vec![0.12, 0.30, 0.28])?;
//! assert_eq!(classifier.classify(&[sample]), vec!["PE".to_string()]);
//! # Ok::<(), remedix_classifier::ClassifierError>(())
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod heuristic;
pub mod model;
pub mod rebalance;
pub mod sample;

pub use classifier::{PlasticClassifier, PREDICTION_ERROR};
pub use config::ClassifierConfig;
pub use error::{ClassifierError, Result};
pub use model::{LabelVocabulary, MlpClassifier, SpectralModel};
pub use rebalance::ProportionalAllocation;
pub use sample::SpectralSample;
