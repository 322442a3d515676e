//! Error types for the classifier.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClassifierError>;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Model loading failed: {0}")]
    ModelLoad(String),

    #[error("Model unavailable")]
    ModelUnavailable,

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<candle_core::Error> for ClassifierError {
    fn from(e: candle_core::Error) -> Self {
        ClassifierError::Inference(e.to_string())
    }
}

impl From<ClassifierError> for remedix_common::RemedixError {
    fn from(e: ClassifierError) -> Self {
        match e {
            ClassifierError::InvalidInput(msg) => remedix_common::RemedixError::InvalidInput(msg),
            ClassifierError::ModelLoad(msg) => remedix_common::RemedixError::DataUnavailable(msg),
            ClassifierError::ModelUnavailable => {
                remedix_common::RemedixError::DataUnavailable("classifier model".into())
            }
            other => remedix_common::RemedixError::Computation(other.to_string()),
        }
    }
}
