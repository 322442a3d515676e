//! Spectral samples and their mapping into model features.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ClassifierError, Result};

/// Reflectance values for bands 1..=N. `bands[0]` is band1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectralSample {
    bands: Vec<f64>,
}

impl SpectralSample {
    /// Build a sample from consecutive band values starting at band1.
    pub fn new(bands: Vec<f64>) -> Result<Self> {
        if bands.is_empty() {
            return Err(ClassifierError::InvalidInput("sample has no bands".into()));
        }
        // Features are f32; a value that overflows on the cast is as bad as inf.
        if let Some(i) = bands.iter().position(|v| !(*v as f32).is_finite()) {
            return Err(ClassifierError::InvalidInput(format!("band{} is not a finite number", i + 1)));
        }
        Ok(Self { bands })
    }

    /// Build a sample from `bandN → value` pairs.
    ///
    /// Keys must be exactly `band1, band2, ..., bandN` with no gaps; order of
    /// the input does not matter.
    pub fn from_named_bands<I, K>(named: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut indexed: BTreeMap<usize, f64> = BTreeMap::new();
        for (key, value) in named {
            let key = key.as_ref();
            let index = key
                .strip_prefix("band")
                .and_then(|n| n.parse::<usize>().ok())
                .filter(|n| *n >= 1)
                .ok_or_else(|| ClassifierError::InvalidInput(format!("unexpected field: {key}")))?;
            if indexed.insert(index, value).is_some() {
                return Err(ClassifierError::InvalidInput(format!("duplicate band: {key}")));
            }
        }

        if !indexed.contains_key(&1) {
            return Err(ClassifierError::InvalidInput("Missing spectral bands: band1 is required".into()));
        }
        if let Some((expected, _)) = indexed.keys().zip(1usize..).find(|(k, n)| **k != *n) {
            return Err(ClassifierError::InvalidInput(format!(
                "bands must be sequential starting at band1 (unexpected band{expected})"
            )));
        }

        Self::new(indexed.into_values().collect())
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    pub fn bands(&self) -> &[f64] {
        &self.bands
    }

    /// Band value by 1-based index.
    pub fn band(&self, index: usize) -> Option<f64> {
        index.checked_sub(1).and_then(|i| self.bands.get(i).copied())
    }

    /// Fixed-width feature vector: missing bands padded, extra bands dropped.
    pub fn features(&self, width: usize, pad: f32) -> Vec<f32> {
        (0..width)
            .map(|i| self.bands.get(i).map(|v| *v as f32).unwrap_or(pad))
            .collect()
    }
}
