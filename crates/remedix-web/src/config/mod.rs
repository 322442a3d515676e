//! Configuration loading for Remedix.
//! Reads remedix.toml from the current directory or path in REMEDIX_CONFIG env var.

use remedix_classifier::ClassifierConfig;
use remedix_ranker::SensitivityWeights;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub reference: ReferenceConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub ranker: RankerConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String { "0.0.0.0:5000".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceConfig {
    #[serde(default = "default_reference_path")]
    pub path: String,
}

fn default_reference_path() -> String { remedix_reference::DEFAULT_REFERENCE_PATH.to_string() }

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self { path: default_reference_path() }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankerConfig {
    #[serde(default)]
    pub sensitivity: SensitivityWeights,
}

/// Conditions assumed when a spectral upload is turned into a full report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_ph")]
    pub default_ph: f64,
    #[serde(default = "default_temp")]
    pub default_temp: f64,
    #[serde(default = "default_elapsed_days")]
    pub default_elapsed_days: f64,
}

fn default_ph()           -> f64 { 7.0 }
fn default_temp()         -> f64 { 30.0 }
fn default_elapsed_days() -> f64 { 30.0 }

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_ph: default_ph(),
            default_temp: default_temp(),
            default_elapsed_days: default_elapsed_days(),
        }
    }
}

#[cfg(test)]
mod tests;

impl Config {
    /// Load configuration from remedix.toml.
    /// Checks REMEDIX_CONFIG env var first, then current directory. Without
    /// either, built-in defaults apply.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("REMEDIX_CONFIG") {
            Ok(path) => {
                if !Path::new(&path).exists() {
                    anyhow::bail!("Config file not found: {}", path);
                }
                Self::from_file(&path)
            }
            Err(_) if Path::new("remedix.toml").exists() => Self::from_file("remedix.toml"),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if !self.ranker.sensitivity.validate() {
            anyhow::bail!(
                "ranker.sensitivity weights must be finite and non-negative: {:?}",
                self.ranker.sensitivity
            );
        }
        let r = &self.report;
        if !(r.default_ph.is_finite() && r.default_temp.is_finite() && r.default_elapsed_days.is_finite()) {
            anyhow::bail!("report defaults must be finite numbers");
        }
        Ok(())
    }
}
