// Configuration for change detection
//
// Holds the parameters that are otherwise passed to `detect_change` one by
// one, so a detector can be built once (or loaded from a TOML file) and then
// applied to many windows.

use crate::change::scatter::VarianceEstimator;
use crate::change::student::Confidence;
use crate::error::{ChangeError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for single change-point detection
///
/// # Example
/// ```
/// use shiftpoint::change::{Confidence, DetectorConfig};
///
/// let config = DetectorConfig::default();
/// assert_eq!(config.min_sample_size, 5);
/// assert_eq!(config.confidence, Confidence::Conf95);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Minimum offset of a candidate split from either end of the window
    ///
    /// Candidates run over `min_sample_size..n - 1 - min_sample_size`, so
    /// the "before" group holds at least `min_sample_size + 1` samples.
    ///
    /// Default: 5
    pub min_sample_size: usize,

    /// Confidence level of the t-test gate
    ///
    /// - 95% (default): standard choice for regime-shift alerts
    /// - 99% / 99.5%: fewer false positives, slower to react
    /// - 80% / 90%: catches smaller shifts, more false positives
    pub confidence: Confidence,

    /// Variance formula used for the groups handed to the t-test
    ///
    /// Default: [`VarianceEstimator::Compatible`]
    pub variance_estimator: VarianceEstimator,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_sample_size: 5,
            confidence: Confidence::Conf95,
            variance_estimator: VarianceEstimator::Compatible,
        }
    }
}

impl DetectorConfig {
    /// Create a strict configuration (fewer false positives, more false negatives)
    pub fn strict() -> Self {
        Self {
            min_sample_size: 10,
            confidence: Confidence::Conf99,
            ..Self::default()
        }
    }

    /// Create a permissive configuration (more false positives, fewer false negatives)
    pub fn permissive() -> Self {
        Self {
            min_sample_size: 3,
            confidence: Confidence::Conf90,
            ..Self::default()
        }
    }

    /// Shortest window that leaves at least one candidate split
    pub fn min_window_len(&self) -> usize {
        self.min_sample_size.saturating_mul(2).saturating_add(2)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.min_sample_size == 0 {
            return Err(ChangeError::InvalidConfig(
                "min_sample_size must be >= 1, a single-sample group has no variance".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate configuration against a concrete window length
    pub fn validate_for_window(&self, len: usize) -> Result<()> {
        self.validate()?;

        if len < self.min_window_len() {
            return Err(ChangeError::WindowTooShort {
                len,
                min_sample_size: self.min_sample_size,
            });
        }

        Ok(())
    }

    /// Parse and validate a TOML configuration
    ///
    /// Missing keys fall back to their defaults:
    /// ```toml
    /// min_sample_size = 8
    /// confidence = "99"
    /// variance_estimator = "unbiased"
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Render configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Load and validate a TOML configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read detector config {}", path.display()))?;

        Self::from_toml_str(&contents).map_err(|e| {
            tracing::warn!("Rejected detector config {}: {}", path.display(), e);
            anyhow::Error::new(e).context(format!("Invalid detector config {}", path.display()))
        })
    }
}
