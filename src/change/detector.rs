// Change detection: scatter scan followed by the t-test gate
//
// Estimation follows the two-window approach of
// http://excelsior.cs.ucsb.edu/papers/as06.pdf: the estimate approaches the
// true changeover point as the window grows, provided the two distributions
// are dissimilar enough. A window need not contain a change at all, so the
// best split is confirmed with a Student's t-test to keep false positives down.

use crate::change::config::DetectorConfig;
use crate::change::outcome::ChangeOutcome;
use crate::change::scatter::{scan, Stats, VarianceEstimator};
use crate::change::student::Confidence;
use crate::change::ttest::{ttest, TResult};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Most likely change point of a window
///
/// `index == 0` together with a zero `t_result.difference` is also what an
/// empty scan reports; use [`ChangePoint::outcome`] to tell the cases apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangePoint {
    /// Last index before the shift
    pub index: usize,

    /// Significance of the mean difference at `index`
    pub t_result: TResult,

    /// Samples `window[..=index]`
    pub before: Stats,

    /// Samples `window[index + 1..]`
    pub after: Stats,
}

impl ChangePoint {
    /// Whether the gate accepted the split
    pub fn is_significant(&self) -> bool {
        self.t_result.is_significant()
    }

    /// Tagged view separating "no candidate" from "rejected by the gate"
    pub fn outcome(&self) -> ChangeOutcome {
        ChangeOutcome::from(self)
    }

    /// Render as pretty-printed JSON
    ///
    /// NaN and infinite fields are written as "NaN", "inf" and "-inf" strings,
    /// so the output deserializes back into an equivalent `ChangePoint`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Detect the most likely change point in `window`
///
/// Splits closer than `min_sample_size` to either end are not considered.
/// Never fails: a window too short for any split, or one without any
/// separation, yields `ChangePoint::default()`.
///
/// # Example
/// ```
/// use shiftpoint::change::{detect_change, Confidence};
///
/// let mut window = vec![1.0; 11];
/// window.extend(vec![2.0; 12]);
///
/// let cp = detect_change(&window, 5, Confidence::Conf95);
/// assert_eq!(cp.index, 10);
/// assert_eq!(cp.t_result.difference, -1.0);
/// ```
pub fn detect_change(
    window: &[f64],
    min_sample_size: usize,
    confidence: Confidence,
) -> ChangePoint {
    detect(
        window,
        min_sample_size,
        confidence,
        VarianceEstimator::Compatible,
    )
}

/// [`detect_change`] driven by a [`DetectorConfig`]
///
/// The config is not validated here; see [`ChangeDetector::new`].
pub fn detect_change_with(window: &[f64], config: &DetectorConfig) -> ChangePoint {
    detect(
        window,
        config.min_sample_size,
        config.confidence,
        config.variance_estimator,
    )
}

fn detect(
    window: &[f64],
    min_sample_size: usize,
    confidence: Confidence,
    estimator: VarianceEstimator,
) -> ChangePoint {
    let split = scan(window, min_sample_size, estimator);

    // Empty groups have no degrees of freedom to look up
    let t_result = if split.is_candidate() {
        ttest(&split.before, &split.after, confidence)
    } else {
        TResult::default()
    };

    tracing::debug!(
        samples = window.len(),
        min_sample_size,
        %confidence,
        index = split.index,
        scatter = split.scatter,
        difference = t_result.difference,
        "change detection finished"
    );

    ChangePoint {
        index: split.index,
        t_result,
        before: split.before,
        after: split.after,
    }
}

/// Reusable detector holding a validated configuration
///
/// # Example
/// ```
/// use shiftpoint::change::{ChangeDetector, DetectorConfig};
///
/// let detector = ChangeDetector::new(DetectorConfig::permissive()).unwrap();
/// let window = [5.0, 5.1, 4.9, 5.0, 5.2, 9.8, 10.1, 9.9, 10.0, 10.2];
/// assert!(detector.check(&window).is_significant());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeDetector {
    config: DetectorConfig,
}

impl ChangeDetector {
    /// Validate `config` and build a detector around it
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration this detector was built with
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Detect the most likely change point in `window`
    pub fn check(&self, window: &[f64]) -> ChangePoint {
        detect_change_with(window, &self.config)
    }

    /// Like [`check`](Self::check), returning the tagged outcome
    pub fn check_outcome(&self, window: &[f64]) -> ChangeOutcome {
        self.check(window).outcome()
    }
}
