// Pooled-variance two-sample Student's t-test
//
// Critical values come from the precomputed table in `student`, so the test
// never evaluates the t distribution itself. Degenerate groups (one sample,
// negative or zero variance, zero reference mean) are not rejected: they
// propagate as NaN/Inf through the margin and the percent change.

use crate::change::scatter::Stats;
use crate::change::student::{critical_value, Confidence};
use serde::{Deserialize, Serialize};

/// Result of the significance gate
///
/// A zero `difference` means "no significant change".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TResult {
    /// Difference in sample means (`before - after`)
    #[serde(with = "crate::change::nonfinite")]
    pub difference: f64,

    /// Difference as a percentage of the "after" mean
    #[serde(with = "crate::change::nonfinite")]
    pub percent: f64,
}

impl TResult {
    /// Whether the gate accepted the difference
    pub fn is_significant(&self) -> bool {
        self.difference != 0.0
    }
}

/// Degrees of freedom of the pooled test: `n1 + n2 - 2`
pub fn degrees_of_freedom(before: &Stats, after: &Stats) -> usize {
    (before.count + after.count).saturating_sub(2)
}

/// Half-width `t * s` of the acceptance region around zero difference
///
/// `s` is the pooled standard error of the mean difference.
pub fn significance_margin(before: &Stats, after: &Stats, confidence: Confidence) -> f64 {
    let t = critical_value(degrees_of_freedom(before, after), confidence);

    let dn = before.count as f64;
    let rn = after.count as f64;

    let mut spool = (dn - 1.0) * before.variance + (rn - 1.0) * after.variance;
    spool /= dn + rn - 2.0;
    let spool = spool.sqrt();

    let s = spool * (1.0 / dn + 1.0 / rn).sqrt();
    t * s
}

/// Test whether the means of `before` and `after` differ at `confidence`
///
/// # Example
/// ```
/// use shiftpoint::change::{ttest, Confidence, Stats};
///
/// let before = Stats { mean: 10.0, variance: 1.0, count: 20 };
/// let after = Stats { mean: 12.0, variance: 1.0, count: 20 };
///
/// let result = ttest(&before, &after, Confidence::Conf95);
/// assert_eq!(result.difference, -2.0);
/// assert!((result.percent + 100.0 / 6.0).abs() < 1e-9);
/// ```
pub fn ttest(before: &Stats, after: &Stats, confidence: Confidence) -> TResult {
    let d = before.mean - after.mean;
    let e = significance_margin(before, after, confidence);

    if d.abs() <= e {
        return TResult::default();
    }

    TResult {
        difference: d,
        percent: d * 100.0 / after.mean,
    }
}
