// Between-class scatter scan for the most likely split in a window
//
// Scientific Foundation:
// Minimizing the ratio of within-class to between-class scatter (sw/sb) is
// equivalent to maximizing the between-class scatter sb, so only sb is
// tracked while scanning.
//
// sb depends only on the two group means. Means come from prefix sums, so the
// whole scan is a single O(n) pass. Variances are only needed by the t-test
// and are computed lazily, when a split becomes the new maximum.

use serde::{Deserialize, Serialize};

/// Descriptive statistics of one side of a split
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Sample mean
    #[serde(with = "crate::change::nonfinite")]
    pub mean: f64,

    /// Sample variance (divisor `count - 1`, see [`VarianceEstimator`])
    #[serde(with = "crate::change::nonfinite")]
    pub variance: f64,

    /// Number of samples in the group
    pub count: usize,
}

impl Stats {
    /// True for the placeholder group reported when no split was found
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Formula used for the per-group variance handed to the t-test
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceEstimator {
    /// `(sumsq - sum² / (n - 1)) / (n - 1)`
    ///
    /// Matches the detector lineage this crate reproduces. The correction
    /// term divides by `n - 1`, so low-dispersion groups can come out
    /// negative; the pooled deviation is then NaN and the gate reports the
    /// difference as significant.
    #[default]
    Compatible,

    /// Textbook unbiased estimator `(sumsq - sum² / n) / (n - 1)`
    Unbiased,
}

impl VarianceEstimator {
    /// Variance of a group from its partial sums
    pub fn variance(self, sum: f64, sumsq: f64, count: usize) -> f64 {
        let n = count as f64;
        let correction = match self {
            VarianceEstimator::Compatible => n - 1.0,
            VarianceEstimator::Unbiased => n,
        };
        (sumsq - (sum * sum) / correction) / (n - 1.0)
    }
}

/// Best split found by [`scan`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Split {
    /// Last index of the "before" group; 0 when no split was found
    pub index: usize,

    /// Between-class scatter at `index`
    pub scatter: f64,

    /// Samples `window[..=index]`
    pub before: Stats,

    /// Samples `window[index + 1..]`
    pub after: Stats,
}

impl Split {
    /// Whether some split strictly exceeded zero scatter
    pub fn is_candidate(&self) -> bool {
        !self.before.is_empty()
    }
}

/// Find the split index maximizing between-class scatter
///
/// Candidates `l` run over `min_sample_size..n - 1 - min_sample_size`; the
/// "before" group is `window[..=l]` and the "after" group the rest. When the
/// range is empty or every candidate has zero scatter, the default (empty)
/// [`Split`] is returned.
///
/// # Example
/// ```
/// use shiftpoint::change::{scan, VarianceEstimator};
///
/// let window = [1.0, 1.0, 1.0, 1.0, 5.0, 5.0, 5.0, 5.0];
/// let split = scan(&window, 1, VarianceEstimator::Unbiased);
/// assert_eq!(split.index, 3);
/// assert_eq!(split.before.mean, 1.0);
/// assert_eq!(split.after.mean, 5.0);
/// ```
pub fn scan(window: &[f64], min_sample_size: usize, estimator: VarianceEstimator) -> Split {
    let n = window.len();

    // cumsum[i] / cumsumsq[i]: sum and sum of squares of window[..=i].
    // cumshift[i] sums window[..=i] - window[0]; a flat window then has
    // exactly zero scatter at every split, whatever rounding the raw sums carry.
    let origin = window.first().copied().unwrap_or(0.0);
    let mut cumsum = Vec::with_capacity(n);
    let mut cumsumsq = Vec::with_capacity(n);
    let mut cumshift = Vec::with_capacity(n);
    let (mut sum, mut sumsq, mut shift) = (0.0_f64, 0.0_f64, 0.0_f64);
    for &v in window {
        sum += v;
        sumsq += v * v;
        shift += v - origin;
        cumsum.push(sum);
        cumsumsq.push(sumsq);
        cumshift.push(shift);
    }

    // sb is never negative, so zero is a safe floor for the running maximum
    let mut best = Split::default();

    let end = n.saturating_sub(min_sample_size.saturating_add(1));
    for l in min_sample_size..end {
        let count1 = l + 1;
        let n1 = count1 as f64;
        let count2 = n - count1;
        let n2 = count2 as f64;

        let gap = cumshift[l] / n1 - (shift - cumshift[l]) / n2;
        let sb = ((n1 * n2) / (n1 + n2)) * gap * gap;
        if best.scatter < sb {
            let mean1 = cumsum[l] / n1;
            let sum2 = sum - cumsum[l];
            let mean2 = sum2 / n2;
            let sumsq2 = sumsq - cumsumsq[l];
            best = Split {
                index: l,
                scatter: sb,
                before: Stats {
                    mean: mean1,
                    variance: estimator.variance(cumsum[l], cumsumsq[l], count1),
                    count: count1,
                },
                after: Stats {
                    mean: mean2,
                    variance: estimator.variance(sum2, sumsq2, count2),
                    count: count2,
                },
            };
            tracing::trace!(index = l, scatter = sb, "new scatter maximum");
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_finds_step() {
        let mut window = vec![1.0; 11];
        window.extend(vec![2.0; 12]);

        let split = scan(&window, 5, VarianceEstimator::Compatible);
        assert_eq!(split.index, 10);
        assert_eq!(split.before.count, 11);
        assert_eq!(split.after.count, 12);
        assert_eq!(split.before.mean, 1.0);
        assert_eq!(split.after.mean, 2.0);
        assert!(split.is_candidate());
    }

    #[test]
    fn test_scan_constant_window_has_no_candidate() {
        let window = vec![3.0; 20];
        let split = scan(&window, 2, VarianceEstimator::Compatible);
        assert_eq!(split, Split::default());
        assert!(!split.is_candidate());
    }

    #[test]
    fn test_scan_fractional_constant_window_has_no_candidate() {
        // Raw prefix sums of these values drift by a few ulps between splits
        for value in [0.1, 0.3, 1.1, 2.7, 100.01, 1e-3, -7.77] {
            for min_sample_size in [0, 2, 5] {
                let split = scan(&[value; 23], min_sample_size, VarianceEstimator::Compatible);
                assert_eq!(split.scatter, 0.0, "value={} min={}", value, min_sample_size);
                assert!(!split.is_candidate());
            }
        }
    }

    #[test]
    fn test_scan_offset_step_keeps_raw_means() {
        let mut window = vec![100.1; 8];
        window.extend(vec![100.6; 8]);

        let split = scan(&window, 2, VarianceEstimator::Unbiased);
        assert_eq!(split.index, 7);
        assert!((split.before.mean - 100.1).abs() < 1e-9);
        assert!((split.after.mean - 100.6).abs() < 1e-9);
        assert!(split.before.mean != 0.0 && split.after.mean != 0.0);
    }

    #[test]
    fn test_scan_empty_range() {
        // n - 1 - 2 * min = 8 - 1 - 8 < 1
        let window = [1.0, 1.0, 1.0, 1.0, 9.0, 9.0, 9.0, 9.0];
        let split = scan(&window, 4, VarianceEstimator::Compatible);
        assert!(!split.is_candidate());
        assert_eq!(split.index, 0);
    }

    #[test]
    fn test_scan_empty_window() {
        let split = scan(&[], 0, VarianceEstimator::Unbiased);
        assert!(!split.is_candidate());
    }

    #[test]
    fn test_scan_huge_min_sample_size_does_not_overflow() {
        let split = scan(&[1.0, 2.0, 3.0], usize::MAX, VarianceEstimator::Compatible);
        assert!(!split.is_candidate());
    }

    #[test]
    fn test_scan_counts_cover_window() {
        let window = [4.0, 5.0, 4.0, 6.0, 9.0, 10.0, 11.0, 9.0, 10.0];
        let split = scan(&window, 1, VarianceEstimator::Unbiased);
        assert!(split.is_candidate());
        assert_eq!(split.before.count + split.after.count, window.len());
        assert_eq!(split.index, 3);
    }

    #[test]
    fn test_split_at_index_zero_is_still_a_candidate() {
        let window = [10.0, 0.0, 0.0, 0.0, 0.0];
        let split = scan(&window, 0, VarianceEstimator::Unbiased);
        assert_eq!(split.index, 0);
        assert!(split.is_candidate());
        assert_eq!(split.before.count, 1);
    }

    #[test]
    fn test_unbiased_variance_matches_textbook() {
        // [2, 4, 6, 8]: mean 5, sum of squared deviations 20, 20 / 3
        let var = VarianceEstimator::Unbiased.variance(20.0, 120.0, 4);
        assert!((var - 20.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_compatible_variance_correction_term() {
        // (120 - 400 / 3) / 3
        let var = VarianceEstimator::Compatible.variance(20.0, 120.0, 4);
        assert!((var - (120.0 - 400.0 / 3.0) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_compatible_variance_negative_for_constant_group() {
        // Eleven ones: (11 - 121 / 10) / 10
        let var = VarianceEstimator::Compatible.variance(11.0, 11.0, 11);
        assert!(var < 0.0);
        assert!((var + 0.11).abs() < 1e-12);
        assert_eq!(VarianceEstimator::Unbiased.variance(11.0, 11.0, 11), 0.0);
    }

    #[test]
    fn test_single_sample_group_variance_not_finite() {
        assert!(!VarianceEstimator::Unbiased.variance(3.0, 9.0, 1).is_finite());
        assert!(!VarianceEstimator::Compatible.variance(3.0, 9.0, 1).is_finite());
    }
}
