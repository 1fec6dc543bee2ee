// Tagged change-detection outcome
//
// `ChangePoint` reports "no split found" and "split rejected by the t-test"
// the same way (zero difference). This module separates the two without
// changing `ChangePoint` itself.

use crate::change::detector::ChangePoint;
use crate::change::scatter::Stats;
use serde::{Deserialize, Serialize};

/// Classification of a [`ChangePoint`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeOutcome {
    /// The window was too short for `min_sample_size`, or no split had
    /// any separation between the groups
    NoCandidate,

    /// A split was found but the mean difference is within sampling noise
    NotSignificant {
        index: usize,
        before: Stats,
        after: Stats,
    },

    /// Statistically significant shift after `index`
    Significant {
        index: usize,
        /// `before.mean - after.mean`
        #[serde(with = "crate::change::nonfinite")]
        difference: f64,
        /// Difference relative to the "after" mean; non-finite if that mean is 0
        #[serde(with = "crate::change::nonfinite")]
        percent: f64,
        before: Stats,
        after: Stats,
    },
}

impl From<&ChangePoint> for ChangeOutcome {
    fn from(cp: &ChangePoint) -> Self {
        // Evaluated splits always have non-empty groups
        if cp.before.is_empty() && cp.after.is_empty() {
            ChangeOutcome::NoCandidate
        } else if cp.t_result.is_significant() {
            ChangeOutcome::Significant {
                index: cp.index,
                difference: cp.t_result.difference,
                percent: cp.t_result.percent,
                before: cp.before,
                after: cp.after,
            }
        } else {
            ChangeOutcome::NotSignificant {
                index: cp.index,
                before: cp.before,
                after: cp.after,
            }
        }
    }
}

impl ChangeOutcome {
    /// Whether the split passed the t-test
    pub fn is_significant(&self) -> bool {
        matches!(self, ChangeOutcome::Significant { .. })
    }

    /// Split index, if a candidate split was evaluated
    pub fn index(&self) -> Option<usize> {
        match self {
            ChangeOutcome::NoCandidate => None,
            ChangeOutcome::NotSignificant { index, .. }
            | ChangeOutcome::Significant { index, .. } => Some(*index),
        }
    }

    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        match self {
            ChangeOutcome::NoCandidate => {
                report.push_str("⚠️  NO CANDIDATE SPLIT\n\n");
                report.push_str("Window too short for min_sample_size, or no separation found\n");
            }
            ChangeOutcome::NotSignificant {
                index,
                before,
                after,
            } => {
                report.push_str("✅ NO SIGNIFICANT CHANGE\n\n");
                report.push_str(&format!("Best split: after index {}\n", index));
                push_groups(&mut report, before, after);
            }
            ChangeOutcome::Significant {
                index,
                difference,
                percent,
                before,
                after,
            } => {
                report.push_str(&format!("❌ CHANGE DETECTED after index {}\n\n", index));
                report.push_str(&format!(
                    "Difference: {:.4} ({:+.2}% vs after)\n",
                    difference, percent
                ));
                push_groups(&mut report, before, after);
            }
        }

        report
    }
}

fn push_groups(report: &mut String, before: &Stats, after: &Stats) {
    report.push_str("\n📊 Groups:\n");
    for (label, stats) in [("before", before), ("after", after)] {
        report.push_str(&format!(
            "  {} (n={}, mean={:.4}, variance={:.4})\n",
            label, stats.count, stats.mean, stats.variance
        ));
    }
}
