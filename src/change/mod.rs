// Single change-point detection with a Student's t significance gate
//
// Pipeline: window -> prefix sums -> best split by between-class scatter ->
// pooled two-sample t-test -> ChangePoint.
//
// Scientific Foundation:
// [1] http://excelsior.cs.ucsb.edu/papers/as06.pdf: changeover point estimated
//     as the split maximizing between-class scatter.
// [2] ministat (FreeBSD): Student's t critical-value table and pooled
//     variance test used for the significance gate.
//
// Implementation:
// - Single O(n) scan over cumulative sums; variances only computed for new maxima
// - Critical values from a static table (no distribution evaluation at runtime)
// - Never fails: degenerate windows surface as zero or non-finite values

mod config;
mod detector;
mod nonfinite;
mod outcome;
mod scatter;
mod student;
mod ttest;

pub use config::DetectorConfig;
pub use detector::{detect_change, detect_change_with, ChangeDetector, ChangePoint};
pub use outcome::ChangeOutcome;
pub use scatter::{scan, Split, Stats, VarianceEstimator};
pub use student::{critical_value, Confidence, CONFIDENCE_LEVELS, MAX_TABULATED_DF, STUDENT_T};
pub use ttest::{degrees_of_freedom, significance_margin, ttest, TResult};
