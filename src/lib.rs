//! Shiftpoint - single change-point detection for numeric windows
//!
//! This library finds the most likely point where the distribution of a
//! window of samples (e.g. a performance metric) shifts, and confirms the
//! shift with a pooled two-sample Student's t-test before reporting it.
//!
//! ```
//! use shiftpoint::{detect_change, Confidence};
//!
//! let window = [
//!     10.0, 10.2, 9.9, 10.1, 10.0, 9.8, 10.1, 10.0,
//!     14.9, 15.2, 15.0, 14.8, 15.1, 15.0, 15.2, 14.9,
//! ];
//! let cp = detect_change(&window, 3, Confidence::Conf99);
//! assert_eq!(cp.index, 7);
//! assert!(cp.is_significant());
//! ```

pub mod change;
pub mod error;

pub use change::{
    detect_change, ChangeDetector, ChangeOutcome, ChangePoint, Confidence, DetectorConfig,
};
pub use error::ChangeError;
