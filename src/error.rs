//! Error types for detector configuration
//!
//! Detection itself never fails: degenerate windows surface as zero or
//! non-finite values in the result. These errors cover the fallible edges
//! only (parsing confidence levels, validating and loading configuration).

use thiserror::Error;

/// Errors that can occur while building or loading a detector configuration
#[derive(Error, Debug)]
pub enum ChangeError {
    #[error("Unknown confidence level: {0} (expected one of 80, 90, 95, 98, 99, 99.5)")]
    UnknownConfidence(String),

    #[error("Invalid detector configuration: {0}")]
    InvalidConfig(String),

    #[error("Window of {len} samples leaves no split for min_sample_size={min_sample_size}")]
    WindowTooShort { len: usize, min_sample_size: usize },

    #[error("Failed to parse TOML configuration: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to serialize TOML configuration: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ChangeError>;
