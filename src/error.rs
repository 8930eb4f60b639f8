//! Error types for choroplet.

use thiserror::Error;

/// Errors raised by scale construction, aggregation and dataset loading.
#[derive(Error, Debug)]
pub enum Error {
    #[error("scale configuration: {keys} keys, {colors} colors, {labels} labels (lengths must match and be non-zero)")]
    LengthMismatch {
        keys: usize,
        colors: usize,
        labels: usize,
    },

    #[error("scale thresholds must be strictly ascending (offending index {0})")]
    UnsortedThresholds(usize),

    #[error("duplicate key in scale or category configuration: {0:?}")]
    DuplicateKey(String),

    #[error("category {0:?} has no display label")]
    MissingLabel(String),

    #[error("formatter bounds inverted: low {low} > high {high}")]
    InvalidBounds { low: f64, high: f64 },

    #[error("invalid hex color: {0:?}")]
    InvalidColor(String),

    #[error("unknown destination category: {0:?}")]
    UnknownCategory(String),

    #[error("region {region:?} has no travel time for active category {category:?}")]
    MissingValue { region: String, category: String },

    #[error("negative travel time {minutes} for category {category:?} in region {region:?}")]
    NegativeMinutes {
        region: String,
        category: String,
        minutes: f64,
    },

    #[error("dataset decode error: {0}")]
    Dataset(#[from] serde_json::Error),
}

/// Result type alias for choroplet operations.
pub type Result<T> = std::result::Result<T, Error>;
