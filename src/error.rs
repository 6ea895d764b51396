//! Error types for the review sentiment pipeline

use crate::config::ConfigError;
use crate::data::TimeWindow;
use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Outcome of a pipeline run that did not produce a report.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Record store missing or unreadable
    #[error("Record store unavailable at {path}: {reason}")]
    StoreUnavailable { path: String, reason: String },

    /// No reviews in the requested month
    #[error("No reviews found for {window}")]
    EmptyWindow { window: TimeWindow },

    /// The classification capability failed or could not be invoked
    #[error("Sentiment classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    /// Month outside 1..=12
    #[error("Invalid time window: year {year}, month {month}")]
    InvalidWindow { year: i32, month: u32 },

    /// Month text that is neither a number, an abbreviation nor a full name
    #[error("Unknown month '{input}'")]
    UnknownMonth { input: String },

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PipelineError {
    /// `EmptyWindow` is an expected outcome, everything else is a failure.
    pub fn is_failure(&self) -> bool {
        !matches!(self, PipelineError::EmptyWindow { .. })
    }
}

/// Errors raised by a classification capability or its adapter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifierError {
    #[error("classifier not available: {0}")]
    Unavailable(String),

    #[error("classification failed: {0}")]
    Failed(String),

    #[error("classifier returned {actual} predictions for {expected} texts")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("classifier returned confidence {value} at index {index}")]
    InvalidConfidence { index: usize, value: f64 },

    #[error("classification timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },

    #[error("confidence precision {precision} exceeds {max} decimal places")]
    InvalidPrecision { precision: u32, max: u32 },
}

impl From<ClassifierError> for PipelineError {
    fn from(err: ClassifierError) -> Self {
        PipelineError::ClassifierUnavailable(err.to_string())
    }
}
