//! Error types for the seiswin library.

use thiserror::Error;

/// Result type alias for window-selection operations.
pub type Result<T> = std::result::Result<T, WindowError>;

/// Errors that can occur during window selection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WindowError {
    /// Observed and synthetic traces differ in shape (sample count or
    /// sampling interval). Fatal for the pair; never retried.
    #[error("trace shape mismatch between '{observed_id}' and '{synthetic_id}': {detail}")]
    ShapeMismatch {
        observed_id: String,
        synthetic_id: String,
        detail: String,
    },

    /// A trace failed its own structural invariants.
    #[error("invalid trace: {0}")]
    InvalidTrace(String),

    /// The threshold configuration is internally inconsistent. Raised
    /// before any signal processing begins.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The period band is empty or non-positive.
    #[error("invalid period band: {0}")]
    InvalidBand(String),

    /// A window with start >= end reached the scorer. This is an internal
    /// precondition violation, not an expected runtime condition.
    #[error("malformed window: start {start} >= end {end}")]
    MalformedWindow { start: usize, end: usize },
}
