//! Window types flowing through the selection pipeline.

use crate::signal::Span;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A proposed comparison interval, not yet scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateWindow {
    pub span: Span,
}

impl CandidateWindow {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            span: Span::new(start, end),
        }
    }
}

/// Quantitative similarity measures of one candidate window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowScores {
    /// Best normalized cross-correlation coefficient within the lag bound.
    pub cross_correlation: f64,
    /// Lag in samples at which the coefficient peaks; positive means the
    /// observed waveform arrives after the synthetic one.
    pub lag_samples: i64,
    /// Envelope similarity in [0, 1]; 1.0 for identical envelopes.
    pub envelope_similarity: f64,
    /// Mean in-window power of the observed trace over the mean power of
    /// the pre-arrival noise segment; 0.0 when no noise reference exists.
    pub energy_ratio: f64,
    /// Number of local extrema of the observed signal inside the window.
    pub peaks_troughs: usize,
    /// Whether too many sub-windows fail to rise above the pre-event noise.
    pub noise_contaminated: bool,
}

/// A candidate together with its computed metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredWindow {
    pub span: Span,
    pub scores: WindowScores,
}

/// A window that passed every threshold test.
///
/// Times are seconds after the trace start (which the pipeline equates with
/// the event origin time); the sample indices refer to both input traces.
/// Start time, end time, coefficient, and lag are what the misfit and
/// persistence components downstream consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptedWindow {
    pub start_index: usize,
    pub end_index: usize,
    pub start_time: f64,
    pub end_time: f64,
    pub cross_correlation: f64,
    pub lag_seconds: f64,
}

impl AcceptedWindow {
    /// Window length in seconds.
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    pub fn span(&self) -> Span {
        Span::new(self.start_index, self.end_index)
    }

    /// Absolute start time given the trace start.
    pub fn absolute_start_time(&self, trace_start: DateTime<Utc>) -> DateTime<Utc> {
        trace_start + Duration::microseconds((self.start_time * 1e6).round() as i64)
    }

    /// Absolute end time given the trace start.
    pub fn absolute_end_time(&self, trace_start: DateTime<Utc>) -> DateTime<Utc> {
        trace_start + Duration::microseconds((self.end_time * 1e6).round() as i64)
    }
}
