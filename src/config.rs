//! Threshold configuration for window selection.
//!
//! All numeric heuristics of the selection pipeline live in one immutable
//! value that is passed into every call. The pipeline never mutates it, so a
//! single configuration can be shared across any number of concurrent
//! invocations.

use crate::error::{Result, WindowError};
use serde::{Deserialize, Serialize};

/// Period band of the signal content being compared, in seconds.
///
/// The band bounds the minimum physically meaningful window length and
/// scales the lag-search range and several thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodBand {
    /// Shortest period present in the filtered signals, in seconds.
    pub minimum_period: f64,
    /// Longest period present in the filtered signals, in seconds.
    pub maximum_period: f64,
}

impl PeriodBand {
    pub fn new(minimum_period: f64, maximum_period: f64) -> Result<Self> {
        let band = Self {
            minimum_period,
            maximum_period,
        };
        band.validate()?;
        Ok(band)
    }

    /// Check the band invariants: both periods positive, minimum <= maximum.
    pub fn validate(&self) -> Result<()> {
        if !(self.minimum_period > 0.0) || !(self.maximum_period > 0.0) {
            return Err(WindowError::InvalidBand(format!(
                "periods must be positive, got [{}, {}]",
                self.minimum_period, self.maximum_period
            )));
        }
        if self.minimum_period > self.maximum_period {
            return Err(WindowError::InvalidBand(format!(
                "minimum period {} exceeds maximum period {}",
                self.minimum_period, self.maximum_period
            )));
        }
        Ok(())
    }
}

/// Numeric thresholds controlling candidate growth, scoring, and acceptance.
///
/// Defaults follow the values established for continental-scale full-waveform
/// inversion; tighten or relax them per study region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Minimum acceptable cross-correlation coefficient for a window.
    pub min_cc: f64,
    /// Maximum acceptable absolute time lag, as a fraction of the minimum
    /// period (the lag test is `|lag| <= threshold_shift * minimum_period`).
    pub threshold_shift: f64,
    /// Secondary correlation bound applied while growing a candidate; a
    /// candidate stops growing once the extended window drops below it.
    pub threshold_correlation: f64,
    /// Minimum similarity between observed and synthetic envelopes in-window.
    pub min_envelope_similarity: f64,
    /// A sub-window counts as noise-contaminated when the pre-event noise
    /// amplitude exceeds `max_noise` times the sub-window's peak amplitude.
    pub max_noise: f64,
    /// Maximum tolerated fraction of noise-contaminated sub-windows.
    pub max_noise_window: f64,
    /// Minimum window length as a multiple of the maximum period.
    pub min_length_period: f64,
    /// Maximum window length as a multiple of the maximum period, bounding
    /// candidate growth.
    pub max_length_period: f64,
    /// Minimum physically plausible apparent velocity implied by a window's
    /// end time, in km/s. Also places the latest admissible window end.
    pub min_velocity: f64,
    /// Upper propagation-velocity bound placing the theoretical first
    /// arrival, in km/s. Nothing before `distance / max_velocity` is
    /// considered signal.
    pub max_velocity: f64,
    /// Maximum allowed ratio of in-window energy to the pre-event noise
    /// energy. Guards against clipped or spurious high-amplitude segments.
    pub max_energy_ratio: f64,
    /// Minimum number of local extrema of the observed signal inside an
    /// accepted window.
    pub min_peaks_troughs: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            min_cc: 0.10,
            threshold_shift: 0.30,
            threshold_correlation: 0.75,
            min_envelope_similarity: 0.2,
            max_noise: 0.10,
            max_noise_window: 0.4,
            min_length_period: 1.5,
            max_length_period: 10.0,
            min_velocity: 2.4,
            max_velocity: 8.0,
            max_energy_ratio: 10.0,
            min_peaks_troughs: 2,
        }
    }
}

impl WindowConfig {
    /// Set the minimum cross-correlation coefficient.
    pub fn min_cc(mut self, value: f64) -> Self {
        self.min_cc = value;
        self
    }

    /// Set the maximum lag as a fraction of the minimum period.
    pub fn threshold_shift(mut self, value: f64) -> Self {
        self.threshold_shift = value;
        self
    }

    /// Set the correlation bound used during candidate growth.
    pub fn threshold_correlation(mut self, value: f64) -> Self {
        self.threshold_correlation = value;
        self
    }

    /// Set the minimum envelope similarity.
    pub fn min_envelope_similarity(mut self, value: f64) -> Self {
        self.min_envelope_similarity = value;
        self
    }

    /// Set the minimum window length in multiples of the maximum period.
    pub fn min_length_period(mut self, value: f64) -> Self {
        self.min_length_period = value;
        self
    }

    /// Set the minimum apparent velocity in km/s.
    pub fn min_velocity(mut self, value: f64) -> Self {
        self.min_velocity = value;
        self
    }

    /// Set the maximum in-window to noise energy ratio.
    pub fn max_energy_ratio(mut self, value: f64) -> Self {
        self.max_energy_ratio = value;
        self
    }

    /// Set the minimum extrema count inside an accepted window.
    pub fn min_peaks_troughs(mut self, value: usize) -> Self {
        self.min_peaks_troughs = value;
        self
    }

    /// Check the configuration invariants. Called at pipeline entry before
    /// any signal processing.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("threshold_shift", self.threshold_shift),
            ("min_length_period", self.min_length_period),
            ("max_length_period", self.max_length_period),
            ("min_velocity", self.min_velocity),
            ("max_velocity", self.max_velocity),
            ("max_energy_ratio", self.max_energy_ratio),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(WindowError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        let unit_interval = [
            ("threshold_correlation", self.threshold_correlation),
            ("min_envelope_similarity", self.min_envelope_similarity),
            ("max_noise", self.max_noise),
            ("max_noise_window", self.max_noise_window),
        ];
        for (name, value) in unit_interval {
            if !(0.0..=1.0).contains(&value) {
                return Err(WindowError::InvalidConfig(format!(
                    "{name} must lie in [0, 1], got {value}"
                )));
            }
        }
        if !(-1.0..=1.0).contains(&self.min_cc) {
            return Err(WindowError::InvalidConfig(format!(
                "min_cc must lie in [-1, 1], got {}",
                self.min_cc
            )));
        }
        if self.min_length_period > self.max_length_period {
            return Err(WindowError::InvalidConfig(format!(
                "min_length_period {} exceeds max_length_period {}",
                self.min_length_period, self.max_length_period
            )));
        }
        if self.min_velocity > self.max_velocity {
            return Err(WindowError::InvalidConfig(format!(
                "min_velocity {} exceeds max_velocity {}",
                self.min_velocity, self.max_velocity
            )));
        }
        Ok(())
    }
}
