//! Trace data structure for waveform data with explicit gap handling.

use crate::error::{Result, WindowError};
use chrono::{DateTime, Duration, Utc};

/// An evenly sampled waveform with a per-sample validity mask.
///
/// A `false` validity flag marks a gap or fill sample. Gaps are carried as an
/// explicit boolean mask rather than floating-point sentinels, so downstream
/// arithmetic never silently mixes fill values into real data.
///
/// Traces passed to the selection pipeline are assumed to start at the event
/// origin time; pipeline times are seconds after the trace start.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    id: String,
    start_time: DateTime<Utc>,
    dt: f64,
    samples: Vec<f64>,
    validity: Vec<bool>,
}

impl Trace {
    /// Create a trace from samples and a validity mask.
    ///
    /// # Arguments
    /// * `id` - Identifier of the waveform (e.g. SEED id `NET.STA.LOC.CHA`)
    /// * `start_time` - Absolute time of the first sample
    /// * `dt` - Sampling interval in seconds, must be positive
    /// * `samples` - Amplitude values
    /// * `validity` - Per-sample flag, `true` = real data; same length as
    ///   `samples`
    pub fn new(
        id: impl Into<String>,
        start_time: DateTime<Utc>,
        dt: f64,
        samples: Vec<f64>,
        validity: Vec<bool>,
    ) -> Result<Self> {
        let id = id.into();
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(WindowError::InvalidTrace(format!(
                "'{id}': sampling interval must be positive and finite, got {dt}"
            )));
        }
        if samples.len() != validity.len() {
            return Err(WindowError::InvalidTrace(format!(
                "'{id}': {} samples but {} validity flags",
                samples.len(),
                validity.len()
            )));
        }
        Ok(Self {
            id,
            start_time,
            dt,
            samples,
            validity,
        })
    }

    /// Create a trace whose samples are all valid.
    pub fn fully_valid(
        id: impl Into<String>,
        start_time: DateTime<Utc>,
        dt: f64,
        samples: Vec<f64>,
    ) -> Result<Self> {
        let validity = vec![true; samples.len()];
        Self::new(id, start_time, dt, samples, validity)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Sampling interval in seconds.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn validity(&self) -> &[bool] {
        &self.validity
    }

    /// Time of sample `index` in seconds after the trace start.
    pub fn time_of(&self, index: usize) -> f64 {
        index as f64 * self.dt
    }

    /// Relative sample times in seconds, `[0, dt, 2*dt, ...]`.
    pub fn time_axis(&self) -> Vec<f64> {
        (0..self.samples.len()).map(|i| self.time_of(i)).collect()
    }

    /// Absolute time of a relative offset in seconds.
    pub fn absolute_time(&self, seconds: f64) -> DateTime<Utc> {
        self.start_time + Duration::microseconds((seconds * 1e6).round() as i64)
    }

    /// Variance of the valid samples only; 0.0 when fewer than two samples
    /// are valid.
    pub fn valid_variance(&self) -> f64 {
        let valid: Vec<f64> = self
            .samples
            .iter()
            .zip(&self.validity)
            .filter(|(_, &v)| v)
            .map(|(&x, _)| x)
            .collect();
        if valid.len() < 2 {
            return 0.0;
        }
        let mean = valid.iter().sum::<f64>() / valid.len() as f64;
        valid.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / valid.len() as f64
    }

    /// Enforce the shared-shape invariant between an observed/synthetic
    /// pair: identical sample count and sampling interval.
    pub fn check_pair(observed: &Trace, synthetic: &Trace) -> Result<()> {
        if observed.len() != synthetic.len() {
            return Err(WindowError::ShapeMismatch {
                observed_id: observed.id.clone(),
                synthetic_id: synthetic.id.clone(),
                detail: format!("sample counts {} vs {}", observed.len(), synthetic.len()),
            });
        }
        // Sampling intervals come from the same processing chain; a relative
        // tolerance absorbs float round-off from unit conversions.
        let tolerance = 1e-7 * observed.dt.max(synthetic.dt);
        if (observed.dt - synthetic.dt).abs() > tolerance {
            return Err(WindowError::ShapeMismatch {
                observed_id: observed.id.clone(),
                synthetic_id: synthetic.id.clone(),
                detail: format!(
                    "sampling intervals {} vs {}",
                    observed.dt, synthetic.dt
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2011, 3, 11, 5, 46, 24).unwrap()
    }

    #[test]
    fn construction_checks_lengths() {
        let ok = Trace::new("X.Y..Z", t0(), 0.5, vec![0.0; 10], vec![true; 10]);
        assert!(ok.is_ok());
        let bad = Trace::new("X.Y..Z", t0(), 0.5, vec![0.0; 10], vec![true; 9]);
        assert!(matches!(bad, Err(WindowError::InvalidTrace(_))));
    }

    #[test]
    fn construction_checks_dt() {
        assert!(Trace::fully_valid("a", t0(), 0.0, vec![0.0; 4]).is_err());
        assert!(Trace::fully_valid("a", t0(), -1.0, vec![0.0; 4]).is_err());
        assert!(Trace::fully_valid("a", t0(), f64::NAN, vec![0.0; 4]).is_err());
    }

    #[test]
    fn pair_check_rejects_shape_mismatch() {
        let a = Trace::fully_valid("obs", t0(), 0.5, vec![0.0; 10]).unwrap();
        let b = Trace::fully_valid("syn", t0(), 0.5, vec![0.0; 11]).unwrap();
        assert!(Trace::check_pair(&a, &b).is_err());

        let c = Trace::fully_valid("syn", t0(), 0.25, vec![0.0; 10]).unwrap();
        assert!(Trace::check_pair(&a, &c).is_err());

        let d = Trace::fully_valid("syn", t0(), 0.5, vec![1.0; 10]).unwrap();
        assert!(Trace::check_pair(&a, &d).is_ok());
    }

    #[test]
    fn time_axis_and_absolute_time() {
        let tr = Trace::fully_valid("a", t0(), 0.5, vec![0.0; 4]).unwrap();
        assert_eq!(tr.time_axis(), vec![0.0, 0.5, 1.0, 1.5]);
        let end = tr.absolute_time(1.5);
        assert_eq!((end - tr.start_time()).num_milliseconds(), 1500);
    }

    #[test]
    fn valid_variance_ignores_gap_samples() {
        // Gap samples carry a huge fill value that must not leak in.
        let samples = vec![1.0, -1.0, 1e30, 1.0, -1.0];
        let validity = vec![true, true, false, true, true];
        let tr = Trace::new("a", t0(), 1.0, samples, validity).unwrap();
        assert_relative_eq!(tr.valid_variance(), 1.0);
    }

    #[test]
    fn valid_variance_degenerate() {
        let tr = Trace::new("a", t0(), 1.0, vec![5.0; 3], vec![false; 3]).unwrap();
        assert_eq!(tr.valid_variance(), 0.0);
        let tr = Trace::fully_valid("a", t0(), 1.0, vec![5.0; 3]).unwrap();
        assert_eq!(tr.valid_variance(), 0.0);
    }
}
