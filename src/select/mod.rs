//! The window-selection pipeline.
//!
//! [`select_windows`] is the primary operation of the crate: a pure,
//! deterministic function from an observed/synthetic trace pair, geometry,
//! period band, and threshold configuration to an ordered list of disjoint
//! accepted windows. Stages run in fixed order: valid regions, admissible
//! time domain, envelopes and extrema, candidate generation, scoring, and
//! threshold filtering. No state survives the call and the inputs are never
//! mutated, so invocations can run concurrently without synchronization.

mod candidate;
mod filter;
mod score;
mod window;

pub use candidate::{generate_candidates, CandidateParams};
pub use filter::{filter_and_merge, FilterContext};
pub use score::{score_window, NoiseProfile, ScoreParams};
pub use window::{AcceptedWindow, CandidateWindow, ScoredWindow, WindowScores};

use crate::config::{PeriodBand, WindowConfig};
use crate::core::{EventStationGeometry, Trace};
use crate::error::Result;
use crate::signal::{envelope, find_closest, valid_regions, Span};
use tracing::{debug, warn};

/// Select comparison windows between an observed and a synthetic waveform.
///
/// Returns the accepted windows sorted by start time, pairwise
/// non-overlapping. An empty list is a first-class outcome: gap-only or
/// flat traces, an event too close for the band, or thresholds rejecting
/// every candidate all yield `Ok(vec![])`.
///
/// # Errors
/// * [`WindowError::InvalidConfig`] / [`WindowError::InvalidBand`] when the
///   configuration or band is internally inconsistent
/// * [`WindowError::ShapeMismatch`] when the traces differ in sample count
///   or sampling interval
///
/// [`WindowError::InvalidConfig`]: crate::error::WindowError::InvalidConfig
/// [`WindowError::InvalidBand`]: crate::error::WindowError::InvalidBand
/// [`WindowError::ShapeMismatch`]: crate::error::WindowError::ShapeMismatch
pub fn select_windows(
    observed: &Trace,
    synthetic: &Trace,
    geometry: &EventStationGeometry,
    band: &PeriodBand,
    config: &WindowConfig,
) -> Result<Vec<AcceptedWindow>> {
    config.validate()?;
    band.validate()?;
    Trace::check_pair(observed, synthetic)?;

    let n = observed.len();
    let dt = observed.dt();
    if n == 0 {
        return Ok(Vec::new());
    }

    // Samples are comparable only where both traces carry real data.
    let combined: Vec<bool> = observed
        .validity()
        .iter()
        .zip(synthetic.validity())
        .map(|(&a, &b)| a && b)
        .collect();
    let spans = valid_regions(&combined);
    if spans.is_empty() {
        warn!(observed = observed.id(), "no jointly valid samples, skipping pair");
        return Ok(Vec::new());
    }
    debug!(regions = spans.len(), "valid regions computed");

    if observed.valid_variance() <= f64::EPSILON || synthetic.valid_variance() <= f64::EPSILON {
        warn!(observed = observed.id(), "zero-variance trace, skipping pair");
        return Ok(Vec::new());
    }

    // Geometry-derived admissible time range.
    let distance_km = geometry.epicentral_distance_km();
    let first_arrival = distance_km / config.max_velocity;
    let latest_end = distance_km / config.min_velocity;
    let times = observed.time_axis();
    let trace_end = times[n - 1];
    if first_arrival >= trace_end {
        warn!(
            observed = observed.id(),
            first_arrival, "first arrival beyond trace end, skipping pair"
        );
        return Ok(Vec::new());
    }
    let Some(domain_start) = find_closest(&times, first_arrival) else {
        return Ok(Vec::new());
    };
    let Some(domain_last) = find_closest(&times, latest_end) else {
        return Ok(Vec::new());
    };
    let domain = Span::new(domain_start, (domain_last + 1).min(n));
    debug!(?domain, distance_km, "admissible domain computed");

    let min_length = ((config.min_length_period * band.maximum_period) / dt).ceil() as usize;
    let max_length = ((config.max_length_period * band.maximum_period) / dt).ceil() as usize;
    if domain.len() < min_length.max(2) {
        return Ok(Vec::new());
    }

    let observed_envelope = envelope(observed.samples());
    let synthetic_envelope = envelope(synthetic.samples());

    let candidates = generate_candidates(
        observed.samples(),
        synthetic.samples(),
        &synthetic_envelope,
        &spans,
        domain,
        &CandidateParams {
            min_length,
            max_length,
            growth_correlation: config.threshold_correlation,
        },
    );
    debug!(count = candidates.len(), "candidates generated");
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let noise = NoiseProfile::from_pre_arrival(
        observed.samples(),
        observed.validity(),
        domain_start,
    );
    let score_params = ScoreParams {
        max_lag: (band.maximum_period / dt).ceil() as usize,
        noise_subwindow: (band.maximum_period / dt).ceil() as usize,
        max_noise: config.max_noise,
        max_noise_window: config.max_noise_window,
    };
    let scored = candidates
        .iter()
        .map(|c| {
            score_window(
                c,
                observed.samples(),
                synthetic.samples(),
                &observed_envelope,
                &synthetic_envelope,
                &noise,
                &score_params,
            )
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(count = scored.len(), "candidates scored");

    let accepted = filter_and_merge(
        scored,
        &FilterContext {
            dt,
            distance_km,
            minimum_period: band.minimum_period,
            maximum_period: band.maximum_period,
        },
        config,
    );
    debug!(count = accepted.len(), "windows accepted");
    Ok(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn t0() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2012, 6, 1, 0, 0, 0).unwrap()
    }

    /// ~1000 km epicentral distance along the equator.
    fn geometry_1000km() -> EventStationGeometry {
        EventStationGeometry::new(0.0, 0.0, 10.0, 0.0, 8.9932)
    }

    /// Sinusoid that is silent before `onset` seconds and ramps in over two
    /// periods, leaving a quiet pre-arrival noise segment.
    fn sine_trace(id: &str, n: usize, dt: f64, period: f64) -> Trace {
        let onset = 130.0;
        let samples: Vec<f64> = (0..n)
            .map(|i| {
                let t = i as f64 * dt;
                let ramp = ((t - onset) / (2.0 * period)).clamp(0.0, 1.0);
                ramp * (2.0 * std::f64::consts::PI * t / period).sin()
            })
            .collect();
        Trace::fully_valid(id, t0(), dt, samples).unwrap()
    }

    #[test]
    fn identical_sinusoids_yield_a_perfect_window() {
        let obs = sine_trace("obs", 1000, 0.5, 20.0);
        let syn = sine_trace("syn", 1000, 0.5, 20.0);
        let band = PeriodBand::new(15.0, 30.0).unwrap();
        // Relaxed minimum velocity so the admissible domain reaches the
        // trace end for this short record.
        let config = WindowConfig::default().min_velocity(1.0);

        let windows =
            select_windows(&obs, &syn, &geometry_1000km(), &band, &config).unwrap();
        assert!(!windows.is_empty());
        let longest = windows
            .iter()
            .max_by(|a, b| a.duration().partial_cmp(&b.duration()).unwrap())
            .unwrap();
        assert!((longest.cross_correlation - 1.0).abs() < 1e-9);
        assert_eq!(longest.lag_seconds, 0.0);
        assert!(longest.duration() >= 1.5 * band.maximum_period);
    }

    #[test]
    fn output_is_sorted_and_disjoint() {
        let obs = sine_trace("obs", 1000, 0.5, 20.0);
        let syn = sine_trace("syn", 1000, 0.5, 20.0);
        let band = PeriodBand::new(15.0, 30.0).unwrap();
        let config = WindowConfig::default().min_velocity(1.0);
        let windows =
            select_windows(&obs, &syn, &geometry_1000km(), &band, &config).unwrap();
        for pair in windows.windows(2) {
            assert!(pair[0].end_index <= pair[1].start_index);
        }
        for w in &windows {
            assert!(w.end_time > w.start_time);
        }
    }

    #[test]
    fn gap_only_trace_is_not_an_error() {
        let syn = sine_trace("syn", 1000, 0.5, 20.0);
        let obs = Trace::new(
            "obs",
            t0(),
            0.5,
            vec![0.0; 1000],
            vec![false; 1000],
        )
        .unwrap();
        let band = PeriodBand::new(15.0, 30.0).unwrap();
        let windows = select_windows(
            &obs,
            &syn,
            &geometry_1000km(),
            &band,
            &WindowConfig::default(),
        )
        .unwrap();
        assert!(windows.is_empty());
    }

    #[test]
    fn flat_trace_is_not_an_error() {
        let syn = sine_trace("syn", 1000, 0.5, 20.0);
        let obs = Trace::fully_valid("obs", t0(), 0.5, vec![1.0; 1000]).unwrap();
        let band = PeriodBand::new(15.0, 30.0).unwrap();
        let windows = select_windows(
            &obs,
            &syn,
            &geometry_1000km(),
            &band,
            &WindowConfig::default(),
        )
        .unwrap();
        assert!(windows.is_empty());
    }

    #[test]
    fn shape_mismatch_is_fatal() {
        let obs = sine_trace("obs", 1000, 0.5, 20.0);
        let syn = sine_trace("syn", 999, 0.5, 20.0);
        let band = PeriodBand::new(15.0, 30.0).unwrap();
        let result = select_windows(
            &obs,
            &syn,
            &geometry_1000km(),
            &band,
            &WindowConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn distant_event_with_short_record_yields_nothing() {
        // First arrival ~2250 s lies beyond the 500 s record.
        let obs = sine_trace("obs", 1000, 0.5, 20.0);
        let syn = sine_trace("syn", 1000, 0.5, 20.0);
        let geometry = EventStationGeometry::new(0.0, 0.0, 10.0, 0.0, 162.0);
        let band = PeriodBand::new(15.0, 30.0).unwrap();
        let windows =
            select_windows(&obs, &syn, &geometry, &band, &WindowConfig::default()).unwrap();
        assert!(windows.is_empty());
    }
}
