//! Quantitative scoring of candidate windows.

use crate::error::{Result, WindowError};
use crate::select::window::{CandidateWindow, ScoredWindow, WindowScores};
use crate::signal::{find_local_extrema, max_cross_correlation};

/// Pre-event noise reference, taken from the valid samples strictly before
/// the theoretical first arrival.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseProfile {
    /// Peak absolute amplitude of the noise segment.
    pub level: f64,
    /// Mean power of the noise segment.
    pub power: f64,
}

impl NoiseProfile {
    /// Measure the noise segment `[0, first_arrival_index)` of a trace,
    /// skipping gap samples. An empty or fully gapped segment yields a
    /// silent profile, which downstream treats as "no noise reference".
    pub fn from_pre_arrival(
        samples: &[f64],
        validity: &[bool],
        first_arrival_index: usize,
    ) -> Self {
        let end = first_arrival_index.min(samples.len());
        let mut level = 0.0f64;
        let mut power_sum = 0.0;
        let mut count = 0usize;
        for i in 0..end {
            if validity[i] {
                level = level.max(samples[i].abs());
                power_sum += samples[i] * samples[i];
                count += 1;
            }
        }
        let power = if count > 0 {
            power_sum / count as f64
        } else {
            0.0
        };
        Self { level, power }
    }

    /// Whether the profile carries a usable reference.
    pub fn is_silent(&self) -> bool {
        self.power <= f64::EPSILON
    }
}

/// Scoring knobs, all derived from the period band and configuration by the
/// pipeline.
#[derive(Debug, Clone, Copy)]
pub struct ScoreParams {
    /// Lag-search bound in samples.
    pub max_lag: usize,
    /// Sub-window length in samples for the noise screen (one maximum
    /// period).
    pub noise_subwindow: usize,
    /// `max_noise`: noise-to-peak bound per sub-window.
    pub max_noise: f64,
    /// `max_noise_window`: tolerated fraction of contaminated sub-windows.
    pub max_noise_window: f64,
}

/// Compute the similarity measures for one candidate window.
///
/// `observed`/`synthetic` are the full traces; the candidate's span slices
/// them. A malformed span (start >= end) is an upstream precondition
/// violation and returns [`WindowError::MalformedWindow`].
pub fn score_window(
    candidate: &CandidateWindow,
    observed: &[f64],
    synthetic: &[f64],
    observed_envelope: &[f64],
    synthetic_envelope: &[f64],
    noise: &NoiseProfile,
    params: &ScoreParams,
) -> Result<ScoredWindow> {
    let span = candidate.span;
    if span.start >= span.end || span.end > observed.len() {
        return Err(WindowError::MalformedWindow {
            start: span.start,
            end: span.end,
        });
    }

    let obs = &observed[span.start..span.end];
    let syn = &synthetic[span.start..span.end];

    let (cross_correlation, lag_samples) = max_cross_correlation(obs, syn, params.max_lag);

    let envelope_similarity = envelope_similarity(
        &observed_envelope[span.start..span.end],
        &synthetic_envelope[span.start..span.end],
    );

    let window_power = obs.iter().map(|x| x * x).sum::<f64>() / obs.len() as f64;
    let energy_ratio = if noise.is_silent() {
        0.0
    } else {
        window_power / noise.power
    };

    let peaks_troughs = find_local_extrema(obs).len();

    let noise_contaminated = noise_screen(obs, noise.level, params);

    Ok(ScoredWindow {
        span,
        scores: WindowScores {
            cross_correlation,
            lag_samples,
            envelope_similarity,
            energy_ratio,
            peaks_troughs,
            noise_contaminated,
        },
    })
}

/// One minus the relative L2 difference of the two envelopes; 1.0 for
/// identical envelopes, approaching 0.0 for disjoint ones.
fn envelope_similarity(a: &[f64], b: &[f64]) -> f64 {
    let diff: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    let denom = norm_a + norm_b;
    if denom <= f64::EPSILON {
        return 0.0;
    }
    1.0 - diff / denom
}

/// Divide the window into sub-windows of one maximum period and flag it
/// when the pre-event noise amplitude dominates too many of them.
fn noise_screen(obs: &[f64], noise_level: f64, params: &ScoreParams) -> bool {
    if noise_level <= 0.0 || params.noise_subwindow == 0 {
        return false;
    }
    let mut contaminated = 0usize;
    let mut total = 0usize;
    for chunk in obs.chunks(params.noise_subwindow) {
        let peak = chunk.iter().fold(0.0f64, |m, x| m.max(x.abs()));
        if noise_level > params.max_noise * peak {
            contaminated += 1;
        }
        total += 1;
    }
    total > 0 && contaminated as f64 / total as f64 > params.max_noise_window
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::envelope;
    use approx::assert_relative_eq;

    fn quiet_noise() -> NoiseProfile {
        NoiseProfile {
            level: 0.01,
            power: 1e-4,
        }
    }

    fn default_params() -> ScoreParams {
        ScoreParams {
            max_lag: 40,
            noise_subwindow: 40,
            max_noise: 0.10,
            max_noise_window: 0.4,
        }
    }

    fn tone(n: usize, period: f64) -> Vec<f64> {
        (0..n)
            .map(|i| (2.0 * std::f64::consts::PI * i as f64 / period).sin())
            .collect()
    }

    #[test]
    fn identical_signals_score_perfectly() {
        let s = tone(400, 20.0);
        let env = envelope(&s);
        let candidate = CandidateWindow::new(50, 350);
        let scored = score_window(
            &candidate,
            &s,
            &s,
            &env,
            &env,
            &quiet_noise(),
            &default_params(),
        )
        .unwrap();
        assert_relative_eq!(scored.scores.cross_correlation, 1.0, epsilon = 1e-12);
        assert_eq!(scored.scores.lag_samples, 0);
        assert_relative_eq!(scored.scores.envelope_similarity, 1.0, epsilon = 1e-12);
        assert!(!scored.scores.noise_contaminated);
        // 300 samples of a 20-sample period hold ~15 maxima and ~15 minima.
        assert!(scored.scores.peaks_troughs >= 25);
    }

    #[test]
    fn lag_is_recovered_for_shifted_signals() {
        let n = 500;
        let obs: Vec<f64> = (0..n)
            .map(|i| (-((i as f64 - 262.0) / 15.0).powi(2)).exp())
            .collect();
        let syn: Vec<f64> = (0..n)
            .map(|i| (-((i as f64 - 250.0) / 15.0).powi(2)).exp())
            .collect();
        let env_obs = envelope(&obs);
        let env_syn = envelope(&syn);
        let candidate = CandidateWindow::new(180, 340);
        let scored = score_window(
            &candidate,
            &obs,
            &syn,
            &env_obs,
            &env_syn,
            &quiet_noise(),
            &default_params(),
        )
        .unwrap();
        assert_eq!(scored.scores.lag_samples, 12);
        assert!(scored.scores.cross_correlation > 0.95);
    }

    #[test]
    fn energy_ratio_relative_to_noise_power() {
        let s = tone(200, 25.0);
        let env = envelope(&s);
        let noise = NoiseProfile {
            level: 0.1,
            power: 0.05,
        };
        let candidate = CandidateWindow::new(0, 200);
        let scored = score_window(
            &candidate,
            &s,
            &s,
            &env,
            &env,
            &noise,
            &default_params(),
        )
        .unwrap();
        // A unit sine has mean power 0.5, so the ratio is about 10.
        assert_relative_eq!(scored.scores.energy_ratio, 10.0, max_relative = 0.05);
    }

    #[test]
    fn silent_noise_profile_disables_energy_ratio() {
        let s = tone(200, 25.0);
        let env = envelope(&s);
        let noise = NoiseProfile {
            level: 0.0,
            power: 0.0,
        };
        let scored = score_window(
            &CandidateWindow::new(0, 200),
            &s,
            &s,
            &env,
            &env,
            &noise,
            &default_params(),
        )
        .unwrap();
        assert_eq!(scored.scores.energy_ratio, 0.0);
        assert!(!scored.scores.noise_contaminated);
    }

    #[test]
    fn buried_signal_is_flagged_as_noisy() {
        // Window amplitude barely above the pre-event noise level.
        let s: Vec<f64> = tone(200, 25.0).iter().map(|x| x * 0.05).collect();
        let env = envelope(&s);
        let noise = NoiseProfile {
            level: 0.04,
            power: 8e-4,
        };
        let scored = score_window(
            &CandidateWindow::new(0, 200),
            &s,
            &s,
            &env,
            &env,
            &noise,
            &default_params(),
        )
        .unwrap();
        assert!(scored.scores.noise_contaminated);
    }

    #[test]
    fn malformed_window_is_an_error() {
        let s = tone(100, 10.0);
        let env = envelope(&s);
        let result = score_window(
            &CandidateWindow::new(50, 50),
            &s,
            &s,
            &env,
            &env,
            &quiet_noise(),
            &default_params(),
        );
        assert!(matches!(
            result,
            Err(WindowError::MalformedWindow { start: 50, end: 50 })
        ));
    }

    #[test]
    fn envelope_similarity_bounds() {
        assert_relative_eq!(envelope_similarity(&[1.0, 2.0], &[1.0, 2.0]), 1.0);
        let low = envelope_similarity(&[1.0, 0.0, 0.0, 0.0], &[0.0, 0.0, 0.0, 1.0]);
        assert!(low < 0.5);
        assert_eq!(envelope_similarity(&[0.0; 4], &[0.0; 4]), 0.0);
    }
}
