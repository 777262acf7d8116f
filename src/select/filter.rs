//! Threshold filtering and overlap resolution.

use crate::config::WindowConfig;
use crate::select::window::{AcceptedWindow, ScoredWindow};

/// Per-pair quantities the threshold tests need besides the configuration.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext {
    /// Sampling interval in seconds.
    pub dt: f64,
    /// Epicentral distance in kilometres.
    pub distance_km: f64,
    /// Minimum period of the band in seconds.
    pub minimum_period: f64,
    /// Maximum period of the band in seconds.
    pub maximum_period: f64,
}

/// Apply every threshold test and resolve overlaps.
///
/// A window is accepted only if all tests pass; failing a threshold is the
/// expected common case and is not reported. Overlaps among the survivors
/// are resolved by keeping the window with the higher cross-correlation
/// coefficient (ties to the earlier start). The returned list is sorted by
/// start time and pairwise non-overlapping.
pub fn filter_and_merge(
    scored: Vec<ScoredWindow>,
    ctx: &FilterContext,
    config: &WindowConfig,
) -> Vec<AcceptedWindow> {
    let mut survivors: Vec<ScoredWindow> = scored
        .into_iter()
        .filter(|w| passes_thresholds(w, ctx, config))
        .collect();

    // Highest correlation first; earlier start wins ties so the merge is
    // deterministic.
    survivors.sort_by(|a, b| {
        b.scores
            .cross_correlation
            .partial_cmp(&a.scores.cross_correlation)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.span.start.cmp(&b.span.start))
    });

    let mut kept: Vec<ScoredWindow> = Vec::new();
    for window in survivors {
        if kept.iter().all(|k| !k.span.overlaps(&window.span)) {
            kept.push(window);
        }
    }
    kept.sort_by_key(|w| w.span.start);

    kept.into_iter()
        .map(|w| AcceptedWindow {
            start_index: w.span.start,
            end_index: w.span.end,
            start_time: w.span.start as f64 * ctx.dt,
            end_time: w.span.end as f64 * ctx.dt,
            cross_correlation: w.scores.cross_correlation,
            lag_seconds: w.scores.lag_samples as f64 * ctx.dt,
        })
        .collect()
}

fn passes_thresholds(window: &ScoredWindow, ctx: &FilterContext, config: &WindowConfig) -> bool {
    let s = &window.scores;

    if s.cross_correlation < config.min_cc {
        return false;
    }
    let lag_seconds = (s.lag_samples as f64 * ctx.dt).abs();
    if lag_seconds > config.threshold_shift * ctx.minimum_period {
        return false;
    }
    if s.envelope_similarity < config.min_envelope_similarity {
        return false;
    }
    if s.energy_ratio > config.max_energy_ratio {
        return false;
    }
    if s.peaks_troughs < config.min_peaks_troughs {
        return false;
    }
    if s.noise_contaminated {
        return false;
    }
    let length_seconds = window.span.len() as f64 * ctx.dt;
    if length_seconds < config.min_length_period * ctx.maximum_period {
        return false;
    }
    // Apparent velocity implied by the window's end time: a window ending
    // later than the slowest plausible arrival is not a wave of interest.
    let end_time = window.span.end as f64 * ctx.dt;
    if end_time <= 0.0 {
        return false;
    }
    if ctx.distance_km / end_time < config.min_velocity {
        return false;
    }
    true
}
