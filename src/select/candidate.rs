//! Candidate window generation from envelope troughs.
//!
//! Window boundaries follow the minima of the synthetic envelope: a trough
//! separates two oscillation packets, so consecutive troughs bracket one
//! coherent phase. Candidates start as one trough-to-trough interval and
//! grow greedily over following intervals while the observed/synthetic
//! agreement holds.

use crate::select::window::CandidateWindow;
use crate::signal::{local_minima, zero_lag_correlation, Span};

/// Bounds and knobs for candidate generation, all in samples.
#[derive(Debug, Clone, Copy)]
pub struct CandidateParams {
    /// Minimum raw candidate length.
    pub min_length: usize,
    /// Maximum length a candidate may grow to.
    pub max_length: usize,
    /// Correlation bound sustaining growth (`threshold_correlation`).
    pub growth_correlation: f64,
}

/// Propose candidate windows inside the valid regions and the admissible
/// time domain.
///
/// For each valid span intersected with `domain`, boundaries are the span
/// edges plus the synthetic-envelope troughs inside it. Every boundary
/// starts one candidate covering the interval to the next boundary, then
/// the candidate extends across following boundaries while the zero-lag
/// correlation of the extended window stays at or above
/// `growth_correlation`, the extension stays inside the span, and the
/// length stays within `max_length`. Growth stops at the first failing
/// extension; the stopping predicate makes the search linear in the number
/// of boundaries.
///
/// Candidates shorter than `min_length` are dropped. The output may contain
/// overlapping candidates; the filter stage resolves overlaps.
pub fn generate_candidates(
    observed: &[f64],
    synthetic: &[f64],
    synthetic_envelope: &[f64],
    valid_spans: &[Span],
    domain: Span,
    params: &CandidateParams,
) -> Vec<CandidateWindow> {
    let troughs = local_minima(synthetic_envelope);
    let mut candidates = Vec::new();

    for span in valid_spans {
        let Some(segment) = span.intersect(&domain) else {
            continue;
        };
        if segment.len() < 2 {
            continue;
        }

        // Boundaries: segment edges plus interior troughs.
        let mut boundaries = vec![segment.start];
        boundaries.extend(
            troughs
                .iter()
                .copied()
                .filter(|&i| i > segment.start && i + 1 < segment.end),
        );
        boundaries.push(segment.end);

        for i in 0..boundaries.len() - 1 {
            let start = boundaries[i];
            let mut end = boundaries[i + 1];

            // Greedy growth across subsequent trough intervals.
            for &next in &boundaries[i + 2..] {
                if next - start > params.max_length {
                    break;
                }
                let cc = zero_lag_correlation(&observed[start..next], &synthetic[start..next]);
                if cc < params.growth_correlation {
                    break;
                }
                end = next;
            }

            if end - start >= params.min_length {
                candidates.push(CandidateWindow::new(start, end));
            }
        }
    }

    candidates
}
