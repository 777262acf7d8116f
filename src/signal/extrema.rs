//! Local extrema detection with plateau handling.

use serde::{Deserialize, Serialize};

/// Classification of a local extremum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtremumKind {
    Maximum,
    Minimum,
}

/// A classified extremum of a derived signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extremum {
    /// Sample index of the extremum (a plateau's midpoint).
    pub index: usize,
    /// Signal value at that index.
    pub value: f64,
    pub kind: ExtremumKind,
}

/// Find all local maxima and minima of a 1-D signal.
///
/// A sample is a maximum when it is greater than or equal to both neighbors
/// and strictly greater than at least one; minima are symmetric. Plateaus
/// (runs of equal consecutive values) collapse to a single extremum at the
/// plateau midpoint. Boundary samples are never classified, and plateaus
/// touching a boundary are discarded with them. The result is sorted by
/// index, and the maxima/minima it contains are disjoint.
///
/// Strictly monotonic and constant signals yield no extrema. The comparison
/// is exact; callers supply pre-smoothed or enveloped signals to the extent
/// needed to avoid float-noise extrema.
pub fn find_local_extrema(signal: &[f64]) -> Vec<Extremum> {
    let n = signal.len();
    if n < 3 {
        return Vec::new();
    }

    let mut extrema = Vec::new();
    let mut run_start = 0;
    while run_start < n {
        let value = signal[run_start];
        let mut run_end = run_start + 1;
        while run_end < n && signal[run_end] == value {
            run_end += 1;
        }
        // Interior runs only; a run touching either boundary has no second
        // neighbor to compare against.
        if run_start > 0 && run_end < n {
            let before = signal[run_start - 1];
            let after = signal[run_end];
            let index = (run_start + run_end - 1) / 2;
            if before < value && after < value {
                extrema.push(Extremum {
                    index,
                    value,
                    kind: ExtremumKind::Maximum,
                });
            } else if before > value && after > value {
                extrema.push(Extremum {
                    index,
                    value,
                    kind: ExtremumKind::Minimum,
                });
            }
        }
        run_start = run_end;
    }
    extrema
}

/// Indices of the local maxima of `signal`, ascending.
pub fn local_maxima(signal: &[f64]) -> Vec<usize> {
    find_local_extrema(signal)
        .into_iter()
        .filter(|e| e.kind == ExtremumKind::Maximum)
        .map(|e| e.index)
        .collect()
}

/// Indices of the local minima of `signal`, ascending.
pub fn local_minima(signal: &[f64]) -> Vec<usize> {
    find_local_extrema(signal)
        .into_iter()
        .filter(|e| e.kind == ExtremumKind::Minimum)
        .map(|e| e.index)
        .collect()
}
