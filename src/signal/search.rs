//! Nearest-value lookup in sorted sequences.

/// Return the index of the entry in `values` closest to `query`.
///
/// `values` must be sorted ascending. Ties prefer the lower index. Queries
/// below the first or above the last entry clamp to the boundary entry;
/// out-of-range queries are defined behavior, not an error. Returns `None`
/// only for an empty slice.
///
/// Used to map continuous time values (e.g. an expected arrival time) onto
/// the nearest discrete sample index.
pub fn find_closest(values: &[f64], query: f64) -> Option<usize> {
    if values.is_empty() {
        return None;
    }
    // First index whose value is >= query.
    let upper = values.partition_point(|&v| v < query);
    if upper == 0 {
        return Some(0);
    }
    if upper == values.len() {
        return Some(values.len() - 1);
    }
    let lower = upper - 1;
    // On an exact tie the lower index wins.
    if (query - values[lower]).abs() <= (values[upper] - query).abs() {
        Some(lower)
    } else {
        Some(upper)
    }
}
