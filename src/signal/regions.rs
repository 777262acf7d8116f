//! Valid-region extraction from per-sample validity masks.

use serde::{Deserialize, Serialize};

/// A half-open sample-index interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of samples covered.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Intersection with another span; `None` when they do not overlap.
    pub fn intersect(&self, other: &Span) -> Option<Span> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(Span::new(start, end))
    }

    /// Whether two spans share at least one sample.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `index` falls inside the span.
    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.end).contains(&index)
    }
}

/// Extract the maximal contiguous runs of `true` flags.
///
/// Returns spans in ascending order, non-overlapping, covering exactly the
/// valid samples. An all-invalid (or empty) mask yields an empty vector; an
/// all-valid mask yields the single span `[0, N)`. Runs in one linear pass.
pub fn valid_regions(validity: &[bool]) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut run_start = None;

    for (i, &flag) in validity.iter().enumerate() {
        match (flag, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                spans.push(Span::new(start, i));
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        spans.push(Span::new(start, validity.len()));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_valid_yields_single_span() {
        assert_eq!(valid_regions(&[true; 5]), vec![Span::new(0, 5)]);
    }

    #[test]
    fn all_invalid_yields_nothing() {
        assert!(valid_regions(&[false; 5]).is_empty());
        assert!(valid_regions(&[]).is_empty());
    }

    #[test]
    fn interior_gap_splits_regions() {
        let mask = [true, true, false, false, true, true, true];
        assert_eq!(
            valid_regions(&mask),
            vec![Span::new(0, 2), Span::new(4, 7)]
        );
    }

    #[test]
    fn leading_and_trailing_gaps() {
        let mask = [false, true, true, false];
        assert_eq!(valid_regions(&mask), vec![Span::new(1, 3)]);
    }

    #[test]
    fn single_sample_runs() {
        let mask = [true, false, true, false, true];
        assert_eq!(
            valid_regions(&mask),
            vec![Span::new(0, 1), Span::new(2, 3), Span::new(4, 5)]
        );
    }

    #[test]
    fn spans_are_well_formed() {
        let mask = [false, true, false, true, true, false, false, true];
        let spans = valid_regions(&mask);
        for pair in spans.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
        for span in &spans {
            assert!(span.start < span.end);
        }
    }

    #[test]
    fn span_intersection() {
        let a = Span::new(2, 8);
        assert_eq!(a.intersect(&Span::new(4, 10)), Some(Span::new(4, 8)));
        assert_eq!(a.intersect(&Span::new(8, 10)), None);
        assert!(a.overlaps(&Span::new(7, 9)));
        assert!(!a.overlaps(&Span::new(8, 9)));
    }
}
