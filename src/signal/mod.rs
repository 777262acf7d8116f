//! Signal feature extraction primitives.
//!
//! Pure functions over `&[f64]` slices: valid-region extraction, nearest
//! value lookup, local extrema, analytic-signal envelopes, and normalized
//! cross-correlation. The selection pipeline composes these; they are also
//! usable on their own.

pub mod envelope;
pub mod extrema;
pub mod regions;
pub mod search;
pub mod xcorr;

pub use envelope::envelope;
pub use extrema::{find_local_extrema, local_maxima, local_minima, Extremum, ExtremumKind};
pub use regions::{valid_regions, Span};
pub use search::find_closest;
pub use xcorr::{cross_correlation_at, max_cross_correlation, zero_lag_correlation};
