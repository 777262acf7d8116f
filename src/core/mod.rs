//! Core data structures for waveform comparison.

mod geometry;
mod trace;

pub use geometry::EventStationGeometry;
pub use trace::Trace;
