//! # seiswin
//!
//! Comparison-window selection between observed and synthetic seismic
//! waveforms for full-waveform tomography.
//!
//! Given a pair of aligned traces, the event-station geometry, a period
//! band, and a threshold configuration, [`select_windows`] returns the
//! disjoint time windows in which the two waveforms agree well enough for
//! misfit and adjoint-source computation. The pipeline is a pure function
//! of its inputs: deterministic, side-effect free, and safe to run
//! concurrently across any number of pairs ([`batch::run_batch`] does
//! exactly that on a rayon worker pool).
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use seiswin::prelude::*;
//!
//! let t0 = Utc.with_ymd_and_hms(2012, 6, 1, 0, 0, 0).unwrap();
//! let wave: Vec<f64> = (0..1000)
//!     .map(|i| {
//!         let t = i as f64 * 0.5;
//!         ((t - 130.0) / 40.0).clamp(0.0, 1.0)
//!             * (2.0 * std::f64::consts::PI * t / 20.0).sin()
//!     })
//!     .collect();
//! let observed = Trace::fully_valid("obs", t0, 0.5, wave.clone()).unwrap();
//! let synthetic = Trace::fully_valid("syn", t0, 0.5, wave).unwrap();
//! let geometry = EventStationGeometry::new(0.0, 0.0, 10.0, 0.0, 8.9932);
//! let band = PeriodBand::new(15.0, 30.0).unwrap();
//! let config = WindowConfig::default().min_velocity(1.0);
//!
//! let windows = select_windows(&observed, &synthetic, &geometry, &band, &config).unwrap();
//! assert!(!windows.is_empty());
//! ```

pub mod batch;
pub mod config;
pub mod core;
pub mod error;
pub mod select;
pub mod signal;

pub use config::{PeriodBand, WindowConfig};
pub use core::{EventStationGeometry, Trace};
pub use error::{Result, WindowError};
pub use select::{select_windows, AcceptedWindow};

pub mod prelude {
    pub use crate::batch::{run_batch, BatchReport, PairId, PairOutcome, SelectionTask};
    pub use crate::config::{PeriodBand, WindowConfig};
    pub use crate::core::{EventStationGeometry, Trace};
    pub use crate::error::{Result, WindowError};
    pub use crate::select::{select_windows, AcceptedWindow};
}
