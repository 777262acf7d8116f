//! Parallel fan-out of window selection over many station-event pairs.
//!
//! Each pair is an independent pure computation, so the batch layer simply
//! maps [`select_windows`](crate::select::select_windows) over a task list
//! with a rayon worker pool. A failing pair is recorded and reported; it
//! never aborts the rest of the batch.

use crate::config::{PeriodBand, WindowConfig};
use crate::core::{EventStationGeometry, Trace};
use crate::select::{select_windows, AcceptedWindow};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Identifier of one event-station-channel triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairId {
    pub event: String,
    pub station: String,
    pub channel: String,
}

impl PairId {
    pub fn new(
        event: impl Into<String>,
        station: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            event: event.into(),
            station: station.into(),
            channel: channel.into(),
        }
    }
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.event, self.station, self.channel)
    }
}

/// One unit of work: a trace pair with its geometry and band.
#[derive(Debug, Clone)]
pub struct SelectionTask {
    pub id: PairId,
    pub observed: Trace,
    pub synthetic: Trace,
    pub geometry: EventStationGeometry,
    pub band: PeriodBand,
}

/// Result of one task: either the (possibly empty) window list or the
/// error message that failed the pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PairOutcome {
    Windows(Vec<AcceptedWindow>),
    Failed(String),
}

/// Outcome of one task, keyed by its pair identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairResult {
    pub id: PairId,
    pub outcome: PairOutcome,
}

/// Collected outcomes of a whole batch, in task order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub results: Vec<PairResult>,
}

impl BatchReport {
    /// Number of pairs that completed, including those with no windows.
    pub fn succeeded(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, PairOutcome::Windows(_)))
            .count()
    }

    /// Number of pairs that failed.
    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    /// Total accepted windows across all pairs.
    pub fn total_windows(&self) -> usize {
        self.results
            .iter()
            .filter_map(|r| match &r.outcome {
                PairOutcome::Windows(w) => Some(w.len()),
                PairOutcome::Failed(_) => None,
            })
            .sum()
    }

    /// Failed pairs with their error messages, for the batch summary.
    pub fn failures(&self) -> impl Iterator<Item = (&PairId, &str)> {
        self.results.iter().filter_map(|r| match &r.outcome {
            PairOutcome::Failed(message) => Some((&r.id, message.as_str())),
            PairOutcome::Windows(_) => None,
        })
    }
}

/// Run window selection for every task on a rayon worker pool.
///
/// The configuration is shared read-only across all workers. Results come
/// back in task order, so a batch is as deterministic as its tasks.
pub fn run_batch(tasks: &[SelectionTask], config: &WindowConfig) -> BatchReport {
    let results: Vec<PairResult> = tasks
        .par_iter()
        .map(|task| {
            let outcome = match select_windows(
                &task.observed,
                &task.synthetic,
                &task.geometry,
                &task.band,
                config,
            ) {
                Ok(windows) => PairOutcome::Windows(windows),
                Err(err) => PairOutcome::Failed(err.to_string()),
            };
            PairResult {
                id: task.id.clone(),
                outcome,
            }
        })
        .collect();
    debug!(
        pairs = results.len(),
        failed = results
            .iter()
            .filter(|r| matches!(r.outcome, PairOutcome::Failed(_)))
            .count(),
        "batch complete"
    );
    BatchReport { results }
}
