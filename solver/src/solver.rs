use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::control::{Checkpoint, StepController};
use crate::grid::{CellStorage, Grid, Point};
use crate::state::{Snapshot, StepCounters};
use crate::strategy::{Failure, SearchStatus, StrategyKind};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    PathFound,
    NoPathFound(Failure),
}

/// Everything a finished run produced
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub strategy: String,
    pub outcome: Outcome,
    /// Start to end inclusive, empty when no path was found
    pub path: Vec<Point>,
    pub visited: CellStorage<bool>,
    pub steps: StepCounters,
    pub expansions: usize,
    pub elapsed: Duration,
}

impl SearchResult {
    pub fn success(&self) -> bool {
        self.outcome == Outcome::PathFound
    }

    pub fn total_steps(&self) -> usize {
        self.steps.total()
    }
}

/// Runs one strategy against a grid.
///
/// Every call to [`Solver::solve`] starts from a fresh search, so repeated
/// calls on the same grid give identical paths and step counts. With
/// `visualize` set, each expansion is followed by a checkpoint: the snapshot
/// is sent to the observer, if any, and the step controller, if any, gets to
/// pause or cancel the search.
pub struct Solver<'g> {
    grid: &'g Grid,
    kind: StrategyKind,
    controller: Option<Arc<StepController>>,
    observer: Option<Sender<Snapshot>>,
    result: Option<SearchResult>,
}

impl<'g> Solver<'g> {
    pub fn new(grid: &'g Grid, kind: StrategyKind) -> Self {
        Self {
            grid,
            kind,
            controller: None,
            observer: None,
            result: None,
        }
    }

    pub fn with_controller(mut self, controller: Arc<StepController>) -> Self {
        self.controller = Some(controller);
        self
    }

    pub fn with_observer(mut self, observer: Sender<Snapshot>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Run the search to completion. Returns the elapsed time, or `None` when
    /// no path was found.
    pub fn solve(&mut self, visualize: bool) -> Option<Duration> {
        let result = self.run(visualize);
        let elapsed = result.success().then_some(result.elapsed);
        self.result = Some(result);
        elapsed
    }

    /// Run the search to completion and return its result without keeping it
    pub fn run(&self, visualize: bool) -> SearchResult {
        let begin = Instant::now();
        let mut strategy = self.kind.build(self.grid);
        debug!("{} starting", strategy.name());

        let status = loop {
            match strategy.step(self.grid) {
                SearchStatus::Computing => {}
                s => break s,
            }

            if !visualize {
                continue;
            }

            if let Some(observer) = &self.observer {
                if observer.send(strategy.snapshot()).is_err() {
                    trace!("observer hung up");
                }
            }

            if let Some(controller) = &self.controller {
                if controller.checkpoint() == Checkpoint::Cancelled {
                    break SearchStatus::NoPathFound(Failure::Cancelled);
                }
            }
        };

        let elapsed = begin.elapsed();
        let state = strategy.state();
        let outcome = match status {
            SearchStatus::NoPathFound(failure) => Outcome::NoPathFound(failure),
            _ => Outcome::PathFound,
        };

        let result = SearchResult {
            strategy: strategy.name().to_string(),
            outcome,
            path: match outcome {
                Outcome::PathFound => state.path.clone(),
                Outcome::NoPathFound(_) => Vec::new(),
            },
            visited: state.visited.clone(),
            steps: state.counters,
            expansions: state.expansions,
            elapsed,
        };

        debug!(
            "{} finished: {:?}, {} steps, {} cells visited in {:?}",
            result.strategy,
            result.outcome,
            result.total_steps(),
            result.visited.count(),
            result.elapsed
        );

        if visualize {
            if let Some(observer) = &self.observer {
                if observer.send(strategy.snapshot()).is_err() {
                    trace!("observer hung up");
                }
            }
        }

        result
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Result of the last [`Solver::solve`] call
    pub fn result(&self) -> Option<&SearchResult> {
        self.result.as_ref()
    }

    /// Path of the last run, empty if it failed or nothing ran yet
    pub fn path(&self) -> &[Point] {
        self.result.as_ref().map_or(&[], |r| r.path.as_slice())
    }

    pub fn visited(&self) -> Option<&CellStorage<bool>> {
        self.result.as_ref().map(|r| &r.visited)
    }

    /// Total step count of the last run
    pub fn steps(&self) -> usize {
        self.result.as_ref().map_or(0, |r| r.total_steps())
    }
}
