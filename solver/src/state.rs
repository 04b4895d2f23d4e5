use serde::{Deserialize, Serialize};

use crate::grid::{CellStorage, Grid, Point};
use crate::path;
use crate::strategy::SearchStatus;

/// Step counters of a search.
///
/// The total is the sum of all fields: entering a penalty tile costs 3 (one
/// movement step plus two penalty steps), a teleport jump costs 1 and every
/// cell removed by dead-end filling costs 1.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepCounters {
    pub movement: usize,
    pub teleport: usize,
    pub penalty: usize,
    pub filled: usize,
}

impl StepCounters {
    pub fn total(&self) -> usize {
        self.movement + self.teleport + self.penalty + self.filled
    }
}

/// Mutable record of a single search run.
///
/// Owned by exactly one strategy; observers only ever see a [`Snapshot`].
#[derive(Clone, Debug)]
pub struct SearchState {
    pub visited: CellStorage<bool>,
    /// Best known predecessor of every discovered cell
    pub parents: CellStorage<Option<Point>>,
    pub path: Vec<Point>,
    /// Counters accumulated while exploring, replaced by the path tally
    /// when the search succeeds
    pub counters: StepCounters,
    pub expansions: usize,
    pub current: Option<Point>,
}

impl SearchState {
    pub fn new(grid: &Grid) -> Self {
        Self {
            visited: grid.create_storage(false),
            parents: grid.create_storage(None),
            path: Vec::new(),
            counters: StepCounters::default(),
            expansions: 0,
            current: None,
        }
    }

    pub fn is_visited(&self, node: Point) -> bool {
        self.visited.get(node)
    }

    pub fn visit(&mut self, node: Point) {
        *self.visited.get_mut(node) = true;
    }

    /// Record that a node is being expanded
    pub fn expand(&mut self, node: Point) {
        self.expansions += 1;
        self.current = Some(node);
    }

    /// Finalize a successful search that reached `goal` through the parent links
    pub fn complete(&mut self, grid: &Grid, goal: Point) -> SearchStatus {
        self.visit(goal);
        self.path = path::reconstruct(&self.parents, goal);
        self.counters = path::tally(grid, &self.path);
        SearchStatus::PathFound
    }

    pub fn snapshot(&self, frontier: usize) -> Snapshot {
        Snapshot {
            expansions: self.expansions,
            current: self.current,
            frontier,
            visited: self.visited.clone(),
            path: self.path.clone(),
            counters: self.counters,
        }
    }
}

/// Immutable copy of a [`SearchState`] taken at a checkpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub expansions: usize,
    pub current: Option<Point>,
    /// Number of nodes waiting in the frontier
    pub frontier: usize,
    pub visited: CellStorage<bool>,
    pub path: Vec<Point>,
    pub counters: StepCounters,
}
