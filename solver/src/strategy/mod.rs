use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::state::{SearchState, Snapshot};

mod best_first;
mod breadth_first;
mod dead_end;
mod depth_first;
mod wall_follower;

pub use best_first::{AStar, BestFirst, Dijkstra, Heuristic, Manhattan, NoHeuristic};
pub use breadth_first::BreadthFirst;
pub use dead_end::DeadEndFilling;
pub use depth_first::DepthFirst;
pub use wall_follower::{Hand, WallFollower};

/// Why a search ended without a path
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Failure {
    /// The frontier ran dry, the goal cannot be reached
    Unreachable,
    /// A wall follower has no unvisited cell to move to
    Stuck,
    /// A wall follower exceeded its step bound
    StepLimit,
    /// The search was cancelled through its step controller
    Cancelled,
}

impl Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Failure::Unreachable => "no path exists",
                Failure::Stuck => "stuck",
                Failure::StepLimit => "step limit exceeded",
                Failure::Cancelled => "cancelled",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Computing,
    NoPathFound(Failure),
    PathFound,
}

impl SearchStatus {
    pub fn is_done(&self) -> bool {
        !matches!(self, SearchStatus::Computing)
    }
}

/// A search algorithm that advances one node expansion per call to
/// [`Strategy::step`].
///
/// Every strategy is created fresh for a single run and owns its
/// [`SearchState`]. Once a step returns a final status, the path, visited
/// cells and step counters in [`Strategy::state`] are complete and further
/// calls keep returning that status.
pub trait Strategy: Send {
    /// Display name of the algorithm
    fn name(&self) -> &'static str;

    /// Expand a single node
    fn step(&mut self, grid: &Grid) -> SearchStatus;

    fn state(&self) -> &SearchState;

    /// Number of discovered nodes not expanded yet
    fn frontier_len(&self) -> usize;

    fn snapshot(&self) -> Snapshot {
        self.state().snapshot(self.frontier_len())
    }

    /// Step until the search is done
    fn finish(&mut self, grid: &Grid) -> SearchStatus {
        loop {
            match self.step(grid) {
                SearchStatus::Computing => {}
                s => return s,
            }
        }
    }
}

/// The closed set of available strategies
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    DepthFirst,
    BreadthFirst,
    AStar,
    Dijkstra,
    WallFollower(Hand),
    DeadEndFilling,
}

impl StrategyKind {
    /// Every strategy, in the order comparisons report them
    pub const ALL: [StrategyKind; 7] = [
        StrategyKind::DepthFirst,
        StrategyKind::BreadthFirst,
        StrategyKind::AStar,
        StrategyKind::Dijkstra,
        StrategyKind::WallFollower(Hand::Left),
        StrategyKind::WallFollower(Hand::Right),
        StrategyKind::DeadEndFilling,
    ];

    /// Create a fresh strategy ready to search `grid`
    pub fn build(self, grid: &Grid) -> Box<dyn Strategy> {
        match self {
            StrategyKind::DepthFirst => Box::new(DepthFirst::new(grid)),
            StrategyKind::BreadthFirst => Box::new(BreadthFirst::new(grid)),
            StrategyKind::AStar => Box::new(AStar::new(grid)),
            StrategyKind::Dijkstra => Box::new(Dijkstra::new(grid)),
            StrategyKind::WallFollower(hand) => Box::new(WallFollower::new(grid, hand)),
            StrategyKind::DeadEndFilling => Box::new(DeadEndFilling::new(grid)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::DepthFirst => "DFS",
            StrategyKind::BreadthFirst => "BFS",
            StrategyKind::AStar => "A*",
            StrategyKind::Dijkstra => "Dijkstra",
            StrategyKind::WallFollower(Hand::Left) => "LeftHand",
            StrategyKind::WallFollower(Hand::Right) => "RightHand",
            StrategyKind::DeadEndFilling => "DeadEnd",
        }
    }
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dfs" => Ok(StrategyKind::DepthFirst),
            "bfs" => Ok(StrategyKind::BreadthFirst),
            "astar" | "a*" => Ok(StrategyKind::AStar),
            "dijkstra" => Ok(StrategyKind::Dijkstra),
            "left-hand" | "lefthand" => Ok(StrategyKind::WallFollower(Hand::Left)),
            "right-hand" | "righthand" => Ok(StrategyKind::WallFollower(Hand::Right)),
            "dead-end" | "deadend" => Ok(StrategyKind::DeadEndFilling),
            _ => Err(anyhow::anyhow!("Invalid strategy: {}", s)),
        }
    }
}
