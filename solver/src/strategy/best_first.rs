use log::trace;

use crate::frontier::PriorityFrontier;
use crate::grid::{CellStorage, Grid, Point};
use crate::special::handle_special_tile;
use crate::state::SearchState;

use super::{Failure, SearchStatus, Strategy};

/// Estimate of the remaining cost from a point to the goal
pub trait Heuristic: Send {
    /// Display name of the search using this heuristic
    const NAME: &'static str;

    fn estimate(&self, from: Point, goal: Point) -> usize;
}

/// Uniform-cost search, turns [`BestFirst`] into Dijkstra's algorithm
#[derive(Copy, Clone, Debug, Default)]
pub struct NoHeuristic;

impl Heuristic for NoHeuristic {
    const NAME: &'static str = "Dijkstra";

    fn estimate(&self, _from: Point, _goal: Point) -> usize {
        0
    }
}

/// Manhattan distance, turns [`BestFirst`] into A*
#[derive(Copy, Clone, Debug, Default)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    const NAME: &'static str = "A*";

    fn estimate(&self, from: Point, goal: Point) -> usize {
        from.manhattan(goal)
    }
}

pub type Dijkstra = BestFirst<NoHeuristic>;
pub type AStar = BestFirst<Manhattan>;

/// Best-first search ordered by `cost + estimate`.
///
/// The cost of a move is the number of steps it is charged, so penalty tiles
/// cost 3 to enter and everything else 1. When a cheaper route to a queued
/// cell is found, the cell is re-queued with its new cost and parent behind
/// any entries of equal priority.
#[derive(Debug)]
pub struct BestFirst<H: Heuristic> {
    heuristic: H,
    goal: Point,
    frontier: PriorityFrontier,
    /// Best known cost from the start for every discovered cell
    costs: CellStorage<Option<usize>>,
    state: SearchState,
    status: SearchStatus,
}

impl<H: Heuristic + Default> BestFirst<H> {
    pub fn new(grid: &Grid) -> Self {
        Self::with_heuristic(grid, H::default())
    }
}

impl<H: Heuristic> BestFirst<H> {
    pub fn with_heuristic(grid: &Grid, heuristic: H) -> Self {
        let start = grid.start();
        let goal = grid.end();

        let mut costs = grid.create_storage(None);
        *costs.get_mut(start) = Some(0);

        let mut frontier = PriorityFrontier::new();
        frontier.push(start, 0, heuristic.estimate(start, goal), false);

        Self {
            heuristic,
            goal,
            frontier,
            costs,
            state: SearchState::new(grid),
            status: SearchStatus::Computing,
        }
    }

    /// Record `cost` for `point` if it beats the best known one
    fn relax(&mut self, point: Point, from: Point, cost: usize) {
        let known = self.costs.get(point);
        if known.is_some_and(|c| cost >= c) {
            return;
        }

        *self.costs.get_mut(point) = Some(cost);
        *self.state.parents.get_mut(point) = Some(from);
        let priority = cost + self.heuristic.estimate(point, self.goal);
        self.frontier.push(point, cost, priority, known.is_some());
    }
}

impl<H: Heuristic> Strategy for BestFirst<H> {
    fn name(&self) -> &'static str {
        H::NAME
    }

    fn step(&mut self, grid: &Grid) -> SearchStatus {
        if self.status.is_done() {
            return self.status;
        }

        let costs = &self.costs;
        let Some((point, cost)) = self.frontier.pop(|p, c| costs.get(p) == Some(c)) else {
            self.status = SearchStatus::NoPathFound(Failure::Unreachable);
            return self.status;
        };

        trace!("{} expanding {} at cost {}", H::NAME, point, cost);
        self.state.expand(point);

        if point == self.goal {
            self.status = self.state.complete(grid, point);
            return self.status;
        }

        self.state.visit(point);

        if let Some(destination) = handle_special_tile(
            grid,
            point,
            &self.state.visited,
            &mut self.state.counters,
        ) {
            self.relax(destination, point, cost + grid.get(destination).entry_cost());
            return self.status;
        }

        let neighbors: Vec<Point> = grid.neighbors(point, &self.state.visited).collect();
        for neighbor in neighbors {
            self.relax(neighbor, point, cost + grid.get(neighbor).entry_cost());
        }

        self.status
    }

    fn state(&self) -> &SearchState {
        &self.state
    }

    fn frontier_len(&self) -> usize {
        self.frontier.len()
    }
}
