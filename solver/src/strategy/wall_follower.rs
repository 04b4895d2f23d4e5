use log::{trace, warn};
use serde::{Deserialize, Serialize};

use crate::grid::{Direction, Grid, Point};
use crate::path;
use crate::special::handle_special_tile;
use crate::state::SearchState;

use super::{Failure, SearchStatus, Strategy};

/// Which hand is kept on the wall
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    /// Initial facing direction
    fn facing(self) -> Direction {
        match self {
            Hand::Left => Direction::Up,
            Hand::Right => Direction::Down,
        }
    }

    /// Directions to try from `facing`: towards the hand, straight ahead,
    /// away from the hand and finally back
    fn candidates(self, facing: Direction) -> [Direction; 4] {
        match self {
            Hand::Left => [
                facing.turn_left(),
                facing,
                facing.turn_right(),
                facing.reverse(),
            ],
            Hand::Right => [
                facing.turn_right(),
                facing,
                facing.turn_left(),
                facing.reverse(),
            ],
        }
    }
}

/// Walks the maze keeping one hand on the wall.
///
/// There is no frontier and no backtracking: every step moves to an
/// unvisited cell or takes a teleport. When no candidate direction is open
/// the walker is stuck and the search fails, even if the goal is reachable.
#[derive(Debug)]
pub struct WallFollower {
    hand: Hand,
    facing: Direction,
    position: Point,
    goal: Point,
    moves: usize,
    limit: usize,
    state: SearchState,
    status: SearchStatus,
}

impl WallFollower {
    pub fn new(grid: &Grid, hand: Hand) -> Self {
        let mut state = SearchState::new(grid);
        state.visit(grid.start());
        state.path.push(grid.start());

        Self {
            hand,
            facing: hand.facing(),
            position: grid.start(),
            goal: grid.end(),
            moves: 0,
            limit: 2 * grid.rows() * grid.columns(),
            state,
            status: SearchStatus::Computing,
        }
    }

    /// Fail after this many moves instead of the default `2 * rows * columns`
    pub fn with_step_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    fn next_position(&mut self, grid: &Grid) -> Option<Point> {
        if let Some(destination) = handle_special_tile(
            grid,
            self.position,
            &self.state.visited,
            &mut self.state.counters,
        ) {
            return Some(destination);
        }

        for direction in self.hand.candidates(self.facing) {
            if let Some(next) = grid.step(self.position, direction) {
                if grid.is_valid_move(next, &self.state.visited) {
                    self.facing = direction;
                    return Some(next);
                }
            }
        }

        None
    }
}

impl Strategy for WallFollower {
    fn name(&self) -> &'static str {
        match self.hand {
            Hand::Left => "LeftHand",
            Hand::Right => "RightHand",
        }
    }

    fn step(&mut self, grid: &Grid) -> SearchStatus {
        if self.status.is_done() {
            return self.status;
        }

        self.state.expand(self.position);

        if self.position == self.goal {
            self.state.counters = path::tally(grid, &self.state.path);
            self.status = SearchStatus::PathFound;
            return self.status;
        }

        if self.moves >= self.limit {
            warn!("{} gave up after {} moves", self.name(), self.moves);
            self.status = SearchStatus::NoPathFound(Failure::StepLimit);
            return self.status;
        }

        let Some(next) = self.next_position(grid) else {
            warn!("{} is stuck at {}", self.name(), self.position);
            self.status = SearchStatus::NoPathFound(Failure::Stuck);
            return self.status;
        };

        trace!("{} {} -> {} facing {}", self.name(), self.position, next, self.facing);
        self.position = next;
        self.moves += 1;
        self.state.visit(next);
        self.state.path.push(next);

        self.status
    }

    fn state(&self) -> &SearchState {
        &self.state
    }

    fn frontier_len(&self) -> usize {
        0
    }
}
