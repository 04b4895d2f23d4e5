use log::trace;

use crate::grid::{Grid, Point};
use crate::special::handle_special_tile;
use crate::state::SearchState;

use super::{Failure, SearchStatus, Strategy};

/// Depth-first search with an explicit stack.
///
/// Neighbors are pushed in the grid's fixed order and therefore popped in
/// reverse. A cell is marked visited when it is expanded and never expanded
/// twice.
#[derive(Debug)]
pub struct DepthFirst {
    goal: Point,
    // (point, the node it was pushed from)
    stack: Vec<(Point, Option<Point>)>,
    state: SearchState,
    status: SearchStatus,
}

impl DepthFirst {
    pub fn new(grid: &Grid) -> Self {
        Self {
            goal: grid.end(),
            stack: vec![(grid.start(), None)],
            state: SearchState::new(grid),
            status: SearchStatus::Computing,
        }
    }
}

impl Strategy for DepthFirst {
    fn name(&self) -> &'static str {
        "DFS"
    }

    fn step(&mut self, grid: &Grid) -> SearchStatus {
        if self.status.is_done() {
            return self.status;
        }

        // skip entries for cells that were expanded after being pushed
        let (point, from) = loop {
            match self.stack.pop() {
                Some((point, _)) if point != self.goal && self.state.is_visited(point) => {}
                Some(entry) => break entry,
                None => {
                    self.status = SearchStatus::NoPathFound(Failure::Unreachable);
                    return self.status;
                }
            }
        };

        trace!("DFS expanding {}", point);
        self.state.expand(point);
        *self.state.parents.get_mut(point) = from;

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
            self.stack.push((destination, Some(point)));
            return self.status;
        }

        for neighbor in grid.neighbors(point, &self.state.visited) {
            self.stack.push((neighbor, Some(point)));
        }

        self.status
    }

    fn state(&self) -> &SearchState {
        &self.state
    }

    fn frontier_len(&self) -> usize {
        self.stack.len()
    }
}
