use std::collections::VecDeque;

use log::trace;

use crate::grid::{Grid, Point};
use crate::special::handle_special_tile;
use crate::state::SearchState;

use super::{Failure, SearchStatus, Strategy};

/// Breadth-first search.
///
/// Cells are marked visited when they are queued, so no cell is ever queued
/// twice and the first route found to the goal has the fewest moves.
#[derive(Debug)]
pub struct BreadthFirst {
    goal: Point,
    queue: VecDeque<Point>,
    state: SearchState,
    status: SearchStatus,
}

impl BreadthFirst {
    pub fn new(grid: &Grid) -> Self {
        let mut state = SearchState::new(grid);
        state.visit(grid.start());

        Self {
            goal: grid.end(),
            queue: VecDeque::from([grid.start()]),
            state,
            status: SearchStatus::Computing,
        }
    }

    pub(crate) fn state_mut(&mut self) -> &mut SearchState {
        &mut self.state
    }

    fn enqueue(&mut self, point: Point, from: Point) {
        self.state.visit(point);
        *self.state.parents.get_mut(point) = Some(from);
        self.queue.push_back(point);
    }
}

impl Strategy for BreadthFirst {
    fn name(&self) -> &'static str {
        "BFS"
    }

    fn step(&mut self, grid: &Grid) -> SearchStatus {
        if self.status.is_done() {
            return self.status;
        }

        let Some(point) = self.queue.pop_front() else {
            self.status = SearchStatus::NoPathFound(Failure::Unreachable);
            return self.status;
        };

        trace!("BFS expanding {}", point);
        self.state.expand(point);

        if point == self.goal {
            self.status = self.state.complete(grid, point);
            return self.status;
        }

        if let Some(destination) = handle_special_tile(
            grid,
            point,
            &self.state.visited,
            &mut self.state.counters,
        ) {
            self.enqueue(destination, point);
            return self.status;
        }

        let neighbors: Vec<Point> = grid.neighbors(point, &self.state.visited).collect();
        for neighbor in neighbors {
            self.enqueue(neighbor, point);
        }

        self.status
    }

    fn state(&self) -> &SearchState {
        &self.state
    }

    fn frontier_len(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_visitation_order() {
        let grid: Grid = "S  \n   \n  E".parse().unwrap();
        let mut bfs = BreadthFirst::new(&grid);

        let mut order = Vec::new();
        while !bfs.step(&grid).is_done() {
            order.extend(bfs.state().current);
        }
        order.extend(bfs.state().current);

        assert_eq!(
            order,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(1, 0),
                Point::new(0, 2),
                Point::new(1, 1),
                Point::new(2, 0),
                Point::new(1, 2),
                Point::new(2, 1),
                Point::new(2, 2)
            ]
        );
        assert_eq!(
            bfs.state().path,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(0, 2),
                Point::new(1, 2),
                Point::new(2, 2)
            ]
        );
    }

    #[test]
    fn test_shortest_route() {
        let grid: Grid = "S..#E\n.....\n#....".parse().unwrap();
        let mut bfs = BreadthFirst::new(&grid);

        assert_eq!(bfs.finish(&grid), SearchStatus::PathFound);
        // around the wall through the middle row
        assert_eq!(bfs.state().path.len(), 7);
        assert_eq!(bfs.state().counters.total(), 6);
    }

    #[test]
    fn test_enclosed_goal() {
        // well formed, but the end is boxed in by walls and the border
        let grid: Grid = "S..#E\n....#\n#....".parse().unwrap();
        let mut bfs = BreadthFirst::new(&grid);

        assert_eq!(
            bfs.finish(&grid),
            SearchStatus::NoPathFound(Failure::Unreachable)
        );
        assert_eq!(bfs.state().visited.count(), 11);
    }

    #[test]
    fn test_no_path() {
        let grid: Grid = "S#E".parse().unwrap();
        let mut bfs = BreadthFirst::new(&grid);

        assert_eq!(
            bfs.finish(&grid),
            SearchStatus::NoPathFound(Failure::Unreachable)
        );
        assert!(bfs.state().path.is_empty());
    }

    #[test]
    fn test_teleport_skips_neighbors() {
        // T1 is next to the start, T2 sits in a far pocket next to the end
        let grid: Grid = "ST   \n#####\n  #TE".parse().unwrap();
        let mut bfs = BreadthFirst::new(&grid);

        assert_eq!(bfs.finish(&grid), SearchStatus::PathFound);
        assert_eq!(
            bfs.state().path,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(2, 3),
                Point::new(2, 4)
            ]
        );
        // the open cells to the right of T1 were never discovered
        assert!(!bfs.state().visited.get(Point::new(0, 2)));
        assert_eq!(bfs.state().counters.teleport, 1);
    }

    #[test]
    fn test_penalty_cost() {
        let grid: Grid = "SPE".parse().unwrap();
        let mut bfs = BreadthFirst::new(&grid);

        assert_eq!(bfs.finish(&grid), SearchStatus::PathFound);
        assert_eq!(bfs.state().counters.movement, 2);
        assert_eq!(bfs.state().counters.penalty, 2);
        // 3 for entering the penalty tile, 1 for the end
        assert_eq!(bfs.state().counters.total(), 4);
    }
}
