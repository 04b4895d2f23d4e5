use log::{debug, info};

use crate::grid::{Cell, CellStorage, Grid, Point};
use crate::state::SearchState;

use super::{BreadthFirst, SearchStatus, Strategy};

#[derive(Debug)]
enum Phase {
    /// Scanning the grid row by row for dead ends; `cursor` is the row-major
    /// index of the next cell to look at
    Filling { cursor: usize, changed: bool },
    /// Dead ends are gone, breadth-first search on the pruned copy
    Searching { grid: Grid, search: BreadthFirst },
}

/// Dead-end filling followed by breadth-first search.
///
/// Open and penalty cells with a single passable neighbor are walled off,
/// pass after pass, until a full pass changes nothing. The pruned copy of the
/// grid is then searched with [`BreadthFirst`]. Every filled cell adds one
/// step to the reported total.
#[derive(Debug)]
pub struct DeadEndFilling {
    filled: CellStorage<bool>,
    filled_count: usize,
    phase: Phase,
    // state shown while filling, the search's own state afterwards
    state: SearchState,
    status: SearchStatus,
}

impl DeadEndFilling {
    pub fn new(grid: &Grid) -> Self {
        Self {
            filled: grid.create_storage(false),
            filled_count: 0,
            phase: Phase::Filling {
                cursor: 0,
                changed: false,
            },
            state: SearchState::new(grid),
            status: SearchStatus::Computing,
        }
    }

    /// Number of cells walled off so far
    pub fn filled(&self) -> usize {
        self.filled_count
    }

    fn is_dead_end(&self, grid: &Grid, node: Point) -> bool {
        matches!(grid.get(node), Cell::Open | Cell::Penalty)
            && !self.filled.get(node)
            && grid.open_neighbors(node, &self.filled) == 1
    }

    /// Fill the next dead end, or move on to searching once a full pass has
    /// not found any
    fn fill_step(&mut self, grid: &Grid, mut cursor: usize, mut changed: bool) -> Phase {
        let total = grid.rows() * grid.columns();

        loop {
            if cursor == total {
                if !changed {
                    break;
                }
                cursor = 0;
                changed = false;
                continue;
            }

            let node = Point::new(cursor / grid.columns(), cursor % grid.columns());
            cursor += 1;

            if self.is_dead_end(grid, node) {
                debug!("filling dead end {}", node);
                *self.filled.get_mut(node) = true;
                self.filled_count += 1;
                self.state.expand(node);
                self.state.visit(node);
                self.state.counters.filled = self.filled_count;
                return Phase::Filling {
                    cursor,
                    changed: true,
                };
            }
        }

        info!("filled {} dead-end cells", self.filled_count);
        let filled = &self.filled;
        let pruned = grid.with_walls(
            (0..grid.rows())
                .flat_map(|row| (0..grid.columns()).map(move |col| Point::new(row, col)))
                .filter(|p| filled.get(*p)),
        );
        let search = BreadthFirst::new(&pruned);

        Phase::Searching {
            grid: pruned,
            search,
        }
    }
}

impl Strategy for DeadEndFilling {
    fn name(&self) -> &'static str {
        "DeadEnd"
    }

    fn step(&mut self, grid: &Grid) -> SearchStatus {
        if self.status.is_done() {
            return self.status;
        }

        if let Phase::Filling { cursor, changed } = self.phase {
            self.phase = self.fill_step(grid, cursor, changed);
            if matches!(self.phase, Phase::Filling { .. }) {
                return self.status;
            }
        }

        if let Phase::Searching { grid, search } = &mut self.phase {
            self.status = search.step(grid);
            if self.status == SearchStatus::PathFound {
                search.state_mut().counters.filled = self.filled_count;
            }
        }

        self.status
    }

    fn state(&self) -> &SearchState {
        match &self.phase {
            Phase::Filling { .. } => &self.state,
            Phase::Searching { search, .. } => search.state(),
        }
    }

    fn frontier_len(&self) -> usize {
        match &self.phase {
            Phase::Filling { .. } => 0,
            Phase::Searching { search, .. } => search.frontier_len(),
        }
    }
}
