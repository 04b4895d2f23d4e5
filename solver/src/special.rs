use log::trace;

use crate::grid::{Cell, CellStorage, Grid, Point, PENALTY_STEPS};
use crate::state::StepCounters;

/// Apply the effects of the special tile at `node`, called once per expansion
/// before any neighbors are looked at.
///
/// Returns the teleport destination when `node` is a teleport tile, the grid
/// has at least two of them and the destination has not been visited yet.
/// The caller must then treat the destination as the only successor of
/// `node`. Penalty accrual happens regardless of the teleport outcome.
pub fn handle_special_tile(
    grid: &Grid,
    node: Point,
    visited: &CellStorage<bool>,
    counters: &mut StepCounters,
) -> Option<Point> {
    let teleport = grid
        .teleport_destination(node)
        .filter(|destination| !visited.get(*destination));

    if let Some(destination) = teleport {
        trace!("teleport {} -> {}", node, destination);
        counters.teleport += 1;
    }

    if grid.get(node) == Cell::Penalty {
        counters.penalty += PENALTY_STEPS;
        counters.movement += 1;
    }

    teleport
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_teleport() {
        let grid: Grid = "ST \n   \n TE".parse().unwrap();
        let visited = grid.create_storage(false);
        let mut counters = StepCounters::default();

        let destination = handle_special_tile(&grid, Point::new(0, 1), &visited, &mut counters);

        assert_eq!(destination, Some(Point::new(2, 1)));
        assert_eq!(counters.teleport, 1);
        assert_eq!(counters.total(), 1);
    }

    #[test]
    fn test_teleport_to_visited() {
        let grid: Grid = "ST \n   \n TE".parse().unwrap();
        let mut visited = grid.create_storage(false);
        *visited.get_mut(Point::new(0, 1)) = true;
        let mut counters = StepCounters::default();

        let destination = handle_special_tile(&grid, Point::new(2, 1), &visited, &mut counters);

        assert_eq!(destination, None);
        assert_eq!(counters.total(), 0);
    }

    #[test]
    fn test_penalty() {
        let grid: Grid = "SP \n  E".parse().unwrap();
        let visited = grid.create_storage(false);
        let mut counters = StepCounters::default();

        assert_eq!(
            handle_special_tile(&grid, Point::new(0, 1), &visited, &mut counters),
            None
        );
        assert_eq!(counters.penalty, 2);
        assert_eq!(counters.movement, 1);
        assert_eq!(counters.total(), 3);
    }

    #[test]
    fn test_plain_cell() {
        let grid: Grid = "S T\n  E".parse().unwrap();
        let visited = grid.create_storage(false);
        let mut counters = StepCounters::default();

        // a single teleport is inert
        assert_eq!(
            handle_special_tile(&grid, Point::new(0, 2), &visited, &mut counters),
            None
        );
        assert_eq!(
            handle_special_tile(&grid, Point::new(0, 1), &visited, &mut counters),
            None
        );
        assert_eq!(counters, StepCounters::default());
    }
}
