use crate::grid::{Cell, CellStorage, Grid, Point, PENALTY_STEPS};
use crate::state::StepCounters;

/// Backtrack from `goal` through the parent links and return the path from
/// the start (the node without a parent) to `goal`, both inclusive.
pub fn reconstruct(parents: &CellStorage<Option<Point>>, goal: Point) -> Vec<Point> {
    let mut path = vec![goal];
    let mut current = goal;

    while let Some(from) = parents.get(current) {
        path.push(from);
        current = from;
    }

    path.reverse();
    path
}

/// Count the steps taken along a path.
///
/// Moves between adjacent cells are movement steps, any other move is a
/// teleport jump. Every penalty tile entered adds the penalty on top.
pub fn tally(grid: &Grid, path: &[Point]) -> StepCounters {
    let mut counters = StepCounters::default();

    for pair in path.windows(2) {
        let (from, to) = (pair[0], pair[1]);

        if from.is_adjacent(to) {
            counters.movement += 1;
        } else {
            counters.teleport += 1;
        }

        if grid.get(to) == Cell::Penalty {
            counters.penalty += PENALTY_STEPS;
        }
    }

    counters
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_reconstruct() {
        let grid: Grid = "S  \n  E".parse().unwrap();
        let mut parents = grid.create_storage(None);
        *parents.get_mut(Point::new(0, 1)) = Some(Point::new(0, 0));
        *parents.get_mut(Point::new(1, 1)) = Some(Point::new(0, 1));
        *parents.get_mut(Point::new(1, 2)) = Some(Point::new(1, 1));

        assert_eq!(
            reconstruct(&parents, Point::new(1, 2)),
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(1, 1),
                Point::new(1, 2)
            ]
        );
    }

    #[test]
    fn test_reconstruct_start() {
        let grid: Grid = "SE".parse().unwrap();
        let parents = grid.create_storage(None);
        assert_eq!(reconstruct(&parents, grid.start()), vec![grid.start()]);
    }

    #[test]
    fn test_tally() {
        let grid: Grid = "S P\n##E".parse().unwrap();
        let path = vec![
            Point::new(0, 0),
            Point::new(0, 1),
            Point::new(0, 2),
            Point::new(1, 2),
        ];
        let counters = tally(&grid, &path);
        assert_eq!(counters.movement, 3);
        assert_eq!(counters.penalty, 2);
        assert_eq!(counters.total(), 5);

        let grid: Grid = "ST#T\n##PE".parse().unwrap();
        let path = vec![
            Point::new(0, 0),
            Point::new(0, 1),
            Point::new(0, 3),
            Point::new(1, 3),
        ];
        let counters = tally(&grid, &path);
        assert_eq!(counters.movement, 2);
        assert_eq!(counters.teleport, 1);
        assert_eq!(counters.penalty, 0);
    }
}
