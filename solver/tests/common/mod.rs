#![allow(dead_code)]

use solver::{Cell, Grid, Point};

pub fn load(name: &str) -> Grid {
    let path = format!("{}/../data/{}.txt", env!("CARGO_MANIFEST_DIR"), name);
    Grid::load(path).unwrap()
}

/// Every grid of the given size with the start in the top left corner, the
/// end in the bottom right corner and each other cell taken from `tiles`
pub fn all_grids(rows: usize, columns: usize, tiles: &[Cell]) -> Vec<Grid> {
    let free = rows * columns - 2;
    let count = tiles.len().pow(free as u32);

    (0..count)
        .map(|mut n| {
            let mut cells = vec![vec![Cell::Wall; columns]; rows];
            for row in 0..rows {
                for col in 0..columns {
                    cells[row][col] = if (row, col) == (0, 0) {
                        Cell::Start
                    } else if (row, col) == (rows - 1, columns - 1) {
                        Cell::End
                    } else {
                        let tile = tiles[n % tiles.len()];
                        n /= tiles.len();
                        tile
                    };
                }
            }
            Grid::from_cells(cells).unwrap()
        })
        .collect()
}

/// A path runs from start to end over passable cells, each move going to an
/// adjacent cell or jumping from a teleport to its destination, and never
/// enters a cell twice
pub fn assert_valid_path(grid: &Grid, path: &[Point]) {
    assert_eq!(path.first(), Some(&grid.start()), "{:?}", path);
    assert_eq!(path.last(), Some(&grid.end()), "{:?}", path);

    for p in path {
        assert!(grid.get(*p).is_passable(), "{} is a wall", p);
    }

    for pair in path.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        assert!(
            from.is_adjacent(to) || grid.teleport_destination(from) == Some(to),
            "invalid move {} -> {}",
            from,
            to
        );
    }

    let mut seen = grid.create_storage(false);
    for p in path {
        assert!(!seen.get(*p), "{} entered twice", p);
        *seen.get_mut(*p) = true;
    }
}

/// Steps charged for walking `path`, counted independently of the library
pub fn path_cost(grid: &Grid, path: &[Point]) -> usize {
    path.iter()
        .skip(1)
        .map(|p| if grid.get(*p) == Cell::Penalty { 3 } else { 1 })
        .sum()
}
