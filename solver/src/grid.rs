use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GridError;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Wall,
    Open,
    Start,
    End,
    Teleport,
    Penalty,
}

impl Cell {
    /// Everything except walls can be stepped on
    pub fn is_passable(self) -> bool {
        self != Cell::Wall
    }

    /// The number of steps it costs to move onto a cell of this kind
    pub fn entry_cost(self) -> usize {
        match self {
            Cell::Penalty => 1 + PENALTY_STEPS,
            _ => 1,
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Cell::Wall),
            ' ' | '.' => Some(Cell::Open),
            'S' => Some(Cell::Start),
            'E' => Some(Cell::End),
            'T' => Some(Cell::Teleport),
            'P' => Some(Cell::Penalty),
            _ => None,
        }
    }
}

/// Additional steps charged for entering a penalty tile
pub const PENALTY_STEPS: usize = 2;

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Cell::Wall => "#",
                Cell::Open => " ",
                Cell::Start => "S",
                Cell::End => "E",
                Cell::Teleport => "T",
                Cell::Penalty => "P",
            }
        )
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// The fixed neighbor order used by every strategy: up, right, down, left
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn turn_left(self) -> Self {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    pub fn turn_right(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    pub fn reverse(self) -> Self {
        self.turn_left().turn_left()
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Direction::Up => "up",
                Direction::Down => "down",
                Direction::Left => "left",
                Direction::Right => "right",
            }
        )
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two points
    pub fn manhattan(self, other: Point) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    pub fn is_adjacent(self, other: Point) -> bool {
        self.manhattan(other) == 1
    }

    /// The point one cell away in the given direction, if it does not underflow
    pub fn offset(self, direction: Direction) -> Option<Point> {
        match direction {
            Direction::Up => self.row.checked_sub(1).map(|row| Point { row, ..self }),
            Direction::Right => Some(Point {
                col: self.col + 1,
                ..self
            }),
            Direction::Down => Some(Point {
                row: self.row + 1,
                ..self
            }),
            Direction::Left => self.col.checked_sub(1).map(|col| Point { col, ..self }),
        }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Per-cell storage with the same dimensions as a grid (a vec in a vec)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellStorage<T>(Vec<Vec<T>>);

impl<T: Clone> CellStorage<T> {
    pub fn new(rows: usize, columns: usize, value: T) -> Self {
        CellStorage(vec![vec![value; columns]; rows])
    }
}

impl<T: Copy> CellStorage<T> {
    pub fn is_valid(&self, node: Point) -> bool {
        node.row < self.0.len() && self.0.first().is_some_and(|r| node.col < r.len())
    }

    pub fn get(&self, node: Point) -> T {
        self.0[node.row][node.col]
    }

    pub fn get_mut(&mut self, node: Point) -> &mut T {
        &mut self.0[node.row][node.col]
    }
}

impl CellStorage<bool> {
    /// Number of cells that are set
    pub fn count(&self) -> usize {
        self.0.iter().flatten().filter(|v| **v).count()
    }
}

impl Display for CellStorage<bool> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.0 {
            for cell in row {
                write!(f, "{}", if *cell { "." } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// A rectangular maze of cells with exactly one start and one end.
///
/// A grid is never mutated once loaded; strategies that need a modified
/// copy (dead-end filling) build a new grid with [`Grid::with_walls`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Vec<Cell>>,
    start: Point,
    end: Point,
    teleports: Vec<Point>,
    penalties: Vec<Point>,
}

impl Grid {
    /// Load a grid from a text file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GridError> {
        let text = std::fs::read_to_string(path)?;
        text.parse()
    }

    /// Build a grid from rows of cells, validating the same invariants the
    /// text loader does
    pub fn from_cells(cells: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let columns = cells.first().map(|r| r.len()).ok_or(GridError::Empty)?;
        if columns == 0 {
            return Err(GridError::Empty);
        }

        let mut start = None;
        let mut end = None;
        let mut teleports = Vec::new();
        let mut penalties = Vec::new();

        for (row, line) in cells.iter().enumerate() {
            if line.len() != columns {
                return Err(GridError::RaggedRow {
                    line: row + 1,
                    expected: columns,
                    found: line.len(),
                });
            }

            for (col, cell) in line.iter().enumerate() {
                let point = Point { row, col };
                match cell {
                    Cell::Start => {
                        if let Some(first) = start.replace(point) {
                            return Err(GridError::DuplicateStart(first, point));
                        }
                    }
                    Cell::End => {
                        if let Some(first) = end.replace(point) {
                            return Err(GridError::DuplicateEnd(first, point));
                        }
                    }
                    Cell::Teleport => teleports.push(point),
                    Cell::Penalty => penalties.push(point),
                    Cell::Wall | Cell::Open => {}
                }
            }
        }

        Ok(Self {
            rows: cells.len(),
            columns,
            start: start.ok_or(GridError::MissingStart)?,
            end: end.ok_or(GridError::MissingEnd)?,
            cells,
            teleports,
            penalties,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Teleport tiles in row-major order
    pub fn teleports(&self) -> &[Point] {
        &self.teleports
    }

    /// Penalty tiles in row-major order
    pub fn penalties(&self) -> &[Point] {
        &self.penalties
    }

    pub fn is_valid(&self, node: Point) -> bool {
        node.row < self.rows && node.col < self.columns
    }

    pub fn get(&self, node: Point) -> Cell {
        self.cells[node.row][node.col]
    }

    /// Create a storage for values of type T with the dimensions of this grid
    pub fn create_storage<T: Clone>(&self, value: T) -> CellStorage<T> {
        CellStorage::new(self.rows, self.columns, value)
    }

    /// In bounds, not a wall and not yet visited
    pub fn is_valid_move(&self, node: Point, visited: &CellStorage<bool>) -> bool {
        self.is_valid(node) && self.get(node).is_passable() && !visited.get(node)
    }

    /// The point one cell away in the given direction, if it lies inside the grid
    pub fn step(&self, node: Point, direction: Direction) -> Option<Point> {
        node.offset(direction).filter(|p| self.is_valid(*p))
    }

    /// Return the unvisited, passable neighbors of the provided node in the
    /// order up, right, down, left
    pub fn neighbors(
        &self,
        node: Point,
        visited: &CellStorage<bool>,
    ) -> impl Iterator<Item = Point> + '_ {
        let mut points = Vec::with_capacity(4);

        for direction in Direction::ALL {
            if let Some(point) = node.offset(direction) {
                if self.is_valid_move(point, visited) {
                    points.push(point);
                }
            }
        }

        points.into_iter()
    }

    /// Number of passable cells around the provided node that are not marked
    /// in `blocked`
    pub fn open_neighbors(&self, node: Point, blocked: &CellStorage<bool>) -> usize {
        Direction::ALL
            .iter()
            .filter_map(|d| self.step(node, *d))
            .filter(|p| self.get(*p).is_passable() && !blocked.get(*p))
            .count()
    }

    /// Where a teleport tile sends you: the first other teleport in list
    /// order. Returns `None` for non-teleport cells and when the grid has
    /// fewer than two teleports.
    pub fn teleport_destination(&self, node: Point) -> Option<Point> {
        if self.teleports.len() < 2 || self.get(node) != Cell::Teleport {
            return None;
        }
        self.teleports.iter().copied().find(|t| *t != node)
    }

    /// A copy of this grid with the provided cells turned into walls
    pub fn with_walls(&self, walls: impl IntoIterator<Item = Point>) -> Grid {
        let mut cells = self.cells.clone();
        for p in walls {
            cells[p.row][p.col] = Cell::Wall;
        }

        Grid {
            teleports: self
                .teleports
                .iter()
                .copied()
                .filter(|p| cells[p.row][p.col] == Cell::Teleport)
                .collect(),
            penalties: self
                .penalties
                .iter()
                .copied()
                .filter(|p| cells[p.row][p.col] == Cell::Penalty)
                .collect(),
            cells,
            ..self.clone()
        }
    }
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::new();

        for (row, line) in s.lines().enumerate() {
            let parsed = line
                .chars()
                .enumerate()
                .map(|(col, c)| {
                    Cell::from_char(c).ok_or(GridError::UnknownTile {
                        line: row + 1,
                        column: col + 1,
                        tile: c,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            cells.push(parsed);
        }

        Grid::from_cells(cells)
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_parse_basic() {
        let grid: Grid = "S..#E\n....#\n#....".parse().unwrap();

        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.columns(), 5);
        assert_eq!(grid.start(), Point::new(0, 0));
        assert_eq!(grid.end(), Point::new(0, 4));
        assert_eq!(grid.get(Point::new(0, 3)), Cell::Wall);
        assert_eq!(grid.get(Point::new(1, 1)), Cell::Open);
    }

    #[test]
    fn test_parse_special_tiles() {
        let grid: Grid = "S T\nP#P\nT E".parse().unwrap();

        assert_eq!(grid.teleports(), &[Point::new(0, 2), Point::new(2, 0)]);
        assert_eq!(grid.penalties(), &[Point::new(1, 0), Point::new(1, 2)]);
    }

    #[test]
    fn test_parse_crlf() {
        let grid: Grid = "S #\r\n  E\r\n".parse().unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.columns(), 3);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("".parse::<Grid>(), Err(GridError::Empty)));
        assert!(matches!(
            "S..#E\n...#\n#....".parse::<Grid>(),
            Err(GridError::RaggedRow {
                line: 2,
                expected: 5,
                found: 4
            })
        ));
        assert!(matches!(
            "...\n..E".parse::<Grid>(),
            Err(GridError::MissingStart)
        ));
        assert!(matches!(
            "S..\n...".parse::<Grid>(),
            Err(GridError::MissingEnd)
        ));
        assert!(matches!(
            "S.S\n..E".parse::<Grid>(),
            Err(GridError::DuplicateStart(..))
        ));
        assert!(matches!(
            "S.x\n..E".parse::<Grid>(),
            Err(GridError::UnknownTile {
                line: 1,
                column: 3,
                tile: 'x'
            })
        ));
    }

    #[test]
    fn test_ragged_row_message() {
        let err = "S..#E\n...#\n#....".parse::<Grid>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "row 2 has length 4, expected 5 (all rows must have the same length)"
        );
    }

    #[test]
    fn test_neighbors_order() {
        let grid: Grid = "   \n S \n  E".parse().unwrap();
        let visited = grid.create_storage(false);

        let neighbors: Vec<Point> = grid.neighbors(Point::new(1, 1), &visited).collect();
        assert_eq!(
            neighbors,
            vec![
                Point::new(0, 1),
                Point::new(1, 2),
                Point::new(2, 1),
                Point::new(1, 0)
            ]
        );
    }

    #[test]
    fn test_neighbors_filtered() {
        let grid: Grid = "S# \n  E".parse().unwrap();
        let mut visited = grid.create_storage(false);
        *visited.get_mut(Point::new(1, 0)) = true;

        // up is out of bounds, right is a wall, down is visited
        assert_eq!(grid.neighbors(Point::new(0, 0), &visited).count(), 0);
        assert!(!grid.is_valid_move(Point::new(0, 1), &visited));
        assert!(grid.is_valid_move(Point::new(1, 1), &visited));
        assert!(!grid.is_valid_move(Point::new(2, 1), &visited));
    }

    #[test]
    fn test_teleport_destination() {
        let grid: Grid = "ST T\n   E\nT   ".parse().unwrap();

        // first other teleport in list order, not the nearest one
        assert_eq!(
            grid.teleport_destination(Point::new(0, 3)),
            Some(Point::new(0, 1))
        );
        assert_eq!(
            grid.teleport_destination(Point::new(0, 1)),
            Some(Point::new(0, 3))
        );
        assert_eq!(grid.teleport_destination(Point::new(1, 1)), None);

        let single: Grid = "ST\n E".parse().unwrap();
        assert_eq!(single.teleport_destination(Point::new(0, 1)), None);
    }

    #[test]
    fn test_with_walls() {
        let grid: Grid = "S P\n  E".parse().unwrap();
        let filled = grid.with_walls([Point::new(0, 2)]);

        assert_eq!(filled.get(Point::new(0, 2)), Cell::Wall);
        assert!(filled.penalties().is_empty());
        assert_eq!(grid.penalties().len(), 1);
    }

    #[test]
    fn test_display_round_trip() {
        let text = "S #T\nP  E\n#T  \n";
        let grid: Grid = text.parse().unwrap();
        assert_eq!(grid.to_string(), text);
    }

    #[test]
    fn test_direction_turns() {
        assert_eq!(Direction::Up.turn_left(), Direction::Left);
        assert_eq!(Direction::Up.turn_right(), Direction::Right);
        assert_eq!(Direction::Left.reverse(), Direction::Right);
        assert_eq!(Direction::Down.turn_left().turn_left(), Direction::Up);
    }

    #[test]
    fn test_open_neighbors() {
        let grid: Grid = "S #
  E
#T ".parse().unwrap();
        let mut blocked = grid.create_storage(false);
        let center = Point::new(1, 1);

        assert_eq!(grid.open_neighbors(center, &blocked), 4);
        *blocked.get_mut(Point::new(2, 1)) = true;
        assert_eq!(grid.open_neighbors(center, &blocked), 3);
        // walls and the grid border never count
        assert_eq!(grid.open_neighbors(Point::new(0, 0), &blocked), 2);
    }
}
