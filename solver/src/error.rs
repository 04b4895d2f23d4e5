use thiserror::Error;

use crate::grid::Point;

/// Reasons a grid cannot be loaded. All of them are fatal.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid source is empty")]
    Empty,

    #[error("row {line} has length {found}, expected {expected} (all rows must have the same length)")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("grid must contain a start (S) position")]
    MissingStart,

    #[error("grid must contain an end (E) position")]
    MissingEnd,

    #[error("grid contains more than one start: {0} and {1}")]
    DuplicateStart(Point, Point),

    #[error("grid contains more than one end: {0} and {1}")]
    DuplicateEnd(Point, Point),

    #[error("unknown tile {tile:?} at row {line}, column {column}")]
    UnknownTile {
        line: usize,
        column: usize,
        tile: char,
    },

    #[error("failed to read grid: {0}")]
    Io(#[from] std::io::Error),
}
