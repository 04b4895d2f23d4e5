//! Step-by-step maze solving on rectangular grids.
//!
//! A [`Grid`] is loaded from text (`#` wall, space or `.` open, `S` start,
//! `E` end, `T` teleport, `P` penalty) and searched by one of the strategies
//! in [`strategy`], either directly one expansion at a time or through a
//! [`Solver`] that adds timing, observation and cooperative pause, step and
//! cancel via a [`StepController`].

pub mod compare;
pub mod control;
pub mod error;
pub mod frontier;
pub mod grid;
pub mod path;
pub mod solver;
pub mod special;
pub mod state;
pub mod strategy;

pub use compare::{compare, Averages, ComparisonRow};
pub use control::{Checkpoint, ControllerConfig, StepController};
pub use error::GridError;
pub use grid::{Cell, CellStorage, Direction, Grid, Point};
pub use solver::{Outcome, SearchResult, Solver};
pub use state::{SearchState, Snapshot, StepCounters};
pub use strategy::{Failure, Hand, SearchStatus, Strategy, StrategyKind};
