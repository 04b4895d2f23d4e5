use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::solver::Solver;
use crate::strategy::StrategyKind;

/// Averages over the successful runs of one strategy
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Averages {
    pub elapsed_ms: f64,
    pub steps: f64,
    pub path_length: f64,
    pub visited: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub strategy: String,
    pub runs: usize,
    pub successful_runs: usize,
    /// `None` when every run failed
    pub averages: Option<Averages>,
}

/// Run every strategy `runs` times on `grid` and average the successful runs.
///
/// Rows come back in [`StrategyKind::ALL`] order.
pub fn compare(grid: &Grid, runs: usize) -> Vec<ComparisonRow> {
    StrategyKind::ALL
        .iter()
        .map(|kind| compare_one(grid, *kind, runs))
        .collect()
}

fn compare_one(grid: &Grid, kind: StrategyKind, runs: usize) -> ComparisonRow {
    let solver = Solver::new(grid, kind);

    let mut successful_runs = 0;
    let mut elapsed = Duration::ZERO;
    let mut steps = 0;
    let mut path_length = 0;
    let mut visited = 0;

    for _ in 0..runs {
        let result = solver.run(false);
        if !result.success() {
            continue;
        }

        successful_runs += 1;
        elapsed += result.elapsed;
        steps += result.total_steps();
        path_length += result.path.len();
        visited += result.visited.count();
    }

    let averages = (successful_runs > 0).then(|| {
        let n = successful_runs as f64;
        Averages {
            elapsed_ms: elapsed.as_secs_f64() * 1000.0 / n,
            steps: steps as f64 / n,
            path_length: path_length as f64 / n,
            visited: visited as f64 / n,
        }
    });

    info!(
        "{}: {}/{} runs found a path",
        kind.name(),
        successful_runs,
        runs
    );

    ComparisonRow {
        strategy: kind.name().to_string(),
        runs,
        successful_runs,
        averages,
    }
}
