use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use log::{info, warn};

use solver::{
    compare, Cell, ComparisonRow, ControllerConfig, Grid, Outcome, Point, SearchResult, Snapshot,
    Solver, StepController, StrategyKind,
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the maze file
    file: PathBuf,

    /// Strategy to run, may be repeated (dfs, bfs, dijkstra, astar,
    /// left-hand, right-hand, dead-end). Defaults to bfs.
    #[clap(short, long = "strategy")]
    strategies: Vec<StrategyKind>,

    /// Run every strategy and print averaged statistics
    #[clap(short, long)]
    compare: bool,

    /// Number of runs per strategy when comparing
    #[clap(short, long, default_value_t = 10)]
    runs: usize,

    /// Print results as JSON
    #[clap(long)]
    json: bool,

    /// Draw the found path on top of the maze
    #[clap(long)]
    show_path: bool,

    /// Follow the search step by step; type p, s, r or q followed by enter
    /// to pause, step, resume or quit
    #[clap(short, long)]
    watch: bool,

    /// Delay between steps in milliseconds while watching
    #[clap(long, default_value_t = 50)]
    delay: u64,
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let grid = Grid::load(&args.file)
        .with_context(|| format!("failed to load maze from {}", args.file.display()))?;
    info!(
        "loaded {}x{} maze from {}",
        grid.rows(),
        grid.columns(),
        args.file.display()
    );

    if args.compare {
        let rows = compare(&grid, args.runs);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            print_comparison(&rows);
        }
        return Ok(());
    }

    let strategies = if args.strategies.is_empty() {
        vec![StrategyKind::BreadthFirst]
    } else {
        args.strategies.clone()
    };

    let commands = args.watch.then(spawn_command_reader);

    let mut results = Vec::with_capacity(strategies.len());
    for kind in strategies {
        let result = match &commands {
            Some(commands) => watch(&grid, kind, Duration::from_millis(args.delay), commands),
            None => Solver::new(&grid, kind).run(false),
        };

        if !args.json {
            print_result(&result);
            if args.show_path && result.success() {
                print!("{}", render_path(&grid, &result.path));
            }
        }
        results.push(result);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    Ok(())
}

fn print_result(result: &SearchResult) {
    match result.outcome {
        Outcome::PathFound => println!(
            "{:<10} path of {} cells, {} steps ({} movement, {} teleport, {} penalty, {} filled), {} visited, {:.3} ms",
            result.strategy,
            result.path.len(),
            result.total_steps(),
            result.steps.movement,
            result.steps.teleport,
            result.steps.penalty,
            result.steps.filled,
            result.visited.count(),
            result.elapsed.as_secs_f64() * 1000.0
        ),
        Outcome::NoPathFound(failure) => println!(
            "{:<10} no path: {}, {} visited",
            result.strategy,
            failure,
            result.visited.count()
        ),
    }
}

fn print_comparison(rows: &[ComparisonRow]) {
    println!(
        "{:<10} {:>7} {:>10} {:>10} {:>8} {:>9}",
        "strategy", "success", "time (ms)", "steps", "length", "visited"
    );

    for row in rows {
        let success = format!("{}/{}", row.successful_runs, row.runs);
        match &row.averages {
            Some(a) => println!(
                "{:<10} {:>7} {:>10.3} {:>10.1} {:>8.1} {:>9.1}",
                row.strategy, success, a.elapsed_ms, a.steps, a.path_length, a.visited
            ),
            None => println!("{:<10} {:>7} {:>10}", row.strategy, success, "-"),
        }
    }
}

/// The maze with every path cell that is not a special tile drawn as `*`
fn render_path(grid: &Grid, path: &[Point]) -> String {
    let mut on_path = grid.create_storage(false);
    for p in path {
        *on_path.get_mut(*p) = true;
    }

    let mut out = String::new();
    for row in 0..grid.rows() {
        for col in 0..grid.columns() {
            let point = Point::new(row, col);
            match grid.get(point) {
                Cell::Open if on_path.get(point) => out.push('*'),
                cell => out.push_str(&cell.to_string()),
            }
        }
        out.push('\n');
    }
    out
}

enum Command {
    Pause,
    Step,
    Resume,
    Quit,
}

/// Forward commands typed on stdin for as long as it stays open
fn spawn_command_reader() -> Receiver<Command> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let command = match line.trim() {
                "p" => Command::Pause,
                "s" => Command::Step,
                "r" => Command::Resume,
                "q" => Command::Quit,
                "" => continue,
                other => {
                    warn!("unknown command {:?}, expected p, s, r or q", other);
                    continue;
                }
            };
            if tx.send(command).is_err() {
                break;
            }
        }
    });

    rx
}

/// Run one search on a worker thread, printing its progress and applying
/// commands until it finishes
fn watch(
    grid: &Grid,
    kind: StrategyKind,
    delay: Duration,
    commands: &Receiver<Command>,
) -> SearchResult {
    let controller = Arc::new(StepController::new(ControllerConfig { delay }));
    let (tx, snapshots) = mpsc::channel::<Snapshot>();

    thread::scope(|scope| {
        let worker = {
            let controller = controller.clone();
            scope.spawn(move || {
                Solver::new(grid, kind)
                    .with_controller(controller)
                    .with_observer(tx)
                    .run(true)
            })
        };

        loop {
            match snapshots.recv_timeout(Duration::from_millis(20)) {
                Ok(snapshot) => println!(
                    "{:<10} #{:<6} at {:<10} frontier {:<5} visited {:<5} steps {}",
                    kind,
                    snapshot.expansions,
                    snapshot
                        .current
                        .map_or_else(|| "-".to_string(), |p| p.to_string()),
                    snapshot.frontier,
                    snapshot.visited.count(),
                    snapshot.counters.total()
                ),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            while let Ok(command) = commands.try_recv() {
                match command {
                    Command::Pause => controller.pause(),
                    Command::Step => {
                        if !controller.step() {
                            warn!("not paused, nothing to step");
                        }
                    }
                    Command::Resume => controller.resume(),
                    Command::Quit => controller.cancel(),
                }
            }
        }

        match worker.join() {
            Ok(result) => result,
            Err(e) => std::panic::resume_unwind(e),
        }
    })
}
