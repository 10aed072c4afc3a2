use std::num::NonZeroUsize;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use shortcut::timer::Stopwatch;
use shortcut::{BaselineEngine, Grid, ParallelEngine, ShortcutEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Engine {
    Baseline,
    Parallel,
    Both,
}

/// Benchmark the shortcut engines on a random N*N grid.
#[derive(Debug, Parser)]
#[command(name = "shortcut-bench", version)]
struct Args {
    /// Grid size
    n: usize,

    /// How many times each engine runs
    #[arg(default_value_t = 1)]
    iterations: usize,

    #[arg(long, value_enum, default_value_t = Engine::Both, env = "SHORTCUT_ENGINE")]
    engine: Engine,

    /// Upper bound on parallel workers, defaults to the available parallelism
    #[arg(long, env = "SHORTCUT_WORKERS")]
    workers: Option<NonZeroUsize>,

    /// Seed for the input grid
    #[arg(long)]
    seed: Option<u64>,

    /// Check that the parallel result equals the baseline result
    #[arg(long)]
    verify: bool,
}

fn benchmark(engine: &dyn ShortcutEngine, d: &Grid, iterations: usize) -> shortcut::Result<Grid> {
    let mut stopwatch = Stopwatch::new();
    let mut result = Grid::empty();
    stopwatch.click();
    for _ in 0..iterations {
        result = engine.compute(d)?;
        stopwatch.click();
    }
    for lap in stopwatch.laps() {
        println!("{}\t{:.6}", engine.name(), lap.as_secs_f64());
    }
    stopwatch.report(engine.name());
    Ok(result)
}

fn run(args: &Args) -> shortcut::Result<bool> {
    let d = match args.seed {
        Some(seed) => Grid::random_with(args.n, &mut StdRng::seed_from_u64(seed)),
        None => Grid::random(args.n),
    };
    info!(n = args.n, iterations = args.iterations, "benchmarking with input containing {0}*{0} elements", args.n);

    let mut parallel = ParallelEngine::new();
    if let Some(workers) = args.workers {
        parallel = parallel.with_max_workers(workers);
    }

    let mut baseline_result = None;
    let mut parallel_result = None;
    if matches!(args.engine, Engine::Baseline | Engine::Both) || args.verify {
        baseline_result = Some(benchmark(&BaselineEngine, &d, args.iterations.max(1))?);
    }
    if matches!(args.engine, Engine::Parallel | Engine::Both) || args.verify {
        info!(workers = parallel.workers_for(args.n), "parallel engine");
        parallel_result = Some(benchmark(&parallel, &d, args.iterations.max(1))?);
    }

    if args.verify {
        let ok = baseline_result == parallel_result;
        if ok {
            info!("parallel result matches baseline");
        } else {
            error!("parallel result differs from baseline");
        }
        return Ok(ok);
    }
    Ok(true)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "benchmark failed");
            ExitCode::FAILURE
        }
    }
}
