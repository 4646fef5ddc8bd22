//! Finite-difference solver for the reference Laplace problem.
//!
//! Invoked as `driver <size> [alg]`, it discretises `[0, π]²` into `size`
//! partitions per side, solves the `(size - 1)²` interior unknowns with the
//! selected direct method and writes the full `(size + 1) × (size + 1)` grid,
//! boundary included, to `output.txt` in the current directory.

use anyhow::{Context, Result, anyhow, ensure};
use clap::Parser;
use laplace_grid::{
    SolverKind, reference_problem,
    utils::{grid_io::write_grid, perf::peak_rss_kb},
};
use std::{path::PathBuf, time::Instant};

/// Command-line arguments for the driver.
#[derive(Parser, Debug)]
#[clap(
    name = "driver",
    about = "Solves Laplace's equation on [0, pi]^2 and writes the grid to a text file."
)]
struct DriverArgs {
    /// Number of partitions per side (at least 2).
    size: usize,
    /// Direct method: 0 (gauss) for elimination, 1 (cholesky) for Cholesky.
    #[clap(value_enum, default_value = "0")]
    alg: SolverKind,
    /// File the grid is written to.
    #[clap(long, value_name = "PATH", default_value = "output.txt")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logger: {}", e))?;

    let args = DriverArgs::parse();
    ensure!(
        args.size >= 2,
        "size must be at least 2 to have interior unknowns, got {}",
        args.size
    );

    let unknowns = (args.size - 1) * (args.size - 1);
    log::info!(
        "Solving N = {} ({} unknowns) with {}",
        args.size,
        unknowns,
        args.alg.label()
    );

    let start = Instant::now();
    let grid = reference_problem()
        .solve_grid(args.size, args.alg)
        .with_context(|| format!("Failed to solve the system for N = {}", args.size))?;
    let elapsed = start.elapsed();

    write_grid(&args.output, grid.as_ref())
        .with_context(|| format!("Failed to write grid to {:?}", args.output))?;

    match peak_rss_kb() {
        Some(kb) => log::info!(
            "Solved in {:.6} secs, peak RSS {} kB, grid written to {:?}",
            elapsed.as_secs_f64(),
            kb,
            args.output
        ),
        None => log::info!(
            "Solved in {:.6} secs, grid written to {:?}",
            elapsed.as_secs_f64(),
            args.output
        ),
    }
    Ok(())
}
