//! Analytic solution of the reference Laplace problem.
//!
//! Invoked as `exact <size> [alg]` with the same arguments as the driver so the
//! sweep runners can call both programs alike; `alg` is accepted and ignored.
//! Writes the `(size + 1) × (size + 1)` grid to `output2.txt`.

use anyhow::{Context, Result, anyhow, ensure};
use clap::Parser;
use laplace_grid::{SolverKind, exact_grid, utils::grid_io::write_grid};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "exact",
    about = "Samples the analytic solution of the reference problem on the driver's grid."
)]
struct ExactArgs {
    /// Number of partitions per side.
    size: usize,
    /// Accepted for compatibility with the driver's command line; unused.
    #[clap(value_enum)]
    alg: Option<SolverKind>,
    /// File the grid is written to.
    #[clap(long, value_name = "PATH", default_value = "output2.txt")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logger: {}", e))?;

    let args = ExactArgs::parse();
    ensure!(args.size >= 1, "size must be positive");
    if let Some(alg) = args.alg {
        log::debug!("Ignoring solver argument {:?}", alg);
    }

    let grid = exact_grid(args.size)?;
    write_grid(&args.output, grid.as_ref())
        .with_context(|| format!("Failed to write grid to {:?}", args.output))?;
    log::info!(
        "Wrote exact solution for N = {} to {:?}",
        args.size,
        args.output
    );
    Ok(())
}
