//! Error sweep: discrete versus analytic solution over a range of sizes.
//!
//! For each size `n` the runner invokes the driver as `driver <n> <alg>` and the
//! exact-solution program as `a.out <n>`, both inside the working directory.
//! It then reads back `output.txt` and `output2.txt`, computes the L2 error of
//! their leading `n × n` blocks, appends the value to `errors.csv`, and finally
//! plots error against `n` to `errorplot.png`.
//!
//! A size whose programs fail or whose output cannot be parsed is logged and
//! skipped; the remaining sizes still run.
//!
//! With `--plot-only` the programs are not run; the plot is redrawn from the
//! measurements already stored in the CSV file.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use laplace_grid::{
    SolverKind, l2_error,
    plot::{ChartSpec, plot_series},
    series::{Measurement, MeasurementWriter, group_by_solver, read_measurements},
    utils::{
        cli::SweepArgs,
        grid_io::{ensure_min_shape, read_grid},
        process::ExternalProgram,
    },
};
use std::path::PathBuf;

const DRIVER_OUTPUT: &str = "output.txt";
const EXACT_OUTPUT: &str = "output2.txt";

#[derive(Parser, Debug)]
#[clap(
    name = "error-study",
    about = "Plots the L2 error of the driver against the exact solution."
)]
struct ErrorStudyArgs {
    #[clap(flatten)]
    sweep: SweepArgs,
    /// Path of the exact-solution program, invoked as `a.out <size>`.
    #[clap(long, value_name = "PATH", default_value = "./a.out")]
    exact: PathBuf,
    /// Direct method passed to the driver.
    #[clap(long, value_enum, default_value = "1")]
    solver: SolverKind,
    /// Output image.
    #[clap(long, value_name = "PATH", default_value = "errorplot.png")]
    plot: PathBuf,
    /// Output table with one row per size.
    #[clap(long, value_name = "PATH", default_value = "errors.csv")]
    csv: PathBuf,
    /// Skip the sweep and re-plot the measurements already stored in `--csv`.
    #[clap(long)]
    plot_only: bool,
}

/// Runs both programs for one size and returns the error between their grids.
fn measure(
    driver: &ExternalProgram,
    exact: &ExternalProgram,
    n: usize,
    solver: SolverKind,
) -> Result<f64> {
    let size = n.to_string();
    driver.run([size.as_str(), solver.as_arg()])?;
    exact.run([size.as_str()])?;

    let dir = driver.working_dir();
    let approx = read_grid(dir.join(DRIVER_OUTPUT))
        .with_context(|| format!("Failed to read {DRIVER_OUTPUT} for N = {n}"))?;
    let reference = read_grid(dir.join(EXACT_OUTPUT))
        .with_context(|| format!("Failed to read {EXACT_OUTPUT} for N = {n}"))?;
    ensure_min_shape(approx.as_ref(), n, n).context(DRIVER_OUTPUT)?;
    ensure_min_shape(reference.as_ref(), n, n).context(EXACT_OUTPUT)?;

    Ok(l2_error(approx.as_ref(), reference.as_ref(), n)?)
}

/// Measures every size, appending each result to the CSV as it arrives.
fn run_sweep(args: &ErrorStudyArgs) -> Result<Vec<Measurement>> {
    let driver = ExternalProgram::new(&args.sweep.driver, &args.sweep.working_dir);
    let exact = ExternalProgram::new(&args.exact, &args.sweep.working_dir);
    log::info!(
        "Starting error sweep with {} in {:?}",
        args.solver.label(),
        args.sweep.working_dir
    );

    let mut writer = MeasurementWriter::create(&args.csv)?;
    let mut measurements = Vec::new();

    for n in args.sweep.sizes() {
        match measure(&driver, &exact, n, args.solver) {
            Ok(value) => {
                log::info!("N = {n}: error = {value:e}");
                let record = Measurement {
                    solver: args.solver,
                    n,
                    value,
                };
                writer.append(&record)?;
                measurements.push(record);
            }
            Err(e) => {
                log::error!("N = {n} failed: {e:#}. Skipping this size.");
            }
        }
    }
    Ok(measurements)
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logger: {}", e))?;

    let args = ErrorStudyArgs::parse();
    let measurements = if args.plot_only {
        log::info!("Re-plotting measurements from {:?}", args.csv);
        read_measurements(&args.csv)?
    } else {
        run_sweep(&args)?
    };

    let title = format!("Norm 2 Error using {}", args.solver.label());
    let spec = ChartSpec {
        title: &title,
        x_label: "N",
        y_label: "Error",
    };
    plot_series(&args.plot, &spec, &group_by_solver(&measurements))?;
    log::info!("Error plot saved to {:?}", args.plot);
    Ok(())
}
