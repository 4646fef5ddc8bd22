//! Runtime sweep: wall-clock time of the driver over a range of sizes.
//!
//! Each size `n` is timed as one blocking invocation of `driver <n> <alg>`,
//! process start-up included. With several `--solvers` every solver is timed at
//! every size and gets its own line in the plot.
//!
//! With `--plot-only` the programs are not run; the plot is redrawn from the
//! measurements already stored in the CSV file.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use laplace_grid::{
    SolverKind,
    plot::{ChartSpec, plot_series},
    series::{Measurement, MeasurementWriter, group_by_solver, read_measurements},
    utils::{cli::SweepArgs, process::ExternalProgram},
};
use std::{fs, path::PathBuf};

#[derive(Parser, Debug)]
#[clap(
    name = "runtime-study",
    about = "Times the driver for each problem size and plots the runtimes."
)]
struct RuntimeStudyArgs {
    #[clap(flatten)]
    sweep: SweepArgs,
    /// Direct methods to time, comma separated.
    #[clap(long, value_enum, value_delimiter = ',', default_value = "0")]
    solvers: Vec<SolverKind>,
    /// Output image; its parent directory is created if needed.
    #[clap(long, value_name = "PATH", default_value = "./data/lu_plot.png")]
    plot: PathBuf,
    /// Output table with one row per (solver, size).
    #[clap(long, value_name = "PATH", default_value = "./data/runtimes.csv")]
    csv: PathBuf,
    /// Skip the sweep and re-plot the measurements already stored in `--csv`.
    #[clap(long)]
    plot_only: bool,
}

fn chart_title(solvers: &[SolverKind]) -> String {
    match solvers {
        [SolverKind::Gaussian] => "Runtimes using LU Factorization".to_string(),
        _ => {
            let names: Vec<&str> = solvers.iter().map(SolverKind::label).collect();
            format!("Runtimes using {}", names.join(" and "))
        }
    }
}

/// Times every (size, solver) pair, appending each result to the CSV as it arrives.
fn run_sweep(args: &RuntimeStudyArgs) -> Result<Vec<Measurement>> {
    let driver = ExternalProgram::new(&args.sweep.driver, &args.sweep.working_dir);
    let mut writer = MeasurementWriter::create(&args.csv)?;
    let mut measurements = Vec::new();

    for n in args.sweep.sizes() {
        for &solver in &args.solvers {
            let size = n.to_string();
            match driver.run([size.as_str(), solver.as_arg()]) {
                Ok(elapsed) => {
                    let secs = elapsed.as_secs_f64();
                    log::info!("With N = {n} it took {secs} secs to run the program");
                    let record = Measurement {
                        solver,
                        n,
                        value: secs,
                    };
                    writer.append(&record)?;
                    measurements.push(record);
                }
                Err(e) => {
                    log::error!("{} at N = {n} failed: {e:#}. Skipping.", solver.label());
                }
            }
        }
    }
    Ok(measurements)
}

/// Solvers present in `measurements`, in order of first appearance.
fn solvers_in(measurements: &[Measurement]) -> Vec<SolverKind> {
    let mut solvers = Vec::new();
    for m in measurements {
        if !solvers.contains(&m.solver) {
            solvers.push(m.solver);
        }
    }
    solvers
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logger: {}", e))?;

    let args = RuntimeStudyArgs::parse();
    for path in [&args.plot, &args.csv] {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory {parent:?}"))?;
        }
    }

    let measurements = if args.plot_only {
        log::info!("Re-plotting measurements from {:?}", args.csv);
        read_measurements(&args.csv)?
    } else {
        run_sweep(&args)?
    };

    let title = chart_title(&solvers_in(&measurements));
    let spec = ChartSpec {
        title: &title,
        x_label: "N",
        y_label: "Time Secs",
    };
    plot_series(&args.plot, &spec, &group_by_solver(&measurements))?;
    log::info!("Runtime plot saved to {:?}", args.plot);
    Ok(())
}
