//! 3D surface of one solver program's output.
//!
//! Runs either the driver (`driver <size> [alg]`, reads `output.txt`) or the
//! exact-solution program (`a.out <size>`, reads `output2.txt`) once and renders
//! the resulting grid as a surface over the integer lattice.

use anyhow::{Context, Result, anyhow, ensure};
use clap::{Parser, ValueEnum};
use faer::MatRef;
use laplace_grid::{
    SolverKind,
    plot::{Colormap, plot_surface},
    utils::{grid_io::read_grid, process::ExternalProgram},
};
use std::path::PathBuf;

/// Which program produces the grid.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Source {
    /// The finite-difference driver.
    Driver,
    /// The analytic solution.
    Exact,
}

impl Source {
    fn default_program(self) -> &'static str {
        match self {
            Source::Driver => "./driver",
            Source::Exact => "./a.out",
        }
    }

    fn output_file(self) -> &'static str {
        match self {
            Source::Driver => "output.txt",
            Source::Exact => "output2.txt",
        }
    }

    fn default_colormap(self) -> Colormap {
        match self {
            Source::Driver => Colormap::Blues,
            Source::Exact => Colormap::Hsv,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "surface",
    about = "Runs a solver program once and renders its grid as a 3D surface."
)]
struct SurfaceArgs {
    /// Number of partitions per side passed to the program.
    size: usize,
    /// Direct method passed to the driver; ignored for the exact solution.
    #[clap(value_enum, default_value = "0")]
    alg: SolverKind,
    #[clap(long, value_enum, default_value = "driver")]
    source: Source,
    /// Overrides the program path implied by `--source`.
    #[clap(long, value_name = "PATH")]
    program: Option<PathBuf>,
    /// Colour scale; defaults to blues for the driver and hsv for the exact solution.
    #[clap(long, value_enum)]
    colormap: Option<Colormap>,
    #[clap(long, value_name = "PATH", default_value = "surface.png")]
    output: PathBuf,
    #[clap(long, value_name = "PATH", default_value = ".")]
    working_dir: PathBuf,
}

/// Both programs write `size + 1` points per side, boundary included.
fn check_grid_shape(grid: MatRef<'_, f64>, size: usize) -> Result<()> {
    ensure!(
        grid.nrows() == size + 1 && grid.ncols() == size + 1,
        "Expected a {0}x{0} grid for N = {1}, got {2}x{3}",
        size + 1,
        size,
        grid.nrows(),
        grid.ncols()
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logger: {}", e))?;

    let args = SurfaceArgs::parse();
    let program_path = args
        .program
        .clone()
        .unwrap_or_else(|| PathBuf::from(args.source.default_program()));
    let program = ExternalProgram::new(program_path, &args.working_dir);

    let size = args.size.to_string();
    let elapsed = match args.source {
        Source::Driver => program.run([size.as_str(), args.alg.as_arg()])?,
        Source::Exact => program.run([size.as_str()])?,
    };
    log::info!(
        "{:?} finished in {:.3} secs",
        program.program(),
        elapsed.as_secs_f64()
    );

    let input = args.working_dir.join(args.source.output_file());
    let grid = read_grid(&input).with_context(|| format!("Failed to read {input:?}"))?;
    check_grid_shape(grid.as_ref(), args.size)
        .with_context(|| format!("Bad grid in {input:?}"))?;

    let title = match args.source {
        Source::Driver => format!("Laplace solution, N = {}, {}", args.size, args.alg.label()),
        Source::Exact => format!("Exact solution, N = {}", args.size),
    };
    let colormap = args
        .colormap
        .unwrap_or_else(|| args.source.default_colormap());
    plot_surface(&args.output, grid.as_ref(), &title, colormap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_source_defaults() {
        let args = SurfaceArgs::try_parse_from(["surface", "10", "--source", "exact"]).unwrap();
        assert_eq!(args.source.default_program(), "./a.out");
        assert_eq!(args.source.output_file(), "output2.txt");
        assert_eq!(args.source.default_colormap(), Colormap::Hsv);
        assert_eq!(args.colormap, None);
    }

    #[test]
    fn test_alg_accepts_numeric_and_named_values() {
        let numeric = SurfaceArgs::try_parse_from(["surface", "10", "1"]).unwrap();
        let named = SurfaceArgs::try_parse_from(["surface", "10", "cholesky"]).unwrap();
        assert_eq!(numeric.alg, SolverKind::Cholesky);
        assert_eq!(named.alg, SolverKind::Cholesky);
    }

    #[test]
    fn test_grid_shape_must_match_size() {
        let grid = faer::Mat::<f64>::zeros(11, 11);
        assert!(check_grid_shape(grid.as_ref(), 10).is_ok());
        assert!(check_grid_shape(grid.as_ref(), 12).is_err());

        let ragged = faer::Mat::<f64>::zeros(11, 10);
        let err = check_grid_shape(ragged.as_ref(), 10).unwrap_err();
        assert_eq!(err.to_string(), "Expected a 11x11 grid for N = 10, got 11x10");
    }
}
