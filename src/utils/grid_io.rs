//! This module reads and writes solution grids in the plain-text matrix format
//! shared by the driver binaries and the sweep runners.
//!
//! The format is one matrix row per line with the values separated by single
//! spaces. Readers accept any run of whitespace between values and skip blank
//! lines, so files produced by other tools load as well.

use faer::{Mat, MatRef};
use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
};
use thiserror::Error;

/// Represents all possible errors that can occur while loading a grid file.
#[derive(Error, Debug)]
pub enum GridIoError {
    /// Wraps a standard I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Occurs when a token cannot be parsed into a float.
    #[error("Parse error: Failed to parse float from '{token}' on line {line}")]
    ParseFloat { line: usize, token: String },
    /// Occurs when a row has a different number of values than the first row.
    #[error("Format error: line {line} has {found} values, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// Occurs when the file contains no values at all.
    #[error("Format error: the file contains no matrix rows")]
    Empty,
    /// Occurs when the grid is smaller than the computation requires.
    #[error("Dimension mismatch: grid is {rows}x{cols}, need at least {min_rows}x{min_cols}")]
    TooSmall {
        rows: usize,
        cols: usize,
        min_rows: usize,
        min_cols: usize,
    },
}

/// Parses a grid from any buffered reader.
pub fn parse_grid(reader: impl BufRead) -> Result<Mat<f64>, GridIoError> {
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        let row = tokens
            .iter()
            .map(|t| {
                t.parse::<f64>().map_err(|_| GridIoError::ParseFloat {
                    line: line_no,
                    token: t.to_string(),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                return Err(GridIoError::RaggedRow {
                    line: line_no,
                    expected: first.len(),
                    found: row.len(),
                });
            }
        }
        rows.push(row);
    }

    let ncols = rows.first().map(Vec::len).ok_or(GridIoError::Empty)?;
    Ok(Mat::from_fn(rows.len(), ncols, |i, j| rows[i][j]))
}

/// Loads a grid from the file at `path`.
pub fn read_grid(path: impl AsRef<Path>) -> Result<Mat<f64>, GridIoError> {
    let file = File::open(path)?;
    parse_grid(BufReader::new(file))
}

/// Writes `grid` to any writer, one row per line, values separated by one space.
pub fn format_grid(mut writer: impl Write, grid: MatRef<'_, f64>) -> io::Result<()> {
    for i in 0..grid.nrows() {
        for j in 0..grid.ncols() {
            if j > 0 {
                writer.write_all(b" ")?;
            }
            write!(writer, "{}", grid[(i, j)])?;
        }
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Writes `grid` to the file at `path`, truncating it if it exists.
pub fn write_grid(path: impl AsRef<Path>, grid: MatRef<'_, f64>) -> Result<(), GridIoError> {
    let file = File::create(path)?;
    format_grid(BufWriter::new(file), grid)?;
    Ok(())
}

/// Checks that `grid` has at least `min_rows` rows and `min_cols` columns.
pub fn ensure_min_shape(
    grid: MatRef<'_, f64>,
    min_rows: usize,
    min_cols: usize,
) -> Result<(), GridIoError> {
    if grid.nrows() < min_rows || grid.ncols() < min_cols {
        return Err(GridIoError::TooSmall {
            rows: grid.nrows(),
            cols: grid.ncols(),
            min_rows,
            min_cols,
        });
    }
    Ok(())
}
