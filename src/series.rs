//! Measurement series collected by the sweep runners.
//!
//! Every sweep produces one [`Measurement`] per (solver, size) pair. The records
//! are written to CSV as they arrive so a crash mid-sweep keeps the finished
//! rows, and are grouped into one plottable [`Series`] per solver at the end.

use crate::solvers::SolverKind;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs::File, path::Path};

/// A single data point: the value measured for `solver` at problem size `n`.
///
/// `value` is an error norm or a wall-clock duration in seconds, depending on
/// the sweep that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub solver: SolverKind,
    pub n: usize,
    pub value: f64,
}

/// An ordered sequence of `(size, value)` points sharing a legend label.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

/// Groups measurements by solver, keeping the order in which solvers first
/// appear and sorting each series by size.
pub fn group_by_solver(measurements: &[Measurement]) -> Vec<Series> {
    let mut order: Vec<SolverKind> = Vec::new();
    for m in measurements {
        if !order.contains(&m.solver) {
            order.push(m.solver);
        }
    }

    order
        .into_iter()
        .map(|solver| {
            let mut points: Vec<(f64, f64)> = measurements
                .iter()
                .filter(|m| m.solver == solver)
                .map(|m| (m.n as f64, m.value))
                .collect();
            points.sort_by(|a, b| a.0.total_cmp(&b.0));
            Series {
                label: solver.label().to_string(),
                points,
            }
        })
        .collect()
}

/// Incremental CSV sink for measurements, flushed after every record.
pub struct MeasurementWriter {
    writer: csv::Writer<File>,
}

impl MeasurementWriter {
    /// Creates (or truncates) the CSV file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create CSV writer for {path:?}"))?;
        Ok(Self { writer })
    }

    pub fn append(&mut self, record: &Measurement) -> Result<()> {
        self.writer.serialize(record)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Loads measurements previously written by [`MeasurementWriter`].
pub fn read_measurements(path: impl AsRef<Path>) -> Result<Vec<Measurement>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open CSV file {path:?}"))?;
    reader
        .deserialize()
        .collect::<Result<Vec<Measurement>, _>>()
        .with_context(|| format!("Malformed measurement in {path:?}"))
}
