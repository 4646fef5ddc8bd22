//! PNG rendering of measurement series and solution surfaces with [`plotters`].

use crate::series::Series;
use anyhow::{Result, anyhow, ensure};
use clap::ValueEnum;
use faer::MatRef;
use plotters::prelude::*;
use std::path::Path;

const SERIES_COLORS: [RGBColor; 4] = [RED, GREEN, BLUE, MAGENTA];

/// Titles for a 2D line chart.
#[derive(Debug, Clone, Copy)]
pub struct ChartSpec<'a> {
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
}

/// Colour scale for surface plots.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Colormap {
    /// Light to dark blue.
    Blues,
    /// Full hue wheel.
    Hsv,
}

impl Colormap {
    /// Colour for a value normalised to `[0, 1]`; out-of-range input is clamped.
    fn rgb(&self, t: f64) -> RGBColor {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        match self {
            Colormap::Blues => {
                let lerp = |lo: u8, hi: u8| (lo as f64 + (hi as f64 - lo as f64) * t).round() as u8;
                RGBColor(lerp(247, 8), lerp(251, 48), lerp(255, 107))
            }
            Colormap::Hsv => {
                let (r, g, b) = HSLColor(t, 1.0, 0.5).to_backend_color().rgb;
                RGBColor(r, g, b)
            }
        }
    }
}

trait DrawResultExt<T> {
    fn drawing(self, what: &str) -> Result<T>;
}

impl<T, E: std::fmt::Debug> DrawResultExt<T> for std::result::Result<T, E> {
    fn drawing(self, what: &str) -> Result<T> {
        self.map_err(|e| anyhow!("Failed to {what}: {e:?}"))
    }
}

/// Range covering `values` with a 5% margin; degenerate ranges are widened by one.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        return (0.0, 1.0);
    }
    let span = hi - lo;
    if span == 0.0 {
        (lo - 1.0, hi + 1.0)
    } else {
        (lo - 0.05 * span, hi + 0.05 * span)
    }
}

/// Draws every series as a dashed line with point markers and a legend.
///
/// The first series is drawn in red.
pub fn plot_series(path: &Path, spec: &ChartSpec<'_>, series: &[Series]) -> Result<()> {
    ensure!(
        series.iter().any(|s| !s.points.is_empty()),
        "No data points to plot for {path:?}"
    );
    let all = || series.iter().flat_map(|s| s.points.iter().copied());
    let (x_lo, x_hi) = padded_range(all().map(|p| p.0));
    let (y_lo, y_hi) = padded_range(all().map(|p| p.1));

    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE).drawing("fill background")?;

    let mut chart = ChartBuilder::on(&root)
        .caption(spec.title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
        .drawing("build chart")?;

    chart
        .configure_mesh()
        .x_desc(spec.x_label)
        .y_desc(spec.y_label)
        .draw()
        .drawing("draw mesh")?;

    for (idx, s) in series.iter().enumerate() {
        let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
        chart
            .draw_series(DashedLineSeries::new(
                s.points.iter().copied(),
                10,
                6,
                color.stroke_width(2),
            ))
            .drawing("draw series")?
            .label(s.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
        chart
            .draw_series(s.points.iter().map(|&p| Circle::new(p, 3, color.filled())))
            .drawing("draw markers")?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .drawing("draw legend")?;

    root.present().drawing("write image")?;
    log::info!("Saved plot to {path:?}");
    Ok(())
}

/// Renders `grid` as a 3D surface over the integer lattice `0..ncols × 0..nrows`,
/// with the matrix entry as height.
pub fn plot_surface(path: &Path, grid: MatRef<'_, f64>, title: &str, colormap: Colormap) -> Result<()> {
    ensure!(
        grid.nrows() >= 2 && grid.ncols() >= 2,
        "A surface needs at least a 2x2 grid, got {}x{}",
        grid.nrows(),
        grid.ncols()
    );
    let values = || (0..grid.nrows()).flat_map(move |i| (0..grid.ncols()).map(move |j| grid[(i, j)]));
    let (z_lo, z_hi) = padded_range(values());
    let span = z_hi - z_lo;

    let root = BitMapBackend::new(path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE).drawing("fill background")?;

    let x_max = (grid.ncols() - 1) as f64;
    let y_max = (grid.nrows() - 1) as f64;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(20)
        .build_cartesian_3d(0.0..x_max, z_lo..z_hi, 0.0..y_max)
        .drawing("build chart")?;

    chart.with_projection(|mut pb| {
        pb.yaw = 0.6;
        pb.pitch = 0.4;
        pb.scale = 0.8;
        pb.into_matrix()
    });

    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.15))
        .max_light_lines(3)
        .draw()
        .drawing("draw axes")?;

    // Plotters' 3D y axis is vertical, so the grid row index runs along z.
    chart
        .draw_series(
            SurfaceSeries::xoz(
                (0..grid.ncols()).map(|j| j as f64),
                (0..grid.nrows()).map(|k| k as f64),
                |x, z| grid[(z.round() as usize, x.round() as usize)],
            )
            .style_func(&|&v: &f64| colormap.rgb((v - z_lo) / span).filled()),
        )
        .drawing("draw surface")?;

    root.present().drawing("write image")?;
    log::info!("Saved surface plot to {path:?}");
    Ok(())
}
