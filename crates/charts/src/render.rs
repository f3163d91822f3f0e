use crate::error::ChartError;
use crate::figure::{Bar, ChartData, ChartFigure, HistogramBin, ScatterPoint, SeriesColor};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

const MARGIN: u32 = 24;

fn rgb(color: SeriesColor) -> RGBColor {
    match color {
        SeriesColor::Blue => RGBColor(31, 119, 180),
        SeriesColor::Green => RGBColor(44, 160, 44),
        SeriesColor::Red => RGBColor(214, 39, 40),
        SeriesColor::Orange => RGBColor(255, 165, 0),
        SeriesColor::Purple => RGBColor(128, 0, 128),
    }
}

fn render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

/// Pads a value range by 5% so nothing touches the edge; degenerate ranges
/// are widened by one unit each way.
fn padded(lo: f64, hi: f64) -> Range<f64> {
    if !(lo < hi) {
        return (lo - 1.0)..(hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad)..(hi + pad)
}

/// Value range that always includes zero, for bar-like charts.
fn with_zero(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    padded(lo, hi)
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Draws `figure` to a PNG at `path`.
///
/// Only geometry is drawn; the figure's title and axis captions are left to
/// the document that embeds the image.
pub fn render_png(figure: &ChartFigure, path: &Path, size: (u32, u32)) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    match &figure.data {
        ChartData::Line { points, color } => draw_line(&root, points, *color)?,
        ChartData::Bars { bars } => draw_bars(&root, bars)?,
        ChartData::Histogram { bins, color } => draw_histogram(&root, bins, *color)?,
        ChartData::Scatter { points } => draw_scatter(&root, points)?,
    }

    root.present().map_err(render_err)?;
    tracing::debug!(kind = ?figure.kind, path = %path.display(), "Rendered chart");
    Ok(())
}

fn draw_line<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    points: &[(f64, f64)],
    color: SeriesColor,
) -> Result<(), ChartError> {
    let (x_lo, x_hi) = bounds(points.iter().map(|p| p.0));
    let (y_lo, y_hi) = bounds(points.iter().map(|p| p.1));
    let x_range = padded(x_lo, x_hi);
    let y_range = padded(y_lo.min(0.0), y_hi.max(0.0));

    let mut chart = ChartBuilder::on(area)
        .margin(MARGIN)
        .build_cartesian_2d(x_range.clone(), y_range)
        .map_err(render_err)?;

    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(x_range.start, 0.0), (x_range.end, 0.0)],
            BLACK.mix(0.4),
        )))
        .map_err(render_err)?;
    chart
        .draw_series(LineSeries::new(points.iter().copied(), rgb(color).stroke_width(2)))
        .map_err(render_err)?;
    Ok(())
}

fn draw_bars<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, bars: &[Bar]) -> Result<(), ChartError> {
    let x_range = 0.0..bars.len().max(1) as f64;
    let y_range = with_zero(bars.iter().map(|b| b.value));

    let mut chart = ChartBuilder::on(area)
        .margin(MARGIN)
        .build_cartesian_2d(x_range.clone(), y_range)
        .map_err(render_err)?;

    chart
        .draw_series(bars.iter().enumerate().map(|(i, bar)| {
            let x = i as f64;
            Rectangle::new([(x + 0.15, 0.0), (x + 0.85, bar.value)], rgb(bar.color).filled())
        }))
        .map_err(render_err)?;
    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(x_range.start, 0.0), (x_range.end, 0.0)],
            BLACK.mix(0.6),
        )))
        .map_err(render_err)?;
    Ok(())
}

fn draw_histogram<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    bins: &[HistogramBin],
    color: SeriesColor,
) -> Result<(), ChartError> {
    let x_lo = bins.first().map_or(0.0, |b| b.lower);
    let x_hi = bins.last().map_or(1.0, |b| b.upper);
    let y_range = with_zero(bins.iter().map(|b| b.count as f64));

    let mut chart = ChartBuilder::on(area)
        .margin(MARGIN)
        .build_cartesian_2d(padded(x_lo, x_hi), y_range)
        .map_err(render_err)?;

    chart
        .draw_series(bins.iter().filter(|b| b.count > 0).map(|b| {
            Rectangle::new(
                [(b.lower, 0.0), (b.upper, b.count as f64)],
                rgb(color).mix(0.7).filled(),
            )
        }))
        .map_err(render_err)?;
    Ok(())
}

fn draw_scatter<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    points: &[ScatterPoint],
) -> Result<(), ChartError> {
    let (x_lo, x_hi) = bounds(points.iter().map(|p| p.x));
    let (y_lo, y_hi) = bounds(points.iter().map(|p| p.y));
    let x_range = padded(x_lo.min(0.0), x_hi);
    let y_range = padded(y_lo.min(0.0), y_hi.max(0.0));

    let mut chart = ChartBuilder::on(area)
        .margin(MARGIN)
        .build_cartesian_2d(x_range.clone(), y_range)
        .map_err(render_err)?;

    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(x_range.start, 0.0), (x_range.end, 0.0)],
            BLACK.mix(0.4),
        )))
        .map_err(render_err)?;
    chart
        .draw_series(points.iter().map(|p| {
            let color = if p.win { SeriesColor::Green } else { SeriesColor::Red };
            Circle::new((p.x, p.y), 5, rgb(color).mix(0.7).filled())
        }))
        .map_err(render_err)?;
    Ok(())
}
