//! Chart rendering for sweep results
//!
//! Charts are a terminal side-effecting sink: two line charts over the same
//! x axis (concurrency), persisted as standalone image files. The sink is a
//! trait so tests can substitute an in-memory recorder for the real renderer.

use crate::{
    error::{AppError, Result},
    models::SweepSeries,
};
use plotters::prelude::*;
use std::path::Path;

/// A sink that plots one y-series against one x-series and persists the
/// result at the given path.
pub trait ChartSink {
    fn render(&self, x: &[u32], y: &[f64], path: &Path) -> Result<()>;
}

/// Renders a single line chart as a PNG image.
#[derive(Debug, Clone)]
pub struct LineChart {
    title: String,
    x_label: String,
    y_label: String,
}

impl LineChart {
    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
        }
    }

    /// Chart of aggregated latency against concurrency
    pub fn latency() -> Self {
        Self::new("Benchmark Results", "Connection Concurrency", "Latency / ms")
    }

    /// Chart of aggregated throughput against concurrency
    pub fn throughput() -> Self {
        Self::new(
            "Benchmark Results",
            "Connection Concurrency",
            "Requests Per Second",
        )
    }
}

impl ChartSink for LineChart {
    fn render(&self, x: &[u32], y: &[f64], path: &Path) -> Result<()> {
        if x.is_empty() {
            return Err(AppError::chart_write(format!(
                "no data points to plot for '{}'",
                path.display()
            )));
        }
        if x.len() != y.len() {
            return Err(AppError::chart_write(format!(
                "series length mismatch for '{}': {} x values vs {} y values",
                path.display(),
                x.len(),
                y.len()
            )));
        }

        let describe = |e: &dyn std::fmt::Display| {
            AppError::chart_write(format!("failed to render '{}': {}", path.display(), e))
        };

        let x_min = f64::from(*x.first().unwrap_or(&0));
        let mut x_max = f64::from(*x.last().unwrap_or(&0));
        if x_max <= x_min {
            x_max = x_min + 1.0;
        }

        let y_max = y.iter().fold(0.0_f64, |acc, &v| acc.max(v));
        let y_range = 0.0..(y_max * 1.1).max(1.0);

        let root = BitMapBackend::new(path, (960, 720)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| describe(&e))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(self.title.as_str(), ("sans-serif", 28))
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(64)
            .build_cartesian_2d(x_min..x_max, y_range)
            .map_err(|e| describe(&e))?;

        chart
            .configure_mesh()
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .draw()
            .map_err(|e| describe(&e))?;

        let points = x.iter().zip(y.iter()).map(|(&c, &v)| (f64::from(c), v));
        chart
            .draw_series(LineSeries::new(points, &BLUE))
            .map_err(|e| describe(&e))?;

        root.present().map_err(|e| describe(&e))?;
        Ok(())
    }
}

/// Render both trend charts through the given sinks.
///
/// The two writes are independent: a failure of one never prevents the
/// attempt on the other. If either failed, an error is still returned once
/// both have been tried.
pub fn render_both(
    latency_sink: &dyn ChartSink,
    throughput_sink: &dyn ChartSink,
    series: &SweepSeries,
    latency_path: &Path,
    throughput_path: &Path,
) -> Result<()> {
    let latency = latency_sink.render(&series.concurrency, &series.latency_ms, latency_path);
    let throughput =
        throughput_sink.render(&series.concurrency, &series.requests_per_sec, throughput_path);

    match (latency, throughput) {
        (Ok(()), Ok(())) => Ok(()),
        (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
        (Err(a), Err(b)) => Err(AppError::chart_write(format!("{}; {}", a, b))),
    }
}

/// Render the latency and throughput charts with the default PNG line charts.
pub fn render_charts(
    series: &SweepSeries,
    latency_path: &Path,
    throughput_path: &Path,
) -> Result<()> {
    render_both(
        &LineChart::latency(),
        &LineChart::throughput(),
        series,
        latency_path,
        throughput_path,
    )
}
