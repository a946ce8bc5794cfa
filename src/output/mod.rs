//! Terminal summary output for completed sweeps

use crate::models::{AggregatedPoint, SweepSeries};
use colored::Colorize;

/// Formats sweep results as a plain or colored table.
pub struct SummaryFormatter {
    enable_color: bool,
}

impl SummaryFormatter {
    pub fn new(enable_color: bool) -> Self {
        Self { enable_color }
    }

    /// One-line progress summary for a single aggregated point
    pub fn format_point(&self, point: &AggregatedPoint) -> String {
        format!(
            "c={:<4} latency {:>10.3} ms   throughput {:>12.1} req/s",
            point.concurrency, point.latency_ms, point.requests_per_sec
        )
    }

    /// Full results table for a completed sweep
    pub fn format_table(&self, series: &SweepSeries) -> String {
        let mut out = String::new();

        let header = format!(
            "{:>12} | {:>14} | {:>16}",
            "Concurrency", "Latency (ms)", "Requests/sec"
        );
        let separator = "-".repeat(header.len());

        if self.enable_color {
            out.push_str(&header.cyan().bold().to_string());
        } else {
            out.push_str(&header);
        }
        out.push('\n');
        out.push_str(&separator);
        out.push('\n');

        for point in series.points() {
            out.push_str(&format!(
                "{:>12} | {:>14.3} | {:>16.1}\n",
                point.concurrency, point.latency_ms, point.requests_per_sec
            ));
        }

        out
    }
}
