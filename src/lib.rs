//! Load Sweep
//!
//! A benchmark-sweep harness that drives a rewrk-compatible load generator
//! against a target HTTP service across a range of connection-concurrency
//! levels, reduces each level's repeated runs to a robust average, and renders
//! the latency and throughput trends as chart images.

pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod runner;
pub mod stats;
pub mod sweep;

// Re-export commonly used types
pub use chart::{render_charts, ChartSink, LineChart};
pub use error::{AppError, Result};
pub use models::{AggregatedPoint, BenchmarkRequest, RunRecord, SweepSeries};
pub use runner::{LoadGenerator, RewrkProcess};
pub use stats::robust_average;
pub use sweep::{SweepController, SweepPlan};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    pub const DEFAULT_TARGET_URL: &str = "http://127.0.0.1:8080";
    pub const DEFAULT_START: u32 = 60;
    pub const DEFAULT_END: u32 = 100;
    pub const DEFAULT_STEP: u32 = 5;
    pub const DEFAULT_DURATION: &str = "10s";
    pub const DEFAULT_ROUNDS: u32 = 5;
    pub const DEFAULT_GENERATOR: &str = "rewrk";
    pub const DEFAULT_LATENCY_CHART: &str = "./latencies.png";
    pub const DEFAULT_THROUGHPUT_CHART: &str = "./requests.png";
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    /// Minimum repetitions per level so that trimming one sample from each
    /// end still leaves data to average.
    pub const MIN_ROUNDS: u32 = 3;
}
