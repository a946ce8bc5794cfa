//! Command-line interface for the sweep harness

use clap::Parser;
use std::path::PathBuf;

/// Benchmark-sweep harness driving a rewrk-compatible load generator
#[derive(Parser, Debug, Clone)]
#[command(name = "lsweep")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the service under test (scheme + host + port)
    #[arg(long = "url", default_value = crate::defaults::DEFAULT_TARGET_URL)]
    pub url: String,

    /// First concurrency level of the sweep (inclusive)
    #[arg(long, default_value_t = crate::defaults::DEFAULT_START)]
    pub start: u32,

    /// Upper bound of the concurrency sweep (exclusive)
    #[arg(long, default_value_t = crate::defaults::DEFAULT_END)]
    pub end: u32,

    /// Increment between consecutive concurrency levels
    #[arg(long, default_value_t = crate::defaults::DEFAULT_STEP)]
    pub step: u32,

    /// Duration of each benchmark run, e.g. "10s", "2m"
    #[arg(short, long, default_value = crate::defaults::DEFAULT_DURATION)]
    pub duration: String,

    /// Repetitions per concurrency level (minimum 3, so one outlier can be
    /// trimmed from each end)
    #[arg(short, long, default_value_t = crate::defaults::DEFAULT_ROUNDS)]
    pub rounds: u32,

    /// Number of generator worker threads (defaults to the CPU count)
    #[arg(short, long)]
    pub threads: Option<u32>,

    /// Warmup duration forwarded to the generator, e.g. "2s"
    #[arg(long)]
    pub warmup: Option<String>,

    /// Load generator executable to invoke
    #[arg(short, long, default_value = crate::defaults::DEFAULT_GENERATOR)]
    pub generator: String,

    /// Output path for the latency chart image
    #[arg(long, default_value = crate::defaults::DEFAULT_LATENCY_CHART)]
    pub latency_chart: PathBuf,

    /// Output path for the throughput chart image
    #[arg(long, default_value = crate::defaults::DEFAULT_THROUGHPUT_CHART)]
    pub throughput_chart: PathBuf,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        if self.latency_chart == self.throughput_chart {
            return Err("Latency and throughput charts cannot share a path".to_string());
        }

        Ok(())
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true // Force color output when --color is specified
        } else if self.no_color {
            false // Disable color output when --no-color is specified
        } else {
            supports_color() // Use automatic detection
        }
    }
}

/// Detect whether the terminal is likely to support ANSI colors
fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    true
}
