//! Sweep configuration model and validation

pub mod parser;

pub use parser::{load_config, ConfigParser};

use crate::{
    error::{AppError, Result},
    sweep::SweepPlan,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete, validated configuration for one sweep invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Base URL of the service under test
    pub target_url: String,

    /// First concurrency level (inclusive)
    pub start: u32,

    /// Upper bound of the concurrency range (exclusive)
    pub end: u32,

    /// Increment between consecutive levels
    pub step: u32,

    /// Run duration per level
    pub duration: String,

    /// Repetitions per level
    pub rounds: u32,

    /// Generator worker threads
    pub threads: u32,

    /// Optional warmup duration forwarded to the generator
    pub warmup: Option<String>,

    /// Load generator executable
    pub generator: String,

    /// Output path for the latency chart
    pub latency_chart: PathBuf,

    /// Output path for the throughput chart
    pub throughput_chart: PathBuf,

    /// Enable colored terminal output
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            target_url: crate::defaults::DEFAULT_TARGET_URL.to_string(),
            start: crate::defaults::DEFAULT_START,
            end: crate::defaults::DEFAULT_END,
            step: crate::defaults::DEFAULT_STEP,
            duration: crate::defaults::DEFAULT_DURATION.to_string(),
            rounds: crate::defaults::DEFAULT_ROUNDS,
            threads: default_threads(),
            warmup: None,
            generator: crate::defaults::DEFAULT_GENERATOR.to_string(),
            latency_chart: PathBuf::from(crate::defaults::DEFAULT_LATENCY_CHART),
            throughput_chart: PathBuf::from(crate::defaults::DEFAULT_THROUGHPUT_CHART),
            enable_color: crate::defaults::DEFAULT_ENABLE_COLOR,
            verbose: false,
            debug: false,
        }
    }
}

/// One generator thread per CPU, never zero
fn default_threads() -> u32 {
    num_cpus::get().max(1) as u32
}

impl SweepConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        if self.target_url.is_empty() {
            return Err(AppError::config("Target URL cannot be empty"));
        }

        match url::Url::parse(&self.target_url) {
            Ok(parsed) => {
                if parsed.scheme() != "http" && parsed.scheme() != "https" {
                    return Err(AppError::config(format!(
                        "Target URL must use http or https: {}",
                        self.target_url
                    )));
                }
            }
            Err(e) => {
                return Err(AppError::config(format!(
                    "Invalid target URL '{}': {}",
                    self.target_url, e
                )));
            }
        }

        if self.step == 0 {
            return Err(AppError::config("Step must be greater than 0"));
        }

        if self.start >= self.end {
            return Err(AppError::config(format!(
                "Concurrency start ({}) must be below end ({})",
                self.start, self.end
            )));
        }

        if self.rounds < crate::defaults::MIN_ROUNDS {
            return Err(AppError::config(format!(
                "Rounds must be at least {} (got {}); the aggregator trims one sample from each end",
                crate::defaults::MIN_ROUNDS,
                self.rounds
            )));
        }

        if self.threads == 0 {
            return Err(AppError::config("Thread count must be greater than 0"));
        }

        validate_duration(&self.duration)
            .map_err(|e| AppError::config(format!("Invalid duration '{}': {}", self.duration, e)))?;

        if let Some(warmup) = &self.warmup {
            validate_duration(warmup)
                .map_err(|e| AppError::config(format!("Invalid warmup '{}': {}", warmup, e)))?;
        }

        if self.generator.is_empty() {
            return Err(AppError::config("Generator executable cannot be empty"));
        }

        if self.latency_chart == self.throughput_chart {
            return Err(AppError::config(
                "Latency and throughput charts cannot share a path",
            ));
        }

        Ok(())
    }

    /// Build the sweep plan this configuration describes
    pub fn to_plan(&self) -> SweepPlan {
        SweepPlan {
            target_url: self.target_url.clone(),
            start: self.start,
            end: self.end,
            step: self.step,
            duration: self.duration.clone(),
            rounds: self.rounds,
            threads: self.threads,
            warmup: self.warmup.clone(),
        }
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("SWEEP_TARGET_URL") {
            self.target_url = url;
        }
        if let Ok(start) = std::env::var("SWEEP_START") {
            self.start = parse_env_u32("SWEEP_START", &start)?;
        }
        if let Ok(end) = std::env::var("SWEEP_END") {
            self.end = parse_env_u32("SWEEP_END", &end)?;
        }
        if let Ok(step) = std::env::var("SWEEP_STEP") {
            self.step = parse_env_u32("SWEEP_STEP", &step)?;
        }
        if let Ok(duration) = std::env::var("SWEEP_DURATION") {
            self.duration = duration;
        }
        if let Ok(rounds) = std::env::var("SWEEP_ROUNDS") {
            self.rounds = parse_env_u32("SWEEP_ROUNDS", &rounds)?;
        }
        if let Ok(threads) = std::env::var("SWEEP_THREADS") {
            self.threads = parse_env_u32("SWEEP_THREADS", &threads)?;
        }
        if let Ok(warmup) = std::env::var("SWEEP_WARMUP") {
            self.warmup = Some(warmup);
        }
        if let Ok(generator) = std::env::var("SWEEP_GENERATOR") {
            self.generator = generator;
        }
        if let Ok(path) = std::env::var("SWEEP_LATENCY_CHART") {
            self.latency_chart = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("SWEEP_THROUGHPUT_CHART") {
            self.throughput_chart = PathBuf::from(path);
        }
        Ok(())
    }
}

fn parse_env_u32(name: &str, value: &str) -> Result<u32> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|e| AppError::config(format!("{} must be an unsigned integer: {}", name, e)))
}

/// Check a duration string of the form `<integer><unit>` with unit one of
/// ms, s, m, h. This is the subset of the generator's duration syntax the
/// harness passes through.
fn validate_duration(value: &str) -> std::result::Result<(), String> {
    let digits: String = value.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err("must start with a number".to_string());
    }

    let amount: u64 = digits
        .parse()
        .map_err(|e| format!("unreadable amount: {}", e))?;
    if amount == 0 {
        return Err("must be greater than zero".to_string());
    }

    match &value[digits.len()..] {
        "ms" | "s" | "m" | "h" => Ok(()),
        "" => Err("missing unit (ms, s, m or h)".to_string()),
        other => Err(format!("unknown unit '{}'", other)),
    }
}
