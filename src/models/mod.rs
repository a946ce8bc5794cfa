//! Data models for benchmark requests, run records and sweep series

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parameters for a single load-generator invocation at one concurrency level.
///
/// Constructed fresh for every sweep step and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkRequest {
    /// Base URL of the service under test (scheme + host + port)
    pub target_url: String,

    /// Number of concurrent connections the generator opens
    pub concurrency: u32,

    /// Run duration as understood by the generator, e.g. "10s"
    pub duration: String,

    /// Number of generator worker threads, fixed for the whole sweep
    pub threads: u32,

    /// Number of repetitions of the run (one record per repetition)
    pub rounds: u32,

    /// Optional warmup duration forwarded to the generator
    pub warmup: Option<String>,
}

/// One structured result emitted by the load generator for a single repetition.
///
/// The two required fields are the only ones the harness interprets; anything
/// else the generator emits (min/max latency, transfer rates, ...) is carried
/// along untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Average request latency in milliseconds
    pub latency_avg: f64,

    /// Average requests per second
    pub requests_avg: f64,

    /// Any additional fields the generator emitted, preserved uninterpreted
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RunRecord {
    /// Check the record invariants: both required metrics must be finite and
    /// non-negative.
    pub fn validate(&self) -> Result<()> {
        if !self.latency_avg.is_finite() || self.latency_avg < 0.0 {
            return Err(AppError::record_parse(format!(
                "latency_avg must be a non-negative number, got {}",
                self.latency_avg
            )));
        }
        if !self.requests_avg.is_finite() || self.requests_avg < 0.0 {
            return Err(AppError::record_parse(format!(
                "requests_avg must be a non-negative number, got {}",
                self.requests_avg
            )));
        }
        Ok(())
    }
}

/// The robust-average reduction of all run records for one concurrency level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregatedPoint {
    /// Concurrency level this point was measured at
    pub concurrency: u32,

    /// Trimmed-average latency in milliseconds
    pub latency_ms: f64,

    /// Trimmed-average throughput in requests per second
    pub requests_per_sec: f64,
}

/// Three parallel series accumulated over one sweep, ordered by ascending
/// concurrency. Owned exclusively by the controller until the sweep completes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepSeries {
    /// Concurrency levels (x axis)
    pub concurrency: Vec<u32>,

    /// Aggregated latency per level, in milliseconds
    pub latency_ms: Vec<f64>,

    /// Aggregated throughput per level, in requests per second
    pub requests_per_sec: Vec<f64>,
}

impl SweepSeries {
    /// Create an empty series
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one aggregated point, keeping the three series parallel
    pub fn push(&mut self, point: AggregatedPoint) {
        self.concurrency.push(point.concurrency);
        self.latency_ms.push(point.latency_ms);
        self.requests_per_sec.push(point.requests_per_sec);
    }

    /// Number of sweep steps recorded so far
    pub fn len(&self) -> usize {
        self.concurrency.len()
    }

    /// Whether any steps have been recorded
    pub fn is_empty(&self) -> bool {
        self.concurrency.is_empty()
    }

    /// Iterate the series as aggregated points
    pub fn points(&self) -> impl Iterator<Item = AggregatedPoint> + '_ {
        self.concurrency
            .iter()
            .zip(self.latency_ms.iter())
            .zip(self.requests_per_sec.iter())
            .map(|((&concurrency, &latency_ms), &requests_per_sec)| AggregatedPoint {
                concurrency,
                latency_ms,
                requests_per_sec,
            })
    }
}
