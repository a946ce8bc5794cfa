//! Sweep orchestration across a range of concurrency levels

use crate::{
    error::{AppError, Result},
    logging::Logger,
    models::{AggregatedPoint, BenchmarkRequest, SweepSeries},
    output::SummaryFormatter,
    runner::LoadGenerator,
    stats::robust_average,
};

/// Parameters for one full sweep.
///
/// Kept as an explicit value rather than process-wide state so controllers can
/// be exercised deterministically with a fake generator.
#[derive(Debug, Clone)]
pub struct SweepPlan {
    /// Base URL of the service under test
    pub target_url: String,

    /// First concurrency level (inclusive)
    pub start: u32,

    /// Upper bound of the concurrency range (exclusive, never tested)
    pub end: u32,

    /// Increment between consecutive levels
    pub step: u32,

    /// Run duration per level, e.g. "10s"
    pub duration: String,

    /// Repetitions per level; must be at least 3 so the aggregator can trim
    pub rounds: u32,

    /// Generator worker threads, fixed across the whole sweep
    pub threads: u32,

    /// Optional warmup duration forwarded to the generator
    pub warmup: Option<String>,
}

impl SweepPlan {
    /// Check the plan invariants before any process is launched.
    pub fn validate(&self) -> Result<()> {
        if self.step == 0 {
            return Err(AppError::config("sweep step must be greater than 0"));
        }
        if self.start >= self.end {
            return Err(AppError::config(format!(
                "sweep start ({}) must be below its end ({})",
                self.start, self.end
            )));
        }
        if self.rounds < crate::defaults::MIN_ROUNDS {
            return Err(AppError::config(format!(
                "rounds must be at least {} so one outlier can be trimmed from each end, got {}",
                crate::defaults::MIN_ROUNDS,
                self.rounds
            )));
        }
        if self.threads == 0 {
            return Err(AppError::config("thread count must be greater than 0"));
        }
        Ok(())
    }

    /// The concurrency levels this plan visits, in ascending order.
    /// The range is half-open: `end` itself is never tested.
    pub fn levels(&self) -> Vec<u32> {
        debug_assert!(self.step > 0);
        (self.start..self.end).step_by(self.step as usize).collect()
    }

    fn request_for(&self, concurrency: u32) -> BenchmarkRequest {
        BenchmarkRequest {
            target_url: self.target_url.clone(),
            concurrency,
            duration: self.duration.clone(),
            threads: self.threads,
            rounds: self.rounds,
            warmup: self.warmup.clone(),
        }
    }
}

/// Drives one benchmark run per concurrency level and accumulates the
/// aggregated trend.
pub struct SweepController<G> {
    generator: G,
    logger: Logger,
}

impl<G: LoadGenerator> SweepController<G> {
    /// Create a controller over the given generator
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            logger: Logger::default(),
        }
    }

    /// Attach a logger for per-step progress output
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Run the full sweep.
    ///
    /// Steps execute strictly one after another: each generator process must
    /// exit and have its output consumed before the next level is launched,
    /// since concurrent load injections against the same target would corrupt
    /// measurement isolation. Any step failure aborts the whole sweep; a
    /// partial trend line is not a usable result.
    pub async fn sweep(&self, plan: &SweepPlan) -> Result<SweepSeries> {
        plan.validate()?;

        let levels = plan.levels();
        self.logger.info(format!(
            "sweeping {} against {} levels {:?} ({} rounds of {} each)",
            plan.target_url,
            levels.len(),
            levels,
            plan.rounds,
            plan.duration
        ));

        let formatter = SummaryFormatter::new(false);
        let mut series = SweepSeries::new();

        for concurrency in levels {
            self.logger.info(format!("benchmarking at {} connections", concurrency));

            let request = plan.request_for(concurrency);
            let records = self.generator.run(&request).await?;

            let latencies: Vec<f64> = records.iter().map(|r| r.latency_avg).collect();
            let throughputs: Vec<f64> = records.iter().map(|r| r.requests_avg).collect();

            let point = AggregatedPoint {
                concurrency,
                latency_ms: robust_average(&latencies)?,
                requests_per_sec: robust_average(&throughputs)?,
            };

            self.logger.debug(formatter.format_point(&point));
            series.push(point);
        }

        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RunRecord;
    use async_trait::async_trait;
    use serde_json::Map;
    use std::sync::Mutex;

    fn plan(start: u32, end: u32, step: u32) -> SweepPlan {
        SweepPlan {
            target_url: "http://127.0.0.1:8080".to_string(),
            start,
            end,
            step,
            duration: "1s".to_string(),
            rounds: 5,
            threads: 4,
            warmup: None,
        }
    }

    fn record(latency_avg: f64, requests_avg: f64) -> RunRecord {
        RunRecord {
            latency_avg,
            requests_avg,
            extra: Map::new(),
        }
    }

    /// Returns the same canned records for every level and remembers the
    /// concurrency levels it was asked to run.
    struct FakeGenerator {
        records: Vec<RunRecord>,
        seen_levels: Mutex<Vec<u32>>,
        fail_at: Option<u32>,
    }

    impl FakeGenerator {
        fn new(records: Vec<RunRecord>) -> Self {
            Self {
                records,
                seen_levels: Mutex::new(Vec::new()),
                fail_at: None,
            }
        }

        fn failing_at(mut self, level: u32) -> Self {
            self.fail_at = Some(level);
            self
        }
    }

    #[async_trait]
    impl LoadGenerator for FakeGenerator {
        async fn run(&self, request: &BenchmarkRequest) -> Result<Vec<RunRecord>> {
            self.seen_levels.lock().unwrap().push(request.concurrency);
            if self.fail_at == Some(request.concurrency) {
                return Err(AppError::record_parse("stub parse failure"));
            }
            Ok(self.records.clone())
        }
    }

    #[test]
    fn levels_are_half_open() {
        assert_eq!(
            plan(60, 100, 5).levels(),
            vec![60, 65, 70, 75, 80, 85, 90, 95]
        );
        // end is excluded even when it falls on a step boundary
        assert_eq!(plan(10, 30, 10).levels(), vec![10, 20]);
        assert_eq!(plan(1, 2, 1).levels(), vec![1]);
    }

    #[test]
    fn plan_validation_catches_bad_ranges() {
        assert!(plan(60, 100, 5).validate().is_ok());
        assert!(plan(60, 100, 0).validate().is_err());
        assert!(plan(100, 100, 5).validate().is_err());
        assert!(plan(100, 60, 5).validate().is_err());

        let mut too_few_rounds = plan(60, 100, 5);
        too_few_rounds.rounds = 2;
        let error = too_few_rounds.validate().unwrap_err();
        assert_eq!(error.category(), "CONFIG");

        let mut zero_threads = plan(60, 100, 5);
        zero_threads.threads = 0;
        assert!(zero_threads.validate().is_err());
    }

    #[tokio::test]
    async fn sweep_aggregates_each_level() {
        let generator = FakeGenerator::new(vec![
            record(1.0, 200.0),
            record(2.0, 100.0),
            record(3.0, 300.0),
            record(4.0, 400.0),
            record(100.0, 50.0),
        ]);
        let controller = SweepController::new(generator);

        let series = controller.sweep(&plan(10, 30, 10)).await.unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.concurrency, vec![10, 20]);
        // latency samples trim to [2, 3, 4]; throughput samples to [100, 200, 300]
        assert_eq!(series.latency_ms, vec![3.0, 3.0]);
        assert_eq!(series.requests_per_sec, vec![200.0, 200.0]);
    }

    #[tokio::test]
    async fn sweep_runs_levels_in_ascending_order() {
        let generator = FakeGenerator::new(vec![
            record(1.0, 1.0),
            record(2.0, 2.0),
            record(3.0, 3.0),
        ]);
        let controller = SweepController::new(generator);

        controller.sweep(&plan(60, 100, 5)).await.unwrap();

        let seen = controller.generator.seen_levels.lock().unwrap().clone();
        assert_eq!(seen, vec![60, 65, 70, 75, 80, 85, 90, 95]);
    }

    #[tokio::test]
    async fn a_step_failure_aborts_the_whole_sweep() {
        let generator = FakeGenerator::new(vec![
            record(1.0, 1.0),
            record(2.0, 2.0),
            record(3.0, 3.0),
        ])
        .failing_at(70);
        let controller = SweepController::new(generator);

        let error = controller.sweep(&plan(60, 100, 5)).await.unwrap_err();
        assert_eq!(error.category(), "RECORD");

        // fail-fast: the failing level was the last one attempted
        let seen = controller.generator.seen_levels.lock().unwrap().clone();
        assert_eq!(seen, vec![60, 65, 70]);
    }

    #[tokio::test]
    async fn too_few_records_surface_as_insufficient_samples() {
        let generator = FakeGenerator::new(vec![record(1.0, 1.0), record(2.0, 2.0)]);
        let controller = SweepController::new(generator);

        let error = controller.sweep(&plan(10, 20, 10)).await.unwrap_err();
        assert_eq!(error.category(), "SAMPLES");
    }

    #[tokio::test]
    async fn invalid_plan_launches_nothing() {
        let generator = FakeGenerator::new(vec![]);
        let controller = SweepController::new(generator);

        let mut bad = plan(60, 100, 5);
        bad.rounds = 1;
        assert!(controller.sweep(&bad).await.is_err());

        assert!(controller.generator.seen_levels.lock().unwrap().is_empty());
    }
}
