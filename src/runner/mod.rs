//! External load-generator invocation and output parsing
//!
//! The generator is treated as a black box: it is launched once per sweep
//! step, awaited to completion, and its stdout is decoded as one JSON run
//! record per line. Its stderr is passed through for diagnostic visibility
//! whether or not the run succeeded.

use crate::{
    error::{AppError, Result},
    logging::Logger,
    models::{BenchmarkRequest, RunRecord},
};
use async_trait::async_trait;
use tokio::process::Command;

/// Capability of producing run records for a benchmark request.
///
/// The production implementation spawns an external process; tests substitute
/// a fake that returns canned records.
#[async_trait]
pub trait LoadGenerator: Send + Sync {
    /// Execute one benchmark run and return one record per repetition.
    async fn run(&self, request: &BenchmarkRequest) -> Result<Vec<RunRecord>>;
}

/// Invokes a rewrk-compatible load generator binary.
#[derive(Debug, Clone)]
pub struct RewrkProcess {
    program: String,
    logger: Logger,
}

impl RewrkProcess {
    /// Create a runner for the given generator executable
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            logger: Logger::default(),
        }
    }

    /// Attach a logger for progress and diagnostic output
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Build the generator's command-line arguments for one request.
    pub fn build_args(request: &BenchmarkRequest) -> Vec<String> {
        let mut args = vec![
            "-h".to_string(),
            request.target_url.clone(),
            "-c".to_string(),
            request.concurrency.to_string(),
            "-d".to_string(),
            request.duration.clone(),
            "-t".to_string(),
            request.threads.to_string(),
            "--rounds".to_string(),
            request.rounds.to_string(),
            "--json".to_string(),
        ];

        if let Some(warmup) = &request.warmup {
            args.push("--warmup".to_string());
            args.push(warmup.clone());
        }

        args
    }

    /// Parse captured stdout into run records, one JSON object per non-empty
    /// line. Any line that fails to parse makes the whole run unusable.
    pub fn parse_records(stdout: &str) -> Result<Vec<RunRecord>> {
        let mut records = Vec::new();

        for line in stdout.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let record: RunRecord = serde_json::from_str(line).map_err(|e| {
                AppError::record_parse(format!("invalid run record line '{}': {}", line, e))
            })?;
            record.validate()?;
            records.push(record);
        }

        Ok(records)
    }
}

#[async_trait]
impl LoadGenerator for RewrkProcess {
    async fn run(&self, request: &BenchmarkRequest) -> Result<Vec<RunRecord>> {
        let args = Self::build_args(request);
        self.logger.debug(format!(
            "launching generator: {} {}",
            self.program,
            args.join(" ")
        ));

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .await
            .map_err(|e| {
                AppError::process_launch(format!(
                    "failed to launch load generator '{}': {}",
                    self.program, e
                ))
            })?;

        // The generator's stderr is surfaced regardless of exit status
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            self.logger.diagnostic(&self.program, stderr.trim_end());
        }

        if !output.status.success() {
            self.logger.warn(format!(
                "generator exited with {}; attempting to parse its output anyway",
                output.status
            ));
        }

        let stdout = String::from_utf8(output.stdout).map_err(|e| {
            AppError::output_decode(format!(
                "generator stdout is not valid UTF-8 text: {}",
                e
            ))
        })?;

        Self::parse_records(&stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> BenchmarkRequest {
        BenchmarkRequest {
            target_url: "http://127.0.0.1:8080".to_string(),
            concurrency: 60,
            duration: "10s".to_string(),
            threads: 12,
            rounds: 5,
            warmup: None,
        }
    }

    #[test]
    fn build_args_matches_the_generator_cli() {
        let args = RewrkProcess::build_args(&request());
        assert_eq!(
            args,
            vec![
                "-h",
                "http://127.0.0.1:8080",
                "-c",
                "60",
                "-d",
                "10s",
                "-t",
                "12",
                "--rounds",
                "5",
                "--json",
            ]
        );
    }

    #[test]
    fn build_args_forwards_warmup_when_set() {
        let mut req = request();
        req.warmup = Some("2s".to_string());
        let args = RewrkProcess::build_args(&req);
        let warmup_pos = args.iter().position(|a| a == "--warmup").unwrap();
        assert_eq!(args[warmup_pos + 1], "2s");
    }

    #[test]
    fn parse_records_reads_one_record_per_line() {
        let stdout = concat!(
            r#"{"latency_avg": 1.5, "requests_avg": 5000.0, "requests_total": 50000}"#,
            "\n",
            "\n",
            r#"{"latency_avg": 1.7, "requests_avg": 4900.0}"#,
            "\n",
        );

        let records = RewrkProcess::parse_records(stdout).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].latency_avg, 1.5);
        assert_eq!(records[1].requests_avg, 4900.0);
        assert_eq!(
            records[0].extra["requests_total"],
            serde_json::json!(50000)
        );
    }

    #[test]
    fn parse_records_fails_on_a_malformed_line() {
        let stdout = concat!(
            r#"{"latency_avg": 1.5, "requests_avg": 5000.0}"#,
            "\n",
            "thread panicked at src/main.rs",
            "\n",
        );

        let error = RewrkProcess::parse_records(stdout).unwrap_err();
        assert_eq!(error.category(), "RECORD");
        // the offending line is quoted for diagnosis
        assert!(error.to_string().contains("thread panicked"));
    }

    #[test]
    fn parse_records_fails_on_negative_metrics() {
        let stdout = r#"{"latency_avg": -3.0, "requests_avg": 5000.0}"#;
        let error = RewrkProcess::parse_records(stdout).unwrap_err();
        assert_eq!(error.category(), "RECORD");
    }

    #[test]
    fn parse_records_accepts_empty_output() {
        let records = RewrkProcess::parse_records("").unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn launch_failure_is_reported_as_such() {
        let runner = RewrkProcess::new("definitely-not-an-installed-binary-4f2a");
        let error = runner.run(&request()).await.unwrap_err();
        assert_eq!(error.category(), "LAUNCH");
        assert!(error.to_string().contains("definitely-not-an-installed-binary-4f2a"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn a_scripted_generator_round_trips() {
        use std::io::Write;
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script_path = dir.path().join("fake-rewrk");
        {
            let mut script = std::fs::File::create(&script_path).unwrap();
            writeln!(script, "#!/bin/sh").unwrap();
            writeln!(script, "echo 'diagnostics on stderr' >&2").unwrap();
            writeln!(
                script,
                r#"echo '{{"latency_avg": 2.0, "requests_avg": 100.0}}'"#
            )
            .unwrap();
            writeln!(
                script,
                r#"echo '{{"latency_avg": 2.2, "requests_avg": 98.0}}'"#
            )
            .unwrap();
            writeln!(
                script,
                r#"echo '{{"latency_avg": 2.4, "requests_avg": 96.0}}'"#
            )
            .unwrap();
        }
        let mut perms = std::fs::metadata(&script_path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&script_path, perms).unwrap();

        let runner = RewrkProcess::new(script_path.to_string_lossy().to_string());
        let records = runner.run(&request()).await.unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].latency_avg, 2.0);
        assert_eq!(records[2].requests_avg, 96.0);
    }
}
