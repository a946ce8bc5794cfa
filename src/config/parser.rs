//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    config::SweepConfig,
    error::{AppError, Result},
};
use std::path::Path;

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration.
    ///
    /// Precedence, lowest to highest: built-in defaults, `.env` file,
    /// process environment, CLI arguments.
    pub fn parse(&self) -> Result<SweepConfig> {
        let mut config = SweepConfig::default();

        self.load_env_file()?;
        config.merge_from_env()?;
        self.apply_cli_overrides(&mut config);

        config.validate()?;

        Ok(config)
    }

    /// Load .env file if it exists
    fn load_env_file(&self) -> Result<()> {
        if Path::new(".env").exists() {
            dotenv::from_filename(".env")
                .map_err(|e| AppError::config(format!("Failed to load .env file: {}", e)))?;

            if self.cli.debug {
                println!("Loaded configuration from .env file");
            }
        }

        Ok(())
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut SweepConfig) {
        if self.cli.url != crate::defaults::DEFAULT_TARGET_URL {
            config.target_url = self.cli.url.clone();
        }

        if self.cli.start != crate::defaults::DEFAULT_START {
            config.start = self.cli.start;
        }

        if self.cli.end != crate::defaults::DEFAULT_END {
            config.end = self.cli.end;
        }

        if self.cli.step != crate::defaults::DEFAULT_STEP {
            config.step = self.cli.step;
        }

        if self.cli.duration != crate::defaults::DEFAULT_DURATION {
            config.duration = self.cli.duration.clone();
        }

        if self.cli.rounds != crate::defaults::DEFAULT_ROUNDS {
            config.rounds = self.cli.rounds;
        }

        if let Some(threads) = self.cli.threads {
            config.threads = threads;
        }

        if let Some(ref warmup) = self.cli.warmup {
            config.warmup = Some(warmup.clone());
        }

        if self.cli.generator != crate::defaults::DEFAULT_GENERATOR {
            config.generator = self.cli.generator.clone();
        }

        if self.cli.latency_chart != Path::new(crate::defaults::DEFAULT_LATENCY_CHART) {
            config.latency_chart = self.cli.latency_chart.clone();
        }

        if self.cli.throughput_chart != Path::new(crate::defaults::DEFAULT_THROUGHPUT_CHART) {
            config.throughput_chart = self.cli.throughput_chart.clone();
        }

        config.enable_color = self.cli.use_colors();
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<SweepConfig> {
    let parser = ConfigParser::new(cli);
    parser.parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &SweepConfig) -> String {
    let mut summary = Vec::new();

    summary.push(format!("Target URL: {}", config.target_url));
    summary.push(format!(
        "Concurrency: {}..{} step {}",
        config.start, config.end, config.step
    ));
    summary.push(format!("Duration: {}", config.duration));
    summary.push(format!("Rounds: {}", config.rounds));
    summary.push(format!("Threads: {}", config.threads));
    summary.push(format!(
        "Warmup: {}",
        config.warmup.as_deref().unwrap_or("none")
    ));
    summary.push(format!("Generator: {}", config.generator));
    summary.push(format!("Latency chart: {}", config.latency_chart.display()));
    summary.push(format!(
        "Throughput chart: {}",
        config.throughput_chart.display()
    ));
    summary.push(format!("Color Output: {}", config.enable_color));

    summary.join("\n")
}
