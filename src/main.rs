//! Benchmark sweep harness - Main CLI Application
//!
//! Drives a rewrk-compatible load generator against a target HTTP service
//! across a range of concurrency levels and charts the resulting trend.

use clap::Parser;
use load_sweep::{
    chart::render_charts,
    cli::Cli,
    config::{load_config, parser::display_config_summary},
    error::{AppError, Result},
    logging::Logger,
    output::SummaryFormatter,
    runner::RewrkProcess,
    sweep::SweepController,
    PKG_NAME, VERSION,
};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(message) = cli.validate() {
        eprintln!("Error: {}", message);
        process::exit(1);
    }

    if let Err(e) = run_application(cli).await {
        eprintln!("Error: {}", e);
        print_error_suggestions(&e);
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    if cli.debug {
        println!("{} v{}", PKG_NAME, VERSION);
        println!("Debug mode enabled");
        println!();
    }

    let config = load_config(cli)?;
    let logger = Logger::from_flags(config.verbose, config.debug, config.enable_color);

    if config.debug {
        println!("Configuration loaded successfully:");
        println!("{}", display_config_summary(&config));
        println!();
    }

    let plan = config.to_plan();
    logger.info(format!(
        "starting sweep {} (levels {}..{} step {})",
        logger.correlation_id(),
        plan.start,
        plan.end,
        plan.step
    ));

    let generator = RewrkProcess::new(&config.generator).with_logger(logger.clone());
    let controller = SweepController::new(generator).with_logger(logger.clone());

    let series = controller.sweep(&plan).await?;

    let formatter = SummaryFormatter::new(config.enable_color);
    println!();
    println!("{}", formatter.format_table(&series));

    render_charts(&series, &config.latency_chart, &config.throughput_chart)?;

    println!(
        "Charts written to {} and {}",
        config.latency_chart.display(),
        config.throughput_chart.display()
    );

    Ok(())
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config(_) | AppError::Parse(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - The target URL must start with http:// or https://");
            eprintln!("  - --start must be below --end, and --step above 0");
            eprintln!("  - --rounds must be at least 3");
        }
        AppError::ProcessLaunch(_) => {
            eprintln!();
            eprintln!("Launch troubleshooting:");
            eprintln!("  - Is the load generator installed and on PATH?");
            eprintln!("  - Point --generator at the executable explicitly");
        }
        AppError::OutputDecode(_) | AppError::RecordParse(_) => {
            eprintln!();
            eprintln!("Generator output troubleshooting:");
            eprintln!("  - The generator must support --json line output");
            eprintln!("  - Check the diagnostic text above for generator errors");
        }
        AppError::InsufficientSamples(_) => {
            eprintln!();
            eprintln!("Sampling help:");
            eprintln!("  - Increase --rounds (minimum 3)");
            eprintln!("  - A generator run may have produced no records; check its output");
        }
        AppError::ChartWrite(_) => {
            eprintln!();
            eprintln!("Chart troubleshooting:");
            eprintln!("  - Check that the output directories exist and are writable");
        }
        _ => {}
    }
}
