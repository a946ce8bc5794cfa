//! Error handling for the benchmark sweep harness

use thiserror::Error;

/// Custom error types for the sweep harness
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The load generator process could not be started
    #[error("Process launch error: {0}")]
    ProcessLaunch(String),

    /// Captured generator output is not valid text
    #[error("Output decode error: {0}")]
    OutputDecode(String),

    /// A line of generator output is not a valid run record
    #[error("Record parse error: {0}")]
    RecordParse(String),

    /// Fewer samples than the aggregator can trim
    #[error("Insufficient samples: {0}")]
    InsufficientSamples(String),

    /// A chart image could not be rendered or persisted
    #[error("Chart write error: {0}")]
    ChartWrite(String),

    /// Parsing errors (URLs, numbers, etc.)
    #[error("Parsing error: {0}")]
    Parse(String),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new process launch error
    pub fn process_launch<S: Into<String>>(message: S) -> Self {
        Self::ProcessLaunch(message.into())
    }

    /// Create a new output decode error
    pub fn output_decode<S: Into<String>>(message: S) -> Self {
        Self::OutputDecode(message.into())
    }

    /// Create a new record parse error
    pub fn record_parse<S: Into<String>>(message: S) -> Self {
        Self::RecordParse(message.into())
    }

    /// Create a new insufficient samples error
    pub fn insufficient_samples<S: Into<String>>(message: S) -> Self {
        Self::InsufficientSamples(message.into())
    }

    /// Create a new chart write error
    pub fn chart_write<S: Into<String>>(message: S) -> Self {
        Self::ChartWrite(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::ProcessLaunch(_) => "LAUNCH",
            Self::OutputDecode(_) => "DECODE",
            Self::RecordParse(_) => "RECORD",
            Self::InsufficientSamples(_) => "SAMPLES",
            Self::ChartWrite(_) => "CHART",
            Self::Parse(_) => "PARSE",
            Self::Io(_) => "IO",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Whether the error aborts an in-progress sweep with no partial result.
    /// Chart writes happen after the sweep and are isolated per chart.
    pub fn aborts_sweep(&self) -> bool {
        !matches!(self, Self::ChartWrite(_))
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Parse(_) => 1, // Invalid configuration/usage
            Self::ProcessLaunch(_) => 2,           // Generator could not start
            Self::OutputDecode(_) | Self::RecordParse(_) => 3, // Generator output unusable
            Self::InsufficientSamples(_) => 4,     // Aggregation impossible
            Self::ChartWrite(_) | Self::Io(_) => 5, // Artifact/file issues
            Self::Internal(_) => 99,               // Internal/unexpected errors
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Config(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::ProcessLaunch(_) | Self::OutputDecode(_) | Self::RecordParse(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::InsufficientSamples(_) => {
                    format!("[{}] {}", category.blue().bold(), message.blue())
                }
                Self::ChartWrite(_) | Self::Io(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
                Self::Internal(_) => {
                    format!("[{}] {}", category.bright_red().bold(), message.bright_red())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

// Standard library error conversions
impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(error: url::ParseError) -> Self {
        Self::parse(format!("URL parse error: {}", error))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::record_parse(format!("JSON parse error: {}", error))
    }
}

impl From<std::string::FromUtf8Error> for AppError {
    fn from(error: std::string::FromUtf8Error) -> Self {
        Self::output_decode(error.to_string())
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::parse(format!("Integer parse error: {}", error))
    }
}

impl From<std::num::ParseFloatError> for AppError {
    fn from(error: std::num::ParseFloatError) -> Self {
        Self::parse(format!("Float parse error: {}", error))
    }
}

// Anyhow integration
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::internal(error.to_string())
    }
}

/// Custom Result type for the application
pub type Result<T> = std::result::Result<T, AppError>;
