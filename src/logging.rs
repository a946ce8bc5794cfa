//! Structured logging for the sweep harness
//!
//! Timestamped, level-filtered log lines on stderr, tagged with a per-sweep
//! correlation id so output from different sweeps can be told apart when runs
//! are redirected into the same log file.

use chrono::Utc;
use colored::Colorize;
use uuid::Uuid;

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Debug level - detailed information for debugging
    Debug = 0,
    /// Info level - general progress information
    Info = 1,
    /// Warning level - potentially harmful situations
    Warn = 2,
    /// Error level - failures
    Error = 3,
}

impl LogLevel {
    /// Get log level name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Lightweight logger handed to every component of one sweep.
#[derive(Debug, Clone)]
pub struct Logger {
    min_level: LogLevel,
    enable_color: bool,
    correlation_id: Uuid,
}

impl Logger {
    /// Create a logger with an explicit minimum level
    pub fn new(min_level: LogLevel, enable_color: bool) -> Self {
        Self {
            min_level,
            enable_color,
            correlation_id: Uuid::new_v4(),
        }
    }

    /// Derive the log level from the CLI verbosity flags
    pub fn from_flags(verbose: bool, debug: bool, enable_color: bool) -> Self {
        let min_level = if debug {
            LogLevel::Debug
        } else if verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        };
        Self::new(min_level, enable_color)
    }

    /// Correlation id attached to every line this logger emits
    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message.as_ref());
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message.as_ref());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message.as_ref());
    }

    /// Emit pass-through diagnostic text (the generator's stderr), one line at
    /// a time, bypassing level filtering. This is always visible, even for a
    /// run that succeeded.
    pub fn diagnostic(&self, source: &str, text: &str) {
        for line in text.lines() {
            if self.enable_color {
                eprintln!("{} {}", format!("{}:", source).dimmed(), line);
            } else {
                eprintln!("{}: {}", source, line);
            }
        }
    }

    fn log(&self, level: LogLevel, message: &str) {
        if level < self.min_level {
            return;
        }

        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
        let short_id = &self.correlation_id.to_string()[..8];

        if self.enable_color {
            let tag = match level {
                LogLevel::Debug => level.as_str().cyan(),
                LogLevel::Info => level.as_str().green(),
                LogLevel::Warn => level.as_str().yellow(),
                LogLevel::Error => level.as_str().red(),
            };
            eprintln!("[{}] [{}] [{}] {}", timestamp, tag, short_id, message);
        } else {
            eprintln!(
                "[{}] [{}] [{}] {}",
                timestamp,
                level.as_str(),
                short_id,
                message
            );
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Warn, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names() {
        assert_eq!(LogLevel::Debug.as_str(), "DEBUG");
        assert_eq!(LogLevel::Info.as_str(), "INFO");
        assert_eq!(LogLevel::Warn.as_str(), "WARN");
        assert_eq!(LogLevel::Error.as_str(), "ERROR");
    }

    #[test]
    fn level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn flags_select_the_minimum_level() {
        assert_eq!(Logger::from_flags(false, false, false).min_level, LogLevel::Warn);
        assert_eq!(Logger::from_flags(true, false, false).min_level, LogLevel::Info);
        // debug wins over verbose
        assert_eq!(Logger::from_flags(true, true, false).min_level, LogLevel::Debug);
    }

    #[test]
    fn each_logger_gets_its_own_correlation_id() {
        let a = Logger::default();
        let b = Logger::default();
        assert_ne!(a.correlation_id(), b.correlation_id());
    }

    #[test]
    fn logging_does_not_panic() {
        let logger = Logger::new(LogLevel::Debug, true);
        logger.debug("debug line");
        logger.info("info line");
        logger.warn("warn line");
        logger.error("error line");
        logger.diagnostic("generator", "line one\nline two");
    }
}
