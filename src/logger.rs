//! Structured logging for the storefront client.
//!
//! Human-readable lines in development, JSON lines in production, with an
//! optional daily log file under the client's data directory.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

/// Log levels following RFC 5424
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    pub fn from_env() -> Self {
        std::env::var("RUST_LOG")
            .map(|s| match s.to_uppercase().as_str() {
                "TRACE" => LogLevel::Trace,
                "DEBUG" => LogLevel::Debug,
                "INFO" => LogLevel::Info,
                "WARN" => LogLevel::Warn,
                _ => LogLevel::Error,
            })
            .unwrap_or(LogLevel::Info)
    }
}

/// Structured log entry
#[derive(Debug, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub target: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Logger configuration
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub log_to_file: bool,
    pub log_to_stdout: bool,
    pub json_format: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::from_env(),
            log_to_file: true,
            log_to_stdout: true,
            json_format: cfg!(not(debug_assertions)),
        }
    }
}

/// Main logger instance
pub struct Logger {
    config: LoggerConfig,
    current_file: Mutex<Option<BufWriter<File>>>,
}

impl Logger {
    /// Initialize the logger with the given configuration
    pub fn init(app_data_dir: &Path, config: LoggerConfig) -> Result<Self, String> {
        let mut current_file = None;

        if config.log_to_file {
            let log_dir = app_data_dir.join("logs");
            std::fs::create_dir_all(&log_dir)
                .map_err(|e| format!("Failed to create log directory: {}", e))?;

            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(Self::log_file_path(&log_dir))
                .map_err(|e| format!("Failed to open log file: {}", e))?;
            current_file = Some(BufWriter::new(file));
        }

        Ok(Self {
            config,
            current_file: Mutex::new(current_file),
        })
    }

    /// Log file for today, one file per day
    fn log_file_path(log_dir: &Path) -> PathBuf {
        let date = Local::now().format("%Y-%m-%d");
        log_dir.join(format!("storefront-{}.log", date))
    }

    /// Write a log entry
    fn write(&self, entry: &LogEntry) {
        if entry.level > self.config.level {
            return;
        }

        let log_line = if self.config.json_format {
            serde_json::to_string(entry).unwrap_or_else(|_| "{}".to_string())
        } else {
            format!(
                "{} [{}] [{}] {}{}{}",
                entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
                entry.level.as_str(),
                entry.target,
                entry.message,
                entry
                    .data
                    .as_ref()
                    .map(|d| format!(" | {}", d))
                    .unwrap_or_default(),
                entry
                    .error
                    .as_ref()
                    .map(|e| format!(" | error: {}", e))
                    .unwrap_or_default()
            )
        };

        if self.config.log_to_stdout {
            match entry.level {
                LogLevel::Error | LogLevel::Warn => eprintln!("{}", log_line),
                _ => println!("{}", log_line),
            }
        }

        if self.config.log_to_file {
            if let Ok(mut guard) = self.current_file.lock() {
                if let Some(writer) = guard.as_mut() {
                    let _ = writeln!(writer, "{}", log_line);
                    let _ = writer.flush();
                }
            }
        }
    }

    /// Log an error message
    pub fn error(&self, target: &'static str, message: &str, error: Option<&str>) {
        self.write(&LogEntry {
            timestamp: Local::now(),
            level: LogLevel::Error,
            target,
            message: message.to_string(),
            data: None,
            error: error.map(String::from),
        });
    }

    /// Log a warning message with optional data
    pub fn warn(&self, target: &'static str, message: &str, data: Option<serde_json::Value>) {
        self.write(&LogEntry {
            timestamp: Local::now(),
            level: LogLevel::Warn,
            target,
            message: message.to_string(),
            data,
            error: None,
        });
    }

    /// Log an info message with optional data
    pub fn info(&self, target: &'static str, message: &str, data: Option<serde_json::Value>) {
        self.write(&LogEntry {
            timestamp: Local::now(),
            level: LogLevel::Info,
            target,
            message: message.to_string(),
            data,
            error: None,
        });
    }

    /// Log a debug message with optional data
    pub fn debug(&self, target: &'static str, message: &str, data: Option<serde_json::Value>) {
        self.write(&LogEntry {
            timestamp: Local::now(),
            level: LogLevel::Debug,
            target,
            message: message.to_string(),
            data,
            error: None,
        });
    }
}

/// Global logger instance
static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Initialize the global logger
pub fn init_global_logger(app_data_dir: &Path, config: LoggerConfig) -> Result<(), String> {
    let logger = Logger::init(app_data_dir, config)?;

    GLOBAL_LOGGER
        .set(logger)
        .map_err(|_| "Logger already initialized")?;

    Ok(())
}

/// Get the global logger instance
pub fn get_logger() -> Option<&'static Logger> {
    GLOBAL_LOGGER.get()
}

/// Convenience macros for logging
#[macro_export]
macro_rules! log_error {
    ($target:expr, $msg:expr) => {
        if let Some(logger) = $crate::logger::get_logger() {
            logger.error($target, $msg, None);
        }
    };
    ($target:expr, $msg:expr, $err:expr) => {
        if let Some(logger) = $crate::logger::get_logger() {
            logger.error($target, $msg, Some(&$err));
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($target:expr, $msg:expr) => {
        if let Some(logger) = $crate::logger::get_logger() {
            logger.warn($target, $msg, None);
        }
    };
    ($target:expr, $msg:expr, $data:expr) => {
        if let Some(logger) = $crate::logger::get_logger() {
            let opt_data: ::std::option::Option<serde_json::Value> =
                ::std::option::Option::Some($data);
            logger.warn($target, $msg, opt_data);
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($target:expr, $msg:expr) => {
        if let Some(logger) = $crate::logger::get_logger() {
            logger.info($target, $msg, None);
        }
    };
    ($target:expr, $msg:expr, $data:expr) => {
        if let Some(logger) = $crate::logger::get_logger() {
            let opt_data: ::std::option::Option<serde_json::Value> =
                ::std::option::Option::Some($data);
            logger.info($target, $msg, opt_data);
        }
    };
}

#[macro_export]
macro_rules! log_debug {
    ($target:expr, $msg:expr) => {
        if let Some(logger) = $crate::logger::get_logger() {
            logger.debug($target, $msg, None);
        }
    };
    ($target:expr, $msg:expr, $data:expr) => {
        if let Some(logger) = $crate::logger::get_logger() {
            let opt_data: ::std::option::Option<serde_json::Value> =
                ::std::option::Option::Some($data);
            logger.debug($target, $msg, opt_data);
        }
    };
}
