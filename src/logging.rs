//! Diagnostics logging collaborator.
//!
//! A small named logger handed to the setup pass so that every per-variable
//! notice flows through one place. Output goes to `tracing`; an atomic level
//! filter decides which messages are emitted at all, so an embedding host can
//! quiet the notices (or turn them on mid-run) without touching the
//! subscriber.

use std::sync::{
    Arc,
    atomic::{AtomicU8, Ordering},
};
use tracing::Level;

/// Severity of a diagnostics log message.
///
/// The level is stored as a u8 for atomic filtering:
/// 0=Debug, 1=Info, 2=Warning, 3=Error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

/// Atomic minimum-level filter shared between loggers.
pub struct LogLevelFilter(AtomicU8);

impl LogLevelFilter {
    /// Create a new filter with the given minimum level.
    pub fn new(level: LogLevel) -> Self {
        Self(AtomicU8::new(level_to_u8(level)))
    }

    /// Get the current minimum level.
    pub fn get(&self) -> LogLevel {
        u8_to_level(self.0.load(Ordering::Relaxed))
    }

    /// Set the minimum level.
    pub fn set(&self, level: LogLevel) {
        self.0.store(level_to_u8(level), Ordering::Relaxed);
    }

    /// Check if a message at the given level should be logged.
    pub fn should_log(&self, level: LogLevel) -> bool {
        level_to_u8(level) >= self.0.load(Ordering::Relaxed)
    }
}

impl Default for LogLevelFilter {
    fn default() -> Self {
        Self::new(LogLevel::Debug)
    }
}

/// Convert LogLevel to u8 for atomic storage.
fn level_to_u8(level: LogLevel) -> u8 {
    match level {
        LogLevel::Debug => 0,
        LogLevel::Info => 1,
        LogLevel::Warning => 2,
        LogLevel::Error => 3,
    }
}

/// Convert u8 back to LogLevel.
fn u8_to_level(val: u8) -> LogLevel {
    match val {
        0 => LogLevel::Debug,
        1 => LogLevel::Info,
        2 => LogLevel::Warning,
        _ => LogLevel::Error,
    }
}

/// Convert a diagnostics level to a tracing level.
fn to_tracing_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warning => Level::WARN,
        LogLevel::Error => Level::ERROR,
    }
}

/// Named logger backed by `tracing`.
///
/// Clones share the level filter, so adjusting one adjusts all of them.
#[derive(Clone)]
pub struct Logger {
    /// Minimum level to log.
    level_filter: Arc<LogLevelFilter>,
    /// Logger name/category.
    name: Option<String>,
}

impl Logger {
    /// Create a new logger that passes every level through to `tracing`.
    pub fn new() -> Self {
        Self {
            level_filter: Arc::new(LogLevelFilter::default()),
            name: None,
        }
    }

    /// Set the logger name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the level filter.
    pub fn with_level_filter(mut self, filter: Arc<LogLevelFilter>) -> Self {
        self.level_filter = filter;
        self
    }

    /// Log a message if it passes the level filter.
    pub fn log(&self, level: LogLevel, message: &str) {
        if !self.level_filter.should_log(level) {
            return;
        }

        match to_tracing_level(level) {
            Level::ERROR => {
                if let Some(ref name) = self.name {
                    tracing::error!(logger = %name, "{}", message);
                } else {
                    tracing::error!("{}", message);
                }
            }
            Level::WARN => {
                if let Some(ref name) = self.name {
                    tracing::warn!(logger = %name, "{}", message);
                } else {
                    tracing::warn!("{}", message);
                }
            }
            Level::INFO => {
                if let Some(ref name) = self.name {
                    tracing::info!(logger = %name, "{}", message);
                } else {
                    tracing::info!("{}", message);
                }
            }
            _ => {
                if let Some(ref name) = self.name {
                    tracing::debug!(logger = %name, "{}", message);
                } else {
                    tracing::debug!("{}", message);
                }
            }
        }
    }

    /// Log a debug message.
    pub fn debug(&self, msg: &str) {
        self.log(LogLevel::Debug, msg);
    }

    /// Log an info message.
    pub fn info(&self, msg: &str) {
        self.log(LogLevel::Info, msg);
    }

    /// Log a warning message.
    pub fn warning(&self, msg: &str) {
        self.log(LogLevel::Warning, msg);
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        self.log(LogLevel::Error, msg);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
