//! Logging for the binding cache and its backends
//!
//! - Pluggable logger via the [`Logger`] trait, installed on [`crate::fbo::Logging`]
//! - Severity levels (Trace, Debug, Info, Warn, Error)
//! - Colored console output by default
//! - File and line information on ERROR entries
//!
//! Rejected bind requests are reported here and nowhere else unless the caller
//! inspects the returned `Result`, so a capturing logger is the way to observe
//! them in tests.

use colored::*;
use std::fmt;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Logger trait for custom logging implementations
///
/// # Example
///
/// ```no_run
/// use fbo_cache::fbo::log::{Logger, LogEntry};
///
/// struct FileLogger {
///     file: std::fs::File,
/// }
///
/// impl Logger for FileLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Write to file...
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    fn log(&self, entry: &LogEntry);
}

/// A single log record
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level
    pub severity: LogSeverity,

    /// Time the entry was created
    pub timestamp: SystemTime,

    /// Source tag (e.g., "fbo::BindingSet", "fbo::software")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (ERROR entries only)
    pub file: Option<&'static str>,

    /// Source line (ERROR entries only)
    pub line: Option<u32>,
}

impl LogEntry {
    /// Format the entry without colors: `[SEVERITY] [source] message (file:line)`
    pub fn format_plain(&self) -> String {
        match (self.file, self.line) {
            (Some(file), Some(line)) => format!(
                "[{}] [{}] {} ({}:{})",
                self.severity, self.source, self.message, file, line
            ),
            _ => format!("[{}] [{}] {}", self.severity, self.source, self.message),
        }
    }
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogSeverity {
    /// Very verbose tracing (bind calls, no-op flushes)
    Trace,

    /// Development information
    Debug,

    /// Lifecycle events (hardware init/teardown, backend registration)
    Info,

    /// Recoverable problems
    Warn,

    /// Rejected requests and failures, reported with file:line
    Error,
}

impl LogSeverity {
    /// Fixed-width uppercase label
    pub fn label(&self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label().trim_end())
    }
}

/// Default logger: colored console output
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let label = entry.severity.label();
        let severity_str = match entry.severity {
            LogSeverity::Trace => label.bright_black(),
            LogSeverity::Debug => label.cyan(),
            LogSeverity::Info => label.green(),
            LogSeverity::Warn => label.yellow(),
            LogSeverity::Error => label.red().bold(),
        };

        let source = entry.source.bright_blue();

        if let (Some(file), Some(line)) = (entry.file, entry.line) {
            println!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp,
                severity_str,
                source,
                entry.message,
                file,
                line
            );
        } else {
            println!(
                "[{}] [{}] [{}] {}",
                timestamp,
                severity_str,
                source,
                entry.message
            );
        }
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message
///
/// ```no_run
/// fbo_cache::fbo_trace!("fbo::BindingSet", "flush skipped, set is clean");
/// ```
#[macro_export]
macro_rules! fbo_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::fbo::Logging::log(
            $crate::fbo::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message
#[macro_export]
macro_rules! fbo_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::fbo::Logging::log(
            $crate::fbo::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message
///
/// ```no_run
/// fbo_cache::fbo_info!("fbo::BackendRegistry", "Registered backend '{}'", "software");
/// ```
#[macro_export]
macro_rules! fbo_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::fbo::Logging::log(
            $crate::fbo::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message
#[macro_export]
macro_rules! fbo_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::fbo::Logging::log(
            $crate::fbo::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
#[macro_export]
macro_rules! fbo_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::fbo::Logging::log_detailed(
            $crate::fbo::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

/// Log an ERROR message and evaluate to `Error::BackendError` carrying it
///
/// ```no_run
/// # fn activate() -> fbo_cache::fbo::Result<()> {
/// let attached: Option<u32> = None;
/// attached.ok_or_else(|| fbo_cache::fbo_err!("fbo::software", "no attachment"))?;
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! fbo_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::fbo::Logging::log_detailed(
            $crate::fbo::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::fbo::Error::BackendError(message)
    }};
}

/// Log an ERROR message and return early with `Err(Error::BackendError)`
#[macro_export]
macro_rules! fbo_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::fbo_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
