/// Logging - process-wide logging hub
///
/// Holds the installed [`Logger`]. Binding sets, contexts, registries and
/// backends all report through it via the `fbo_*!` macros. Everything else
/// (HAL, registry, contexts) is owned explicitly by the host.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

fn logger() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

/// Logging entry points shared by the whole crate
///
/// # Example
///
/// ```no_run
/// use fbo_cache::fbo::{Logging, log::{Logger, LogEntry}};
///
/// struct FileLogger;
/// impl Logger for FileLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Write to file...
///     }
/// }
///
/// Logging::set_logger(FileLogger);
/// ```
pub struct Logging;

impl Logging {
    /// Replace the installed logger
    pub fn set_logger<L: Logger + 'static>(logger_impl: L) {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(logger_impl);
        }
    }

    /// Reinstall the DefaultLogger
    pub fn reset_logger() {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Log without source location
    ///
    /// Used by `fbo_trace!`, `fbo_debug!`, `fbo_info!` and `fbo_warn!`.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: None,
            line: None,
        });
    }

    /// Log with file:line information
    ///
    /// Used by `fbo_error!`, `fbo_err!` and `fbo_bail!`.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: Some(file),
            line: Some(line),
        });
    }

    fn dispatch(entry: LogEntry) {
        // A poisoned lock drops the entry rather than panicking inside a log call
        if let Ok(lock) = logger().read() {
            lock.log(&entry);
        }
    }
}
