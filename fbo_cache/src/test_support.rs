/// Test helpers shared by the unit tests (compiled only for tests)

use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};
use crate::logging::Logging;
use crate::log::{Logger, LogEntry, LogSeverity};

/// Logger that keeps the entries emitted by one thread
///
/// Unit tests run on separate threads, so filtering on the installing thread
/// keeps entries from concurrently running tests out of the capture.
struct CaptureLogger {
    thread: ThreadId,
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        if thread::current().id() == self.thread {
            self.entries.lock().unwrap().push(entry.clone());
        }
    }
}

/// Installs a capturing logger; restores the default logger on drop
///
/// Tests using this must be `#[serial]` since the logger is process-global.
pub struct LogCapture {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl LogCapture {
    pub fn install() -> Self {
        let entries = Arc::new(Mutex::new(Vec::new()));
        Logging::set_logger(CaptureLogger {
            thread: thread::current().id(),
            entries: entries.clone(),
        });
        Self { entries }
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn count(&self, severity: LogSeverity) -> usize {
        self.entries.lock().unwrap().iter().filter(|e| e.severity == severity).count()
    }
}

impl Drop for LogCapture {
    fn drop(&mut self) {
        Logging::reset_logger();
    }
}
