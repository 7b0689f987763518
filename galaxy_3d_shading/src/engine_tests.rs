//! Unit tests for the Engine logger facade
//!
//! IMPORTANT: the logger is a global OnceLock shared across all tests.
//! Tests replacing it are marked with #[serial]. Other tests may log
//! concurrently, so assertions only look at entries from this file's sources.

use crate::galaxy3d::Engine;
use crate::galaxy3d::log::{Logger, LogEntry, LogSeverity};
use std::sync::{Arc, Mutex};
use serial_test::serial;

const SOURCE: &str = "galaxy3d::engine_tests";

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Test logger that captures log entries for verification
#[derive(Clone)]
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn own_entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.source == SOURCE)
            .cloned()
            .collect()
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn install() -> TestLogger {
    let logger = TestLogger::new();
    Engine::set_logger(logger.clone());
    Engine::set_min_severity(LogSeverity::Trace);
    logger
}

fn restore() {
    Engine::reset_logger();
    Engine::set_min_severity(LogSeverity::Info);
}

// ============================================================================
// LOGGER TESTS
// ============================================================================

#[test]
#[serial]
fn test_custom_logger_receives_entries() {
    let logger = install();

    crate::engine_info!(SOURCE, "program {} linked", 7);

    let entries = logger.own_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, LogSeverity::Info);
    assert_eq!(entries[0].message, "program 7 linked");
    assert!(entries[0].file.is_none());

    restore();
}

#[test]
#[serial]
fn test_error_entries_carry_file_and_line() {
    let logger = install();

    crate::engine_error!(SOURCE, "link failed");

    let entries = logger.own_entries();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].file.unwrap().ends_with("engine_tests.rs"));
    assert!(entries[0].line.unwrap() > 0);

    restore();
}

#[test]
#[serial]
fn test_min_severity_filters_entries() {
    let logger = install();
    Engine::set_min_severity(LogSeverity::Warn);
    assert_eq!(Engine::min_severity(), LogSeverity::Warn);

    crate::engine_trace!(SOURCE, "trace");
    crate::engine_debug!(SOURCE, "debug");
    crate::engine_info!(SOURCE, "info");
    crate::engine_warn!(SOURCE, "warn");
    crate::engine_error!(SOURCE, "error");

    let messages: Vec<String> = logger.own_entries().into_iter().map(|e| e.message).collect();
    assert_eq!(messages, vec!["warn".to_string(), "error".to_string()]);

    restore();
}

#[test]
#[serial]
fn test_reset_logger_detaches_custom_logger() {
    let logger = install();
    restore();

    crate::engine_error!(SOURCE, "goes to the default logger");

    assert!(logger.own_entries().is_empty());
    assert_eq!(Engine::min_severity(), LogSeverity::Info);
}

#[test]
#[serial]
fn test_engine_err_logs_before_returning() {
    let logger = install();

    let err = crate::engine_err!(SOURCE, "duplicate parameter name '{}'", "Metallic");

    let entries = logger.own_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, LogSeverity::Error);
    assert_eq!(entries[0].message, "duplicate parameter name 'Metallic'");
    assert!(err.to_string().contains("Metallic"));

    restore();
}
