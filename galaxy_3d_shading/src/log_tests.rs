//! Unit tests for log.rs
//!
//! Tests LogSeverity, LogEntry and DefaultLogger formatting.

use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use serial_test::serial;
use std::time::SystemTime;

fn entry(severity: LogSeverity, file: Option<&'static str>, line: Option<u32>) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "galaxy3d::Material".to_string(),
        message: "replaced parameter 'Roughness'".to_string(),
        file,
        line,
    }
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_labels_are_fixed_width() {
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        assert_eq!(severity.label().len(), 5);
    }
    assert_eq!(LogSeverity::Info.label().trim(), "INFO");
}

// ============================================================================
// LOG ENTRY TESTS
// ============================================================================

#[test]
fn test_log_entry_clone() {
    let entry1 = entry(LogSeverity::Warn, Some("material.rs"), Some(10));
    let entry2 = entry1.clone();

    assert_eq!(entry1.severity, entry2.severity);
    assert_eq!(entry1.source, entry2.source);
    assert_eq!(entry1.message, entry2.message);
    assert_eq!(entry1.file, entry2.file);
    assert_eq!(entry1.line, entry2.line);
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_format_plain_without_location() {
    let line = DefaultLogger::format_plain(&entry(LogSeverity::Debug, None, None));
    assert!(line.contains("[DEBUG]"));
    assert!(line.contains("[galaxy3d::Material]"));
    assert!(line.ends_with("replaced parameter 'Roughness'"));
}

#[test]
fn test_format_plain_with_location() {
    let line = DefaultLogger::format_plain(&entry(LogSeverity::Error, Some("material.rs"), Some(42)));
    assert!(line.contains("[ERROR]"));
    assert!(line.ends_with("(material.rs:42)"));
}

#[test]
fn test_format_plain_timestamp_shape() {
    let line = DefaultLogger::format_plain(&entry(LogSeverity::Info, None, None));
    // [YYYY-MM-DD HH:MM:SS.mmm]
    let close = line.find(']').unwrap();
    assert_eq!(close, 24);
    assert_eq!(&line[11..12], " ");
}

#[test]
#[serial]
fn test_colored_line_matches_plain_for_every_severity() {
    colored::control::set_override(false);
    for (severity, file, line) in [
        (LogSeverity::Info, None, None),
        (LogSeverity::Error, Some("material.rs"), Some(42)),
    ] {
        let record = entry(severity, file, line);
        assert_eq!(DefaultLogger::format_colored(&record), DefaultLogger::format_plain(&record));
    }
    colored::control::unset_override();
}

#[test]
fn test_default_logger_does_not_panic() {
    let logger = DefaultLogger;
    logger.log(&entry(LogSeverity::Trace, None, None));
    logger.log(&entry(LogSeverity::Error, Some("material.rs"), Some(1)));
}
