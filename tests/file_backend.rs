//! 文件后端集成测试

use dual_log::{caller, emit, emit_error, emit_with, DualLogError, Logger, Properties, Severity};
use std::fs;
use std::io;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

struct InventoryService;

#[derive(Debug)]
struct WrappedError {
    message: &'static str,
    source: Option<Box<WrappedError>>,
}

impl std::fmt::Display for WrappedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message)
    }
}

impl std::error::Error for WrappedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

fn read_lines(path: &std::path::Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_error_creates_directory_and_single_line() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("logs").join("app.log");
    assert!(!path.parent().unwrap().exists());

    let logger = Logger::to_file::<InventoryService>(&path).unwrap();
    logger.error(&caller!(), "disk failure").unwrap();

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with(" - Error         - InventoryService - disk failure"));

    // 时间戳列 19 个字符，后接冒号与四个空格
    assert_eq!(&lines[0][19..24], ":    ");
}

#[test]
fn test_repeated_calls_append() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("append.log");

    let first = Logger::named_file("Jobs", &path).unwrap();
    first.info(&caller!(), "one").unwrap();
    // 重新获取同一路径不会截断已有内容
    let second = Logger::named_file("Jobs", &path).unwrap();
    second.warn(&caller!(), "two").unwrap();
    emit!(second, Severity::Debug, "{0}+{1}", 1, 2).unwrap();

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("Informational - Jobs            - one"));
    assert!(lines[1].ends_with("Warning       - Jobs            - two"));
    assert!(lines[2].ends_with("Debug         - Jobs            - 1+2"));
}

#[test]
fn test_file_mode_ignores_caller_and_properties() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("props.log");
    let logger = Logger::named_file("Billing", &path).unwrap();

    let mut props = Properties::new();
    props.insert("invoice".to_string(), serde_json::json!("INV-7"));
    emit_with!(logger, Severity::Informational, &props, "charged {0}", "12.50").unwrap();

    let lines = read_lines(&path);
    assert!(lines[0].ends_with("- Billing         - charged 12.50"));
    assert!(!lines[0].contains("INV-7"));
    assert!(!lines[0].contains("test_file_mode_ignores_caller_and_properties"));
}

#[test]
fn test_exception_chain_written_as_body() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("errors.log");
    let logger = Logger::named_file("Sync", &path).unwrap();

    let err = WrappedError {
        message: "sync failed",
        source: Some(Box::new(WrappedError {
            message: "connection reset",
            source: Some(Box::new(WrappedError {
                message: "timeout",
                source: None,
            })),
        })),
    };
    emit_error!(logger, Severity::Error, &err).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("Error         - Sync            - WrappedError: sync failed"));
    let outer = content.find("sync failed").unwrap();
    let middle = content.find("WrappedError: connection reset").unwrap();
    let inner = content.find("WrappedError: timeout").unwrap();
    assert!(outer < middle && middle < inner);
}

#[test]
fn test_blank_message_rejected_before_io() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("blank.log");
    let logger = Logger::named_file("Blank", &path).unwrap();

    let result = logger.fatal(&caller!(), "  ");
    assert!(matches!(result, Err(DualLogError::ContractViolation(_))));
    assert!(!path.exists());
}

#[test]
fn test_format_error_leaves_file_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("format.log");
    let logger = Logger::named_file("Format", &path).unwrap();

    let result = logger.info_fmt(&caller!(), "{0} {3}", &["a".to_string()]);
    assert!(matches!(result, Err(DualLogError::FormatError { .. })));
    assert!(!path.exists());
}

#[test]
fn test_unwritable_path_is_sink_write_error() {
    let temp_dir = TempDir::new().unwrap();
    let logger = Logger::named_file("Broken", temp_dir.path()).unwrap();

    let err = io::Error::new(io::ErrorKind::Other, "ignored");
    let result = logger.error_error(&caller!(), &err);
    assert!(matches!(result, Err(DualLogError::SinkWriteError { .. })));
}

#[test]
fn test_concurrent_loggers_write_intact_lines() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("shared.log");
    let logger = Arc::new(Logger::named_file("Workers", &path).unwrap());

    let handles: Vec<_> = (0..6)
        .map(|worker| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..40 {
                    logger
                        .info_fmt(
                            &caller!(),
                            "worker {0} item {1} {2}",
                            &[worker.to_string(), i.to_string(), "y".repeat(300)],
                        )
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 240);
    for line in &lines {
        assert!(line.contains("Informational - Workers         - worker "));
        assert!(line.ends_with(&"y".repeat(300)));
    }
}
