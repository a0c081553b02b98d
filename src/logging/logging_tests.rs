//! Tests for logging initialization.

use super::*;
use serial_test::serial;
use std::fs;

#[test]
fn split_log_path_separates_directory_and_name() {
    let (dir, name) = split_log_path(Path::new("/var/log/netfail/run.log")).unwrap();
    assert_eq!(dir, PathBuf::from("/var/log/netfail"));
    assert_eq!(name, "run.log");
}

#[test]
fn split_log_path_uses_current_directory_for_bare_name() {
    let (dir, name) = split_log_path(Path::new("netfail.log")).unwrap();
    assert_eq!(dir, PathBuf::from("."));
    assert_eq!(name, "netfail.log");
}

#[test]
fn split_log_path_rejects_path_without_file_name() {
    let result = split_log_path(Path::new("/"));
    assert!(matches!(result, Err(LoggingError::InvalidPath(_))));
}

#[test]
#[serial(tracing_init)]
fn init_creates_log_directory_if_missing() {
    let test_dir = std::env::temp_dir().join("netfail_test_logs_create");
    let log_file = test_dir.join("test.log");

    let _ = fs::remove_dir_all(&test_dir);

    // May fail if a subscriber is already set; the directory is created first
    let _ = init(&log_file);

    assert!(
        test_dir.exists(),
        "Log directory should be created: {:?}",
        test_dir
    );

    let _ = fs::remove_dir_all(&test_dir);
}

#[test]
#[serial(tracing_init)]
fn second_init_reports_subscriber_already_set() {
    let test_dir = std::env::temp_dir().join("netfail_test_logs_twice");
    let log_file = test_dir.join("twice.log");

    let _ = init(&log_file);
    let second = init(&log_file);

    assert!(matches!(second, Err(LoggingError::SubscriberAlreadySet)));

    let _ = fs::remove_dir_all(&test_dir);
}
