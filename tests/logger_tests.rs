//! Integration tests for logger behavior.

use gradebook::logger::{init_file_logging, set_level, set_level_from_str, Level};
use gradebook::{debug, error, info, warn};
use std::fs;
use tempfile::TempDir;

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("warn"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("debug"));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
}

#[test]
fn file_logging_writes_tagged_lines() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("gradebook.log");

    assert!(init_file_logging(&path));
    error!("store file unreadable");

    let content = fs::read_to_string(&path).expect("log file should exist");
    assert!(content.contains("[ERROR] store file unreadable"));
}
