//! Integration tests for logger behavior.

use skill_graph::logger::{set_level, set_level_from_str, Level};
use skill_graph::{debug, error, info, verbose, warn};

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
    verbose!("verbose integration");
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_creates_parent_directories() {
    use skill_graph::logger::init_file_logging;
    use tempfile::TempDir;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("skillgraph.log");

    assert!(init_file_logging(&path));
    set_level(Level::Error);
    error!("written to file");

    let content = std::fs::read_to_string(&path).expect("log file should exist");
    assert!(content.contains("written to file"));
}
