//! Shared utilities for integration tests.

use std::fs;
use std::path::PathBuf;

/// Write a status document to a per-test, per-process temp file.
pub fn write_document(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "rotation-status-it-{}-{}.toml",
        name,
        std::process::id()
    ));
    fs::write(&path, content).unwrap();
    path
}
