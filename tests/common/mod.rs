//! Common test utilities for protracker integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't pollute
//! the user's real data directory.

#![allow(dead_code)]

use assert_cmd::Command;
pub use tempfile::TempDir;

/// A test environment with isolated data storage.
///
/// Each `TestEnv` creates two temporary directories:
/// - `work_dir`: the working directory commands run in
/// - `data_dir`: holds the persisted document (via `PT_DATA_DIR` env var)
///
/// The `pt()` method returns a `Command` that sets `PT_DATA_DIR`
/// per-invocation, making tests parallel-safe.
pub struct TestEnv {
    pub work_dir: TempDir,
    pub data_dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment with isolated directories.
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().unwrap(),
            data_dir: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the pt binary with isolated data directory.
    pub fn pt(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_pt"));
        cmd.current_dir(self.work_dir.path());
        cmd.env("PT_DATA_DIR", self.data_dir.path());
        cmd
    }

    /// Get the path to the working directory.
    pub fn work_path(&self) -> &std::path::Path {
        self.work_dir.path()
    }

    /// Get the path to the data directory.
    pub fn data_path(&self) -> &std::path::Path {
        self.data_dir.path()
    }

    /// Get the path to the persisted document.
    pub fn document_path(&self) -> std::path::PathBuf {
        self.data_dir.path().join("document.json")
    }

    /// Run a `--json` command and parse its stdout.
    pub fn pt_json(&self, args: &[&str]) -> serde_json::Value {
        let output = self
            .pt()
            .arg("--json")
            .args(args)
            .output()
            .expect("command failed to spawn");
        assert!(
            output.status.success(),
            "command {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("stdout was not valid JSON")
    }

    /// Add an entry via `--json` and return its assigned ID.
    pub fn add_and_get_id(&self, args: &[&str]) -> String {
        self.pt_json(args)["id"]
            .as_str()
            .expect("result had no id field")
            .to_string()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
