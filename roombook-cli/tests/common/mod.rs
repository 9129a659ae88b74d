//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - Helpers that create and approve reservations through the binary

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables the CLI reads; cleared so the host cannot leak in.
const ROOMBOOK_VARS: [&str; 8] = [
    "ROOMBOOK_DATA_DIR",
    "ROOMBOOK_BUSY_TIMEOUT",
    "ROOMBOOK_DISABLE_AUTOINIT",
    "ROOMBOOK_MAXIMUM_LOCK_WAIT_SECONDS",
    "ROOMBOOK_REQUIRE_ORDERED_DATES",
    "ROOMBOOK_ALLOW_DELETE_APPROVED",
    "ROOMBOOK_OUTPUT_FORMAT",
    "ROOMBOOK_LOG_MODE",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the roombook data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; the CLI creates it on first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("roombook-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Get a command builder without `--data-dir`.
    ///
    /// Runs inside the temp directory with all `ROOMBOOK_*` variables cleared.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("roombook").expect("Failed to find roombook binary");
        cmd.current_dir(&self.temp_path);
        for var in ROOMBOOK_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file into the data directory, creating it if needed.
    pub fn write_data_file(&self, name: &str, contents: &str) {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        std::fs::write(self.data_dir.join(name), contents).expect("Failed to write file");
    }

    /// Create a reservation and return its id.
    ///
    /// # Panics
    /// Panics if the create command fails.
    pub fn create(&self, user: i64, room: i64, start: &str, end: &str) -> i64 {
        let output = self
            .command()
            .args(["create", "--user", &user.to_string(), "--room", &room.to_string()])
            .args(["--start", start, "--end", end])
            .output()
            .expect("Failed to run create command");

        assert!(
            output.status.success(),
            "Create failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let json: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("Output is not JSON");
        json["id"].as_i64().expect("Output has no id")
    }

    /// Create and approve a reservation, returning its id.
    pub fn approved(&self, user: i64, room: i64, start: &str, end: &str) -> i64 {
        let id = self.create(user, room, start, end);
        self.command()
            .args(["approve", &id.to_string()])
            .assert()
            .success();
        id
    }

    /// Run a command and parse its stdout as JSON.
    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.command().args(args).output().expect("Failed to run");
        assert!(
            output.status.success(),
            "Command {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("Output is not JSON")
    }
}
