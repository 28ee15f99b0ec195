//! Common utilities for CLI E2E tests.

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::Duration;

use tempfile::TempDir;

/// Isolated config directory for one test.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    pub fn stats_path(&self) -> PathBuf {
        self.dir.path().join("stats.json")
    }

    /// Invoke a CLI command and return (stdout, stderr, exit code).
    pub fn run_cli(&self, args: &[&str]) -> (String, String, i32) {
        self.run_cli_with_input(args, "")
    }

    /// Invoke a CLI command with the given stdin.
    pub fn run_cli_with_input(&self, args: &[&str], input: &str) -> (String, String, i32) {
        self.run_cli_with_timed_input(args, &[(Duration::ZERO, input)])
    }

    /// Invoke a CLI command, writing each chunk of stdin after its delay.
    /// Stdin is closed after the last chunk.
    pub fn run_cli_with_timed_input(
        &self,
        args: &[&str],
        chunks: &[(Duration, &str)],
    ) -> (String, String, i32) {
        let mut child = Command::new(env!("CARGO_BIN_EXE_ttm"))
            .arg("--config")
            .arg(self.config_path())
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to execute CLI command");

        let mut stdin = child.stdin.take().expect("stdin is piped");
        for (delay, chunk) in chunks {
            thread::sleep(*delay);
            stdin
                .write_all(chunk.as_bytes())
                .expect("Failed to write stdin");
            stdin.flush().expect("Failed to flush stdin");
        }
        drop(stdin);

        let output = child.wait_with_output().expect("Failed to wait for CLI");
        split_output(output)
    }

    /// Invoke a CLI command and expect success.
    pub fn run_cli_success(&self, args: &[&str]) -> String {
        let (stdout, stderr, code) = self.run_cli(args);
        if code != 0 && !stderr.is_empty() {
            eprintln!("CLI error output: {}", stderr);
        }
        assert_eq!(code, 0, "CLI command failed with code {}: {:?}", code, args);
        stdout
    }

    /// Invoke a CLI command and expect failure.
    pub fn run_cli_failure(&self, args: &[&str]) -> (String, String, i32) {
        let (stdout, stderr, code) = self.run_cli(args);
        assert!(code != 0, "CLI command unexpectedly succeeded: {:?}", args);
        (stdout, stderr, code)
    }
}

fn split_output(output: Output) -> (String, String, i32) {
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);
    (stdout, stderr, code)
}

/// Parse JSON output from CLI.
pub fn parse_json<T: for<'de> serde::Deserialize<'de>>(json: &str) -> T {
    serde_json::from_str(json).expect("Failed to parse JSON output")
}

/// Check if string contains substring
pub fn assert_contains(haystack: &str, needle: &str) {
    assert!(
        haystack.contains(needle),
        "Expected '{}' to contain '{}'",
        haystack, needle
    );
}
