//! Shared test harness for `ugit` integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

/// Captured output from running a command.
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Discover the path to the compiled `ugit` binary.
pub fn ugit_bin() -> PathBuf {
    let mut path = std::env::current_exe()
        .unwrap()
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf();
    path.push("ugit");
    path
}

/// Run `ugit` in `dir` with the given arguments.
pub fn ugit(dir: &Path, args: &[&str]) -> CommandResult {
    let output = Command::new(ugit_bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run ugit");
    CommandResult {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(128),
    }
}

pub fn assert_success(result: &CommandResult) {
    assert_eq!(
        result.exit_code, 0,
        "expected success, got exit {}\nstderr: {}",
        result.exit_code, result.stderr
    );
}

pub fn assert_failure(result: &CommandResult) {
    assert_ne!(result.exit_code, 0, "expected failure, command succeeded");
}
