// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Not every spec file uses every helper.
#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::path::Path;

pub use tempfile::TempDir;

pub fn execd(state_dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("execd");
    cmd.arg("--state-dir").arg(state_dir).env_remove("RUST_LOG");
    cmd
}

/// Pipe `input` through a fresh daemon and parse every response line.
pub fn exchange(state_dir: &Path, input: &str) -> Vec<Value> {
    let output = execd(state_dir).write_stdin(input).output().unwrap();
    assert!(output.status.success(), "execd exited with {}", output.status);

    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

/// Build one request line.
pub fn request(method: &str, params: Value) -> String {
    let mut line = serde_json::json!({"method": method, "params": params}).to_string();
    line.push('\n');
    line
}
