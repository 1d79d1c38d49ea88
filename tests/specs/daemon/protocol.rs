// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for the execd line protocol: framing, envelope, error kinds.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use common::*;
use predicates::prelude::*;
use serde_json::json;
use yare::parameterized;

#[test]
fn empty_stdin_exits_cleanly_without_output() {
    let temp = TempDir::new().unwrap();
    execd(temp.path())
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn every_response_is_one_line() {
    let temp = TempDir::new().unwrap();
    let input = [
        request("list_tasks", json!({})),
        "garbage\n".to_string(),
        "\n".to_string(),
        request("nope", json!({})),
    ]
    .concat();

    let output = execd(temp.path()).write_stdin(input).output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.ends_with('\n'));
    assert_eq!(stdout.lines().count(), 4);
}

#[test]
fn malformed_line_is_isolated() {
    let temp = TempDir::new().unwrap();
    let input = format!("not json\n{}", request("list_tasks", json!({})));
    let responses = exchange(temp.path(), &input);

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["success"], false);
    assert_eq!(responses[0]["kind"], "decode_error");
    assert_eq!(responses[1], json!({"success": true, "tasks": []}));
}

#[test]
fn unknown_method_is_reported_and_loop_continues() {
    let temp = TempDir::new().unwrap();
    let input = [
        request("fly_to_moon", json!({})),
        request("list_tasks", json!({})),
    ]
    .concat();
    let responses = exchange(temp.path(), &input);

    assert_eq!(
        responses[0],
        json!({"success": false, "error": "Unknown method: fly_to_moon", "kind": "unknown_method"})
    );
    assert_eq!(responses[1]["success"], true);
}

#[parameterized(
    blank = { "\n" },
    array = { "[]\n" },
    missing_method = { "{\"params\":{}}\n" },
    numeric_method = { "{\"method\":7}\n" },
    string_params = { "{\"method\":\"list_tasks\",\"params\":\"x\"}\n" },
)]
fn undecodable_lines(line: &str) {
    let temp = TempDir::new().unwrap();
    let responses = exchange(temp.path(), line);
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["kind"], "decode_error");
}

#[test]
fn invalid_utf8_is_a_decode_error() {
    let temp = TempDir::new().unwrap();
    let mut input = b"{\"method\":\"".to_vec();
    input.extend_from_slice(&[0xff, 0xfe]);
    input.extend_from_slice(b"\"}\n");

    let output = execd(temp.path()).write_stdin(input).output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let response: serde_json::Value = serde_json::from_str(stdout.trim_end()).unwrap();
    assert_eq!(response["kind"], "decode_error");
}

#[test]
fn logs_stay_off_stdout() {
    let temp = TempDir::new().unwrap();
    let output = execd(temp.path())
        .env("RUST_LOG", "debug")
        .write_stdin(request("list_tasks", json!({})))
        .output()
        .unwrap();

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, "{\"success\":true,\"tasks\":[]}\n");
    assert!(temp.path().join("execd.log").exists());
}

#[test]
fn state_dir_from_environment() {
    let temp = TempDir::new().unwrap();
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("execd");
    cmd.env("EXECD_STATE_DIR", temp.path())
        .write_stdin(request("take_note", json!({"content": "env"})))
        .assert()
        .success();

    assert!(temp.path().join("notes.md").exists());
}

#[test]
fn config_file_overrides_file_names() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("config.toml"),
        "notes_file = \"journal.md\"\n",
    )
    .unwrap();

    let responses = exchange(
        temp.path(),
        &request("take_note", json!({"content": "configured"})),
    );
    assert_eq!(responses[0]["success"], true);
    assert!(temp.path().join("journal.md").exists());
    assert!(!temp.path().join("notes.md").exists());
}

#[test]
fn invalid_config_fails_startup() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.toml"), "bogus_key = 1\n").unwrap();

    execd(temp.path())
        .write_stdin(request("list_tasks", json!({})))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}
