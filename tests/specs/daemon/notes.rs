// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `take_note` and `search_notes`.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use common::*;
use serde_json::json;

#[test]
fn note_then_search() {
    let temp = TempDir::new().unwrap();
    let input = [
        request("take_note", json!({"content": "hello world"})),
        request("search_notes", json!({"query": "HELLO"})),
    ]
    .concat();

    let responses = exchange(temp.path(), &input);
    let message = responses[0]["message"].as_str().unwrap();
    assert!(message.starts_with("Note saved to "));
    assert!(message.ends_with("notes.md"));
    assert_eq!(
        responses[1],
        json!({
            "success": true,
            "results": [{"filename": "notes.md", "line": 3, "context": "hello world"}]
        })
    );
}

#[test]
fn log_keeps_entry_format() {
    let temp = TempDir::new().unwrap();
    exchange(temp.path(), &request("take_note", json!({"content": "first"})));
    exchange(temp.path(), &request("take_note", json!({"content": "second"})));

    let log = std::fs::read_to_string(temp.path().join("notes.md")).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], "");
    assert!(lines[1].starts_with("## "));
    assert_eq!(lines[2], "first");
    assert_eq!(lines[3], "---");
    assert_eq!(lines[6], "second");
    assert_eq!(lines[7], "---");
}

#[test]
fn search_on_empty_store_succeeds() {
    let temp = TempDir::new().unwrap();
    let responses = exchange(temp.path(), &request("search_notes", json!({"query": "x"})));
    assert_eq!(responses[0], json!({"success": true, "results": []}));
}

#[test]
fn search_is_limited() {
    let temp = TempDir::new().unwrap();
    let mut input: String = (0..7)
        .map(|i| request("take_note", json!({"content": format!("entry {i}")})))
        .collect();
    input.push_str(&request("search_notes", json!({"query": "entry"})));
    input.push_str(&request("search_notes", json!({"query": "entry", "limit": 2})));

    let responses = exchange(temp.path(), &input);
    let default_hits = responses[7]["results"].as_array().unwrap();
    assert_eq!(default_hits.len(), 5);
    assert_eq!(default_hits[0]["context"], "entry 0");
    assert_eq!(responses[8]["results"].as_array().unwrap().len(), 2);
}

#[test]
fn empty_note_is_appended() {
    let temp = TempDir::new().unwrap();
    let responses = exchange(temp.path(), &request("take_note", json!({"content": ""})));
    assert_eq!(responses[0]["success"], true);

    let log = std::fs::read_to_string(temp.path().join("notes.md")).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("## "));
    assert_eq!(lines[2], "");
    assert_eq!(lines[3], "---");
}

#[test]
fn missing_content_is_rejected() {
    let temp = TempDir::new().unwrap();
    let responses = exchange(temp.path(), &request("take_note", json!({})));
    assert_eq!(responses[0]["kind"], "validation_error");
    assert!(!temp.path().join("notes.md").exists());
}

#[test]
fn empty_query_returns_leading_lines() {
    let temp = TempDir::new().unwrap();
    let input = [
        request("take_note", json!({"content": "first"})),
        request("take_note", json!({"content": "second"})),
        request("search_notes", json!({"query": ""})),
    ]
    .concat();

    let responses = exchange(temp.path(), &input);
    let hits = responses[2]["results"].as_array().unwrap();
    let lines: Vec<i64> = hits.iter().map(|h| h["line"].as_i64().unwrap()).collect();
    assert_eq!(lines, vec![1, 2, 3, 4, 5]);
    assert_eq!(hits[2]["context"], "first");
}
