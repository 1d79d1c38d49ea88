// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for the task methods.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use common::*;
use serde_json::json;
use yare::parameterized;

#[test]
fn create_list_complete() {
    let temp = TempDir::new().unwrap();
    let input = [
        request("create_task", json!({"title": "Buy milk"})),
        request("list_tasks", json!({})),
        request("complete_task", json!({"task_id": 1})),
        request("list_tasks", json!({})),
    ]
    .concat();

    assert_eq!(
        exchange(temp.path(), &input),
        vec![
            json!({"success": true, "message": "Task created: Buy milk (ID: 1)", "id": 1}),
            json!({"success": true, "tasks": [{"id": 1, "title": "Buy milk", "priority": "medium"}]}),
            json!({"success": true}),
            json!({"success": true, "tasks": []}),
        ]
    );
}

#[test]
fn tasks_survive_restart() {
    let temp = TempDir::new().unwrap();
    exchange(
        temp.path(),
        &request("create_task", json!({"title": "Persist", "priority": "high"})),
    );

    let responses = exchange(temp.path(), &request("list_tasks", json!({})));
    assert_eq!(
        responses[0],
        json!({"success": true, "tasks": [{"id": 1, "title": "Persist", "priority": "high"}]})
    );
}

#[test]
fn ids_keep_increasing_across_restarts() {
    let temp = TempDir::new().unwrap();
    exchange(temp.path(), &request("create_task", json!({"title": "a"})));
    exchange(temp.path(), &request("complete_task", json!({"task_id": 1})));

    let responses = exchange(temp.path(), &request("create_task", json!({"title": "b"})));
    assert_eq!(responses[0]["id"], 2);
}

#[test]
fn completing_twice_succeeds() {
    let temp = TempDir::new().unwrap();
    let input = [
        request("create_task", json!({"title": "once"})),
        request("complete_task", json!({"task_id": 1})),
        request("complete_task", json!({"task_id": 1})),
    ]
    .concat();

    let responses = exchange(temp.path(), &input);
    assert_eq!(responses[2], json!({"success": true}));
}

#[test]
fn completing_unknown_task_is_not_found() {
    let temp = TempDir::new().unwrap();
    let responses = exchange(temp.path(), &request("complete_task", json!({"task_id": 99})));
    assert_eq!(responses[0]["success"], false);
    assert_eq!(responses[0]["kind"], "not_found");
}

#[parameterized(
    empty_title = { json!({"title": ""}) },
    blank_title = { json!({"title": "   "}) },
    missing_title = { json!({}) },
    bad_priority = { json!({"title": "x", "priority": "critical"}) },
)]
fn invalid_tasks_are_rejected(params: serde_json::Value) {
    let temp = TempDir::new().unwrap();
    let input = [
        request("create_task", params),
        request("list_tasks", json!({})),
    ]
    .concat();

    let responses = exchange(temp.path(), &input);
    assert_eq!(responses[0]["kind"], "validation_error");
    assert_eq!(responses[1], json!({"success": true, "tasks": []}));
}

#[test]
fn pending_tasks_are_listed_in_id_order() {
    let temp = TempDir::new().unwrap();
    let input = [
        request("create_task", json!({"title": "one", "priority": "low"})),
        request("create_task", json!({"title": "two", "priority": "high"})),
        request("create_task", json!({"title": "three"})),
        request("complete_task", json!({"task_id": 2})),
        request("list_tasks", json!({})),
    ]
    .concat();

    let responses = exchange(temp.path(), &input);
    assert_eq!(
        responses[4]["tasks"],
        json!([
            {"id": 1, "title": "one", "priority": "low"},
            {"id": 3, "title": "three", "priority": "medium"},
        ])
    );
}
