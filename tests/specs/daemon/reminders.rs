// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for the reminder methods.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use chrono::{DateTime, Duration, Utc};
use common::*;
use serde_json::json;
use yare::parameterized;

#[test]
fn trigger_time_is_offset_from_now() {
    let temp = TempDir::new().unwrap();
    let before = Utc::now();
    let responses = exchange(
        temp.path(),
        &request("create_reminder", json!({"title": "Tea", "minutes": 10})),
    );
    let after = Utc::now();

    let response = &responses[0];
    assert_eq!(response["success"], true);
    assert_eq!(response["message"], "Reminder set for 10 minutes: Tea");
    assert_eq!(response["id"], 1);

    let trigger: DateTime<Utc> = response["trigger_time"].as_str().unwrap().parse().unwrap();
    assert!(trigger >= before + Duration::minutes(10) - Duration::seconds(1));
    assert!(trigger <= after + Duration::minutes(10) + Duration::seconds(1));
}

#[test]
fn minutes_default_to_five() {
    let temp = TempDir::new().unwrap();
    let responses = exchange(
        temp.path(),
        &request("create_reminder", json!({"title": "Stretch"})),
    );
    assert_eq!(responses[0]["message"], "Reminder set for 5 minutes: Stretch");
}

#[test]
fn zero_minutes_is_allowed() {
    let temp = TempDir::new().unwrap();
    let responses = exchange(
        temp.path(),
        &request("create_reminder", json!({"title": "Now", "minutes": 0})),
    );
    assert_eq!(responses[0]["success"], true);
}

#[parameterized(
    negative = { json!({"title": "x", "minutes": -1}) },
    empty_title = { json!({"title": "", "minutes": 1}) },
    text_minutes = { json!({"title": "x", "minutes": "ten"}) },
)]
fn invalid_reminders_are_rejected(params: serde_json::Value) {
    let temp = TempDir::new().unwrap();
    let input = [
        request("create_reminder", params),
        request("list_reminders", json!({})),
    ]
    .concat();

    let responses = exchange(temp.path(), &input);
    assert_eq!(responses[0]["kind"], "validation_error");
    assert_eq!(responses[1], json!({"success": true, "reminders": []}));
}

#[test]
fn list_and_cancel() {
    let temp = TempDir::new().unwrap();
    let input = [
        request("create_reminder", json!({"title": "later", "minutes": 30})),
        request("create_reminder", json!({"title": "sooner", "minutes": 1})),
        request("list_reminders", json!({})),
        request("cancel_reminder", json!({"reminder_id": 2})),
        request("cancel_reminder", json!({"reminder_id": 2})),
        request("list_reminders", json!({})),
        request("cancel_reminder", json!({"reminder_id": 7})),
    ]
    .concat();

    let responses = exchange(temp.path(), &input);
    let titles: Vec<&str> = responses[2]["reminders"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["sooner", "later"]);
    assert_eq!(responses[3], json!({"success": true}));
    assert_eq!(responses[4], json!({"success": true}));
    assert_eq!(responses[5]["reminders"].as_array().unwrap().len(), 1);
    assert_eq!(responses[6]["kind"], "not_found");
}
