// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Queueing tests: mutations made while offline stay queued, sanitized and
//! in order.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::common::*;
use yare::parameterized;

#[test]
fn workout_create_offline_is_queued() {
    let temp = init_temp();

    liftlog()
        .args(["workout", "create", "w1", "--name", "Leg Day", "--duration", "45"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Queued create_workout w1"))
        .stdout(predicate::str::contains("Offline: will sync when connected"));

    let status = status_json(temp.path());
    assert_eq!(status["pending"], 1);
    assert_eq!(status["completed"], 0);
    assert_eq!(status["isOnline"], false);
}

#[test]
fn unreachable_remote_counts_as_offline() {
    // Port 1 is never listening in test environments.
    let temp = init_temp_with_remote("ws://127.0.0.1:1");

    liftlog()
        .args(["workout", "create", "w1", "--name", "Push"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Offline"));

    assert_eq!(status_json(temp.path())["isOnline"], false);
}

#[test]
fn payload_is_sanitized_before_queueing() {
    let temp = init_temp();

    liftlog()
        .args(["workout", "create", "w1", "--name", "<b>Leg Day</b>"])
        .current_dir(temp.path())
        .assert()
        .success();

    let records = list_json(temp.path());
    assert_eq!(records.len(), 1);
    let payload: serde_json::Value =
        serde_json::from_str(records[0]["payload"].as_str().unwrap()).unwrap();
    assert_eq!(payload["name"], "bLeg Day/b");
    assert_eq!(payload["id"], "w1");
}

#[test]
fn enqueue_drops_unknown_fields() {
    let temp = init_temp();

    liftlog()
        .args(["enqueue", "create_exercise", "e1", "--data"])
        .arg(r#"{"name":"Squat","sets":"5","admin":true}"#)
        .current_dir(temp.path())
        .assert()
        .success();

    let records = list_json(temp.path());
    let payload: serde_json::Value =
        serde_json::from_str(records[0]["payload"].as_str().unwrap()).unwrap();
    assert_eq!(payload["sets"], 5);
    assert!(payload.get("admin").is_none());
}

#[test]
fn mutations_are_listed_in_enqueue_order() {
    let temp = init_temp();

    for args in [
        vec!["workout", "create", "w1", "--name", "Legs"],
        vec!["exercise", "create", "e1", "--workout", "w1", "--name", "Squat"],
        vec!["workout", "update", "w1", "--calories", "300"],
        vec!["exercise", "delete", "e1"],
    ] {
        liftlog()
            .args(args)
            .current_dir(temp.path())
            .assert()
            .success();
    }

    let operations: Vec<String> = list_json(temp.path())
        .iter()
        .map(|r| r["operation"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        operations,
        vec![
            "create_workout",
            "create_exercise",
            "update_workout",
            "delete_exercise"
        ]
    );
}

#[test]
fn list_filters_by_status() {
    let temp = init_temp();
    liftlog()
        .args(["workout", "create", "w1", "--name", "Legs"])
        .current_dir(temp.path())
        .assert()
        .success();

    liftlog()
        .args(["list", "--status", "failed"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Queue is empty"));

    liftlog()
        .args(["list", "--status", "pending"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("create_workout"));
}

#[test]
fn list_rejects_unknown_status() {
    let temp = init_temp();

    liftlog()
        .args(["list", "--status", "done"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid queue status"));
}

#[parameterized(
    not_json = { "{name" },
    array = { "[1, 2]" },
    string = { "\"Leg Day\"" },
)]
fn enqueue_rejects_bad_payload(data: &str) {
    let temp = init_temp();

    liftlog()
        .args(["enqueue", "create_workout", "w1", "--data", data])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid JSON payload"));

    assert_eq!(status_json(temp.path())["pending"], 0);
}

#[test]
fn enqueue_rejects_unknown_operation() {
    let temp = init_temp();

    liftlog()
        .args(["enqueue", "drop_table", "w1"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid operation"));
}

#[test]
fn status_text_output() {
    let temp = init_temp();

    liftlog()
        .arg("status")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending:   0"))
        .stdout(predicate::str::contains("Online:    no"));
}
