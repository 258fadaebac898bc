// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use serde_json::json;
use tempfile::TempDir;
use yare::parameterized;

fn state() -> (ServerState, TempDir) {
    let temp = TempDir::new().unwrap();
    let state = ServerState::new(temp.path()).unwrap();
    (state, temp)
}

#[tokio::test]
async fn insert_then_read_back() {
    let (state, _temp) = state();

    state
        .apply(
            Table::Workouts,
            ApplyAction::Insert,
            "w1",
            Some(json!({"id": "w1", "name": "bLeg Day/b", "duration_minutes": 45})),
        )
        .await
        .unwrap();

    let row = state.row(Table::Workouts, "w1").await.unwrap().unwrap();
    assert_eq!(row["name"], "bLeg Day/b");
    assert_eq!(row["duration_minutes"], 45);
    assert_eq!(row["calories"], Value::Null);
}

#[tokio::test]
async fn replayed_insert_is_an_upsert() {
    let (state, _temp) = state();
    for name in ["Squat", "Back Squat"] {
        state
            .apply(
                Table::Exercises,
                ApplyAction::Insert,
                "e1",
                Some(json!({"name": name, "sets": 5, "weight": 100.5})),
            )
            .await
            .unwrap();
    }

    let row = state.row(Table::Exercises, "e1").await.unwrap().unwrap();
    assert_eq!(row["name"], "Back Squat");
    assert_eq!(row["weight"], 100.5);
}

#[tokio::test]
async fn updates_apply_in_order() {
    let (state, _temp) = state();
    state
        .apply(
            Table::Workouts,
            ApplyAction::Insert,
            "w2",
            Some(json!({"name": "Push", "duration_minutes": 30})),
        )
        .await
        .unwrap();

    for minutes in [45, 60] {
        state
            .apply(
                Table::Workouts,
                ApplyAction::Update,
                "w2",
                Some(json!({"duration_minutes": minutes})),
            )
            .await
            .unwrap();
    }

    let row = state.row(Table::Workouts, "w2").await.unwrap().unwrap();
    assert_eq!(row["duration_minutes"], 60);
    assert_eq!(row["name"], "Push");
}

#[tokio::test]
async fn delete_missing_row_succeeds() {
    let (state, _temp) = state();
    state
        .apply(Table::Workouts, ApplyAction::Delete, "ghost", None)
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_removes_row() {
    let (state, _temp) = state();
    state
        .apply(
            Table::Workouts,
            ApplyAction::Insert,
            "w1",
            Some(json!({"name": "Legs"})),
        )
        .await
        .unwrap();

    state
        .apply(Table::Workouts, ApplyAction::Delete, "w1", None)
        .await
        .unwrap();

    assert!(state.row(Table::Workouts, "w1").await.unwrap().is_none());
}

#[parameterized(
    insert_without_name = { ApplyAction::Insert, "w1", Some(json!({"notes": "no name"})) },
    insert_blank_name = { ApplyAction::Insert, "w1", Some(json!({"name": "  "})) },
    update_missing_row = { ApplyAction::Update, "missing", Some(json!({"calories": 100})) },
    update_blank_name = { ApplyAction::Update, "missing", Some(json!({"name": ""})) },
    unknown_field = { ApplyAction::Insert, "w1", Some(json!({"name": "Legs", "admin": true})) },
    empty_id = { ApplyAction::Delete, "", None },
)]
fn permanent_rejections(action: ApplyAction, id: &str, fields: Option<Value>) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    runtime.block_on(async {
        let (state, _temp) = state();
        let err = state
            .apply(Table::Workouts, action, id, fields)
            .await
            .unwrap_err();
        assert!(matches!(err, ApplyError::Invalid(_)), "got {err:?}");
        assert!(!err.is_retryable());
    });
}

#[test]
fn storage_errors_are_retryable() {
    let err = ApplyError::from(rusqlite::Error::QueryReturnedNoRows);
    assert!(err.is_retryable());
}
