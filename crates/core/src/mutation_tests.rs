// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::entity::{ExerciseFields, WorkoutFields};
use yare::parameterized;

fn record(operation: OperationType, record_id: &str, payload: &str) -> MutationRecord {
    MutationRecord {
        id: 1,
        operation,
        table: operation.table(),
        record_id: record_id.to_string(),
        payload: payload.to_string(),
        enqueued_at: Utc::now(),
        retry_count: 0,
        status: MutationStatus::Pending,
        last_error: None,
        completed_at: None,
    }
}

#[parameterized(
    snake_case = { "create_workout", OperationType::CreateWorkout },
    kebab_case = { "update-exercise", OperationType::UpdateExercise },
    mixed_case = { "Delete_Workout", OperationType::DeleteWorkout },
)]
fn operation_from_str(input: &str, expected: OperationType) {
    assert_eq!(input.parse::<OperationType>().unwrap(), expected);
}

#[test]
fn operation_from_str_rejects_unknown() {
    assert!(matches!(
        "drop_table".parse::<OperationType>(),
        Err(Error::InvalidOperation(_))
    ));
}

#[test]
fn operation_round_trips_through_verb_and_kind() {
    for op in OperationType::ALL {
        assert_eq!(OperationType::new(op.verb(), op.kind()), op);
        assert_eq!(op.as_str().parse::<OperationType>().unwrap(), op);
    }
}

#[parameterized(
    create_workout = { OperationType::CreateWorkout, Table::Workouts },
    delete_workout = { OperationType::DeleteWorkout, Table::Workouts },
    update_exercise = { OperationType::UpdateExercise, Table::Exercises },
)]
fn operation_table(op: OperationType, expected: Table) {
    assert_eq!(op.table(), expected);
}

#[parameterized(
    pending = { "pending", MutationStatus::Pending },
    syncing = { "syncing", MutationStatus::Syncing },
    completed = { "completed", MutationStatus::Completed },
    failed = { "FAILED", MutationStatus::Failed },
)]
fn status_from_str(input: &str, expected: MutationStatus) {
    assert_eq!(input.parse::<MutationStatus>().unwrap(), expected);
}

#[test]
fn decode_create_uses_record_id() {
    let rec = record(OperationType::CreateWorkout, "w1", r#"{"name":"Legs"}"#);
    let mutation = rec.decode().unwrap();
    assert_eq!(
        mutation,
        Mutation::Create(EntityFields::Workout(WorkoutFields {
            id: Some("w1".into()),
            name: Some("Legs".into()),
            ..Default::default()
        }))
    );
    assert_eq!(mutation.table(), Table::Workouts);
}

#[test]
fn decode_update_is_a_patch() {
    let rec = record(OperationType::UpdateExercise, "e1", r#"{"reps":12}"#);
    match rec.decode().unwrap() {
        Mutation::Update { id, patch } => {
            assert_eq!(id, "e1");
            assert_eq!(
                patch,
                EntityFields::Exercise(ExerciseFields {
                    id: Some("e1".into()),
                    reps: Some(12),
                    ..Default::default()
                })
            );
        }
        other => unreachable!("expected update, got {:?}", other),
    }
}

#[test]
fn decode_delete_ignores_payload_shape() {
    let rec = record(OperationType::DeleteExercise, "e9", r#"{"id":"e9"}"#);
    assert_eq!(
        rec.decode().unwrap(),
        Mutation::Delete {
            table: Table::Exercises,
            id: "e9".into()
        }
    );
}

#[test]
fn decode_rejects_mismatched_table() {
    let mut rec = record(OperationType::CreateWorkout, "w1", "{}");
    rec.table = Table::Exercises;
    assert!(matches!(rec.decode(), Err(Error::CorruptedData(_))));
}

#[test]
fn decode_rejects_garbage_payload() {
    let rec = record(OperationType::CreateWorkout, "w1", "not json");
    assert!(matches!(rec.decode(), Err(Error::Json(_))));
}
