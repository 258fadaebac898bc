// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing tests for the workout, exercise and enqueue commands.

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::*;
use serde_json::json;
use yare::parameterized;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(args)
}

#[test]
fn workout_create_collects_given_fields() {
    let cli = parse(&[
        "liftlog", "workout", "create", "w1", "--name", "Leg Day", "--duration", "45",
    ])
    .unwrap();

    match cli.command {
        Command::Workout {
            action: WorkoutCommand::Create { id, fields },
        } => {
            assert_eq!(id, "w1");
            assert_eq!(
                fields.to_payload(),
                json!({"name": "Leg Day", "duration_minutes": 45})
            );
        }
        other => panic!("expected workout create, got {other:?}"),
    }
}

#[test]
fn workout_update_without_flags_is_an_empty_patch() {
    let cli = parse(&["liftlog", "workout", "update", "w1"]).unwrap();

    match cli.command {
        Command::Workout {
            action: WorkoutCommand::Update { fields, .. },
        } => assert_eq!(fields.to_payload(), json!({})),
        other => panic!("expected workout update, got {other:?}"),
    }
}

#[test]
fn exercise_create_maps_flags_to_fields() {
    let cli = parse(&[
        "liftlog", "exercise", "create", "e1", "-w", "w1", "-n", "Squat", "--sets", "5",
        "--reps", "5", "--weight", "102.5", "--rest", "180",
    ])
    .unwrap();

    match cli.command {
        Command::Exercise {
            action: ExerciseCommand::Create { id, fields },
        } => {
            assert_eq!(id, "e1");
            assert_eq!(
                fields.to_payload(),
                json!({
                    "workout_id": "w1",
                    "name": "Squat",
                    "sets": 5,
                    "reps": 5,
                    "weight": 102.5,
                    "rest_seconds": 180
                })
            );
        }
        other => panic!("expected exercise create, got {other:?}"),
    }
}

#[parameterized(
    workout = { &["liftlog", "workout", "delete", "w1"] },
    exercise = { &["liftlog", "exercise", "delete", "w1"] },
)]
fn delete_takes_only_an_id(args: &[&str]) {
    assert!(parse(args).is_ok());
    let mut with_flag = args.to_vec();
    with_flag.extend(["--name", "x"]);
    assert!(parse(&with_flag).is_err());
}

#[parameterized(
    negative_sets = { &["liftlog", "exercise", "create", "e1", "--sets", "-1"] },
    fractional_duration = { &["liftlog", "workout", "create", "w1", "--duration", "1.5"] },
    empty_id = { &["liftlog", "workout", "create", "  "] },
)]
fn invalid_values_are_rejected(args: &[&str]) {
    assert!(parse(args).is_err());
}

#[test]
fn enqueue_takes_raw_json() {
    let cli = parse(&[
        "liftlog",
        "enqueue",
        "create_workout",
        "w1",
        "--data",
        r#"{"name":"<b>Leg Day</b>"}"#,
    ])
    .unwrap();

    match cli.command {
        Command::Enqueue {
            operation,
            record_id,
            data,
        } => {
            assert_eq!(operation, "create_workout");
            assert_eq!(record_id, "w1");
            assert_eq!(data.as_deref(), Some(r#"{"name":"<b>Leg Day</b>"}"#));
        }
        other => panic!("expected enqueue, got {other:?}"),
    }
}
