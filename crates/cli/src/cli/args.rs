// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared argument structs for CLI commands.
//!
//! Flattened into the create and update subcommands. Only the flags actually
//! given end up in the payload, so an update only patches what was passed.

use clap::Args;
use serde_json::{Map, Value};

/// Workout fields settable from the command line.
#[derive(Args, Clone, Debug, Default, PartialEq)]
pub struct WorkoutArgs {
    /// Owning user id
    #[arg(long)]
    pub user: Option<String>,

    /// Workout name
    #[arg(long, short)]
    pub name: Option<String>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Calendar date (e.g. 2026-03-01)
    #[arg(long)]
    pub date: Option<String>,

    /// Duration in minutes
    #[arg(long)]
    pub duration: Option<u32>,

    /// Calories burned
    #[arg(long)]
    pub calories: Option<u32>,
}

impl WorkoutArgs {
    pub fn to_payload(&self) -> Value {
        let mut obj = Map::new();
        insert(&mut obj, "user_id", self.user.as_ref());
        insert(&mut obj, "name", self.name.as_ref());
        insert(&mut obj, "notes", self.notes.as_ref());
        insert(&mut obj, "date", self.date.as_ref());
        insert(&mut obj, "duration_minutes", self.duration.as_ref());
        insert(&mut obj, "calories", self.calories.as_ref());
        Value::Object(obj)
    }
}

/// Exercise fields settable from the command line.
#[derive(Args, Clone, Debug, Default, PartialEq)]
pub struct ExerciseArgs {
    /// Workout this exercise belongs to
    #[arg(long, short)]
    pub workout: Option<String>,

    /// Exercise name
    #[arg(long, short)]
    pub name: Option<String>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Number of sets
    #[arg(long)]
    pub sets: Option<u32>,

    /// Repetitions per set
    #[arg(long)]
    pub reps: Option<u32>,

    /// Load per repetition
    #[arg(long)]
    pub weight: Option<f64>,

    /// Rest between sets in seconds
    #[arg(long)]
    pub rest: Option<u32>,
}

impl ExerciseArgs {
    pub fn to_payload(&self) -> Value {
        let mut obj = Map::new();
        insert(&mut obj, "workout_id", self.workout.as_ref());
        insert(&mut obj, "name", self.name.as_ref());
        insert(&mut obj, "notes", self.notes.as_ref());
        insert(&mut obj, "sets", self.sets.as_ref());
        insert(&mut obj, "reps", self.reps.as_ref());
        insert(&mut obj, "weight", self.weight.as_ref());
        insert(&mut obj, "rest_seconds", self.rest.as_ref());
        Value::Object(obj)
    }
}

fn insert<T>(obj: &mut Map<String, Value>, key: &str, value: Option<&T>)
where
    T: Clone + Into<Value>,
{
    if let Some(v) = value {
        obj.insert(key.to_string(), v.clone().into());
    }
}
