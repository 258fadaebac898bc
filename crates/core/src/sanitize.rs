// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Whitelisting sanitizer for mutation payloads.
//!
//! Every payload passes through here before it is queued or sent to the
//! remote. Sanitizing is total: it never fails, unknown keys are dropped,
//! and absent fields stay absent.

use serde_json::{Map, Value};

use crate::entity::{EntityFields, EntityKind, ExerciseFields, WorkoutFields};

/// Maximum length of a text field, in characters.
pub const MAX_TEXT_LEN: usize = 500;

/// Sanitizes a raw object into the whitelisted fields for `kind`.
pub fn sanitize(raw: &Value, kind: EntityKind) -> EntityFields {
    match kind {
        EntityKind::Workout => EntityFields::Workout(sanitize_workout(raw)),
        EntityKind::Exercise => EntityFields::Exercise(sanitize_exercise(raw)),
    }
}

/// Sanitizes a raw object into workout fields.
pub fn sanitize_workout(raw: &Value) -> WorkoutFields {
    let Some(obj) = raw.as_object() else {
        return WorkoutFields::default();
    };
    WorkoutFields {
        id: text_field(obj, "id"),
        user_id: text_field(obj, "user_id"),
        name: text_field(obj, "name"),
        notes: text_field(obj, "notes"),
        date: text_field(obj, "date"),
        duration_minutes: count_field(obj, "duration_minutes"),
        calories: count_field(obj, "calories"),
    }
}

/// Sanitizes a raw object into exercise fields.
pub fn sanitize_exercise(raw: &Value) -> ExerciseFields {
    let Some(obj) = raw.as_object() else {
        return ExerciseFields::default();
    };
    ExerciseFields {
        id: text_field(obj, "id"),
        workout_id: text_field(obj, "workout_id"),
        name: text_field(obj, "name"),
        notes: text_field(obj, "notes"),
        sets: count_field(obj, "sets"),
        reps: count_field(obj, "reps"),
        weight: weight_field(obj, "weight"),
        rest_seconds: count_field(obj, "rest_seconds"),
    }
}

/// Strips markup characters and NUL bytes, trims, and caps the length.
pub fn sanitize_text(input: &str) -> String {
    let stripped: String = input
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '\0'))
        .collect();
    let capped: String = stripped.trim().chars().take(MAX_TEXT_LEN).collect();
    capped.trim_end().to_string()
}

/// Coerces a value to a non-negative integer count.
///
/// Fractions truncate toward zero; anything negative, non-numeric or
/// non-finite becomes 0.
pub fn coerce_count(value: &Value) -> u32 {
    let n = numeric(value);
    if n.is_finite() && n > 0.0 {
        // Saturates at u32::MAX.
        n.trunc() as u32
    } else {
        0
    }
}

/// Coerces a value to a non-negative weight.
pub fn coerce_weight(value: &Value) -> f64 {
    let n = numeric(value);
    if n.is_finite() && n > 0.0 {
        n
    } else {
        0.0
    }
}

fn numeric(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn present<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match present(obj, key)? {
        Value::String(s) => Some(sanitize_text(s)),
        Value::Number(n) => Some(sanitize_text(&n.to_string())),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn count_field(obj: &Map<String, Value>, key: &str) -> Option<u32> {
    present(obj, key).map(coerce_count)
}

fn weight_field(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    present(obj, key).map(coerce_weight)
}

#[cfg(test)]
#[path = "sanitize_tests.rs"]
mod tests;
