// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Entity shapes that can be mutated offline.
//!
//! Every field is optional so that one type serves both full create
//! snapshots and partial update patches. Absent fields are never
//! serialized, which keeps patches minimal on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// The kind of entity a mutation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Workout,
    Exercise,
}

impl EntityKind {
    /// Returns the remote table that stores this kind of entity.
    pub fn table(&self) -> Table {
        match self {
            EntityKind::Workout => Table::Workouts,
            EntityKind::Exercise => Table::Exercises,
        }
    }
}

/// Remote table used as the routing key for the remote apply layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Workouts,
    Exercises,
}

impl Table {
    /// Returns the string representation used in storage and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Workouts => "workouts",
            Table::Exercises => "exercises",
        }
    }

    /// Returns the kind of entity stored in this table.
    pub fn kind(&self) -> EntityKind {
        match self {
            Table::Workouts => EntityKind::Workout,
            Table::Exercises => EntityKind::Exercise,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Table {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "workouts" => Ok(Table::Workouts),
            "exercises" => Ok(Table::Exercises),
            _ => Err(Error::InvalidTable(s.to_string())),
        }
    }
}

/// Whitelisted workout fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkoutFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Calendar date of the session, as entered by the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
}

/// Whitelisted exercise fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExerciseFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    /// Load in the user's unit; never negative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_seconds: Option<u32>,
}

/// A sanitized entity snapshot or patch.
///
/// Serializes as the bare field object. There is no `Deserialize` impl
/// because the object alone does not say which kind it is; decode with
/// [`EntityFields::from_json`] or [`EntityFields::from_value`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EntityFields {
    Workout(WorkoutFields),
    Exercise(ExerciseFields),
}

impl EntityFields {
    /// Returns the kind of entity these fields describe.
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityFields::Workout(_) => EntityKind::Workout,
            EntityFields::Exercise(_) => EntityKind::Exercise,
        }
    }

    /// Returns the entity id, if present.
    pub fn id(&self) -> Option<&str> {
        match self {
            EntityFields::Workout(w) => w.id.as_deref(),
            EntityFields::Exercise(e) => e.id.as_deref(),
        }
    }

    /// Sets the entity id, replacing any id already present.
    pub fn set_id(&mut self, id: &str) {
        let id = Some(id.to_string());
        match self {
            EntityFields::Workout(w) => w.id = id,
            EntityFields::Exercise(e) => e.id = id,
        }
    }

    /// Deserializes a stored payload as the given entity kind.
    pub fn from_json(kind: EntityKind, json: &str) -> Result<Self> {
        Ok(match kind {
            EntityKind::Workout => EntityFields::Workout(serde_json::from_str(json)?),
            EntityKind::Exercise => EntityFields::Exercise(serde_json::from_str(json)?),
        })
    }

    /// Converts an already-parsed JSON object into the given entity kind.
    pub fn from_value(kind: EntityKind, value: serde_json::Value) -> Result<Self> {
        Ok(match kind {
            EntityKind::Workout => EntityFields::Workout(serde_json::from_value(value)?),
            EntityKind::Exercise => EntityFields::Exercise(serde_json::from_value(value)?),
        })
    }

    /// Serializes the fields to a JSON object string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
#[path = "entity_tests.rs"]
mod tests;
