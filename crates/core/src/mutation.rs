// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Queued mutations and their lifecycle.
//!
//! A [`MutationRecord`] is one durable queue entry. Its payload is kept as an
//! opaque JSON blob at the storage boundary and decoded into a typed
//! [`Mutation`] as soon as it is dequeued.
//!
//! Lifecycle: `pending → syncing → {completed | pending (retry) | failed}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entity::{EntityFields, EntityKind, Table};
use crate::error::{Error, Result};

/// Create, update or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verb {
    Create,
    Update,
    Delete,
}

/// The closed set of mutations that can be queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    CreateWorkout,
    UpdateWorkout,
    DeleteWorkout,
    CreateExercise,
    UpdateExercise,
    DeleteExercise,
}

impl OperationType {
    /// All operation types, in declaration order.
    pub const ALL: [OperationType; 6] = [
        OperationType::CreateWorkout,
        OperationType::UpdateWorkout,
        OperationType::DeleteWorkout,
        OperationType::CreateExercise,
        OperationType::UpdateExercise,
        OperationType::DeleteExercise,
    ];

    /// Builds the operation for a verb applied to an entity kind.
    pub fn new(verb: Verb, kind: EntityKind) -> Self {
        match (verb, kind) {
            (Verb::Create, EntityKind::Workout) => OperationType::CreateWorkout,
            (Verb::Update, EntityKind::Workout) => OperationType::UpdateWorkout,
            (Verb::Delete, EntityKind::Workout) => OperationType::DeleteWorkout,
            (Verb::Create, EntityKind::Exercise) => OperationType::CreateExercise,
            (Verb::Update, EntityKind::Exercise) => OperationType::UpdateExercise,
            (Verb::Delete, EntityKind::Exercise) => OperationType::DeleteExercise,
        }
    }

    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::CreateWorkout => "create_workout",
            OperationType::UpdateWorkout => "update_workout",
            OperationType::DeleteWorkout => "delete_workout",
            OperationType::CreateExercise => "create_exercise",
            OperationType::UpdateExercise => "update_exercise",
            OperationType::DeleteExercise => "delete_exercise",
        }
    }

    pub fn verb(&self) -> Verb {
        match self {
            OperationType::CreateWorkout | OperationType::CreateExercise => Verb::Create,
            OperationType::UpdateWorkout | OperationType::UpdateExercise => Verb::Update,
            OperationType::DeleteWorkout | OperationType::DeleteExercise => Verb::Delete,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            OperationType::CreateWorkout
            | OperationType::UpdateWorkout
            | OperationType::DeleteWorkout => EntityKind::Workout,
            OperationType::CreateExercise
            | OperationType::UpdateExercise
            | OperationType::DeleteExercise => EntityKind::Exercise,
        }
    }

    /// Returns the remote table this operation is routed to.
    pub fn table(&self) -> Table {
        self.kind().table()
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OperationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        OperationType::ALL
            .into_iter()
            .find(|op| op.as_str() == normalized)
            .ok_or_else(|| Error::InvalidOperation(s.to_string()))
    }
}

/// Position of a record in the sync state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationStatus {
    /// Waiting for the next drain.
    Pending,
    /// Claimed by a drain and being applied.
    Syncing,
    /// Applied remotely; kept until the retention sweep.
    Completed,
    /// Retry budget exhausted or permanently rejected. Only a manual retry
    /// moves it back to pending.
    Failed,
}

impl MutationStatus {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationStatus::Pending => "pending",
            MutationStatus::Syncing => "syncing",
            MutationStatus::Completed => "completed",
            MutationStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for MutationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MutationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(MutationStatus::Pending),
            "syncing" => Ok(MutationStatus::Syncing),
            "completed" => Ok(MutationStatus::Completed),
            "failed" => Ok(MutationStatus::Failed),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// One durable queue entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MutationRecord {
    /// Local queue id, assigned by the store.
    pub id: i64,
    pub operation: OperationType,
    /// Routing key for the remote apply layer. Always equal to
    /// `operation.table()` for well-formed rows.
    pub table: Table,
    /// Logical id of the entity being mutated.
    pub record_id: String,
    /// Sanitized JSON snapshot (or `{"id": ..}` for deletes).
    pub payload: String,
    /// FIFO ordering key.
    pub enqueued_at: DateTime<Utc>,
    pub retry_count: u32,
    pub status: MutationStatus,
    /// Message from the most recent failed apply attempt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    /// When the remote acknowledged the record; retention counts from here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl MutationRecord {
    /// Decodes the stored payload into a typed mutation.
    pub fn decode(&self) -> Result<Mutation> {
        if self.table != self.operation.table() {
            return Err(Error::CorruptedData(format!(
                "queue record {} routes {} to table {}",
                self.id, self.operation, self.table
            )));
        }

        let kind = self.operation.kind();
        match self.operation.verb() {
            Verb::Create => {
                let mut record = EntityFields::from_json(kind, &self.payload)?;
                record.set_id(&self.record_id);
                Ok(Mutation::Create(record))
            }
            Verb::Update => {
                let mut patch = EntityFields::from_json(kind, &self.payload)?;
                patch.set_id(&self.record_id);
                Ok(Mutation::Update {
                    id: self.record_id.clone(),
                    patch,
                })
            }
            Verb::Delete => Ok(Mutation::Delete {
                table: self.table,
                id: self.record_id.clone(),
            }),
        }
    }
}

/// A decoded, typed mutation ready to hand to the remote apply layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create(EntityFields),
    Update { id: String, patch: EntityFields },
    Delete { table: Table, id: String },
}

impl Mutation {
    pub fn table(&self) -> Table {
        match self {
            Mutation::Create(record) => record.kind().table(),
            Mutation::Update { patch, .. } => patch.kind().table(),
            Mutation::Delete { table, .. } => *table,
        }
    }
}

#[cfg(test)]
#[path = "mutation_tests.rs"]
mod tests;
