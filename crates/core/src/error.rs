// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for liftlog-core operations.

use thiserror::Error;

use crate::remote::RemoteError;

/// All possible errors that can occur in liftlog-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("offline: cannot sync without a network connection\n  hint: queued changes will sync automatically once back online")]
    Offline,

    #[error("remote apply failed: {0}")]
    Remote(#[from] RemoteError),

    #[error("invalid operation: '{0}'\n  hint: valid operations are: create_workout, update_workout, delete_workout, create_exercise, update_exercise, delete_exercise")]
    InvalidOperation(String),

    #[error("invalid table: '{0}'\n  hint: valid tables are: workouts, exercises")]
    InvalidTable(String),

    #[error("invalid queue status: '{0}'\n  hint: valid statuses are: pending, syncing, completed, failed")]
    InvalidStatus(String),

    #[error("queue record not found: {0}")]
    RecordNotFound(i64),

    #[error("{0}")]
    InvalidInput(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// A specialized Result type for liftlog-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
