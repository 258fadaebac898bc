// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed durable queue of pending mutations.
//!
//! The [`QueueStore`] owns the `sync_queue` table. Individual statements are
//! atomic; the pending→syncing claim is a conditional update so two drains
//! can never both win the same row.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;
use std::path::Path;

use crate::entity::Table;
use crate::error::{Error, Result};
use crate::mutation::{MutationRecord, MutationStatus, OperationType};

/// SQL schema for the sync queue.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS sync_queue (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    operation_type TEXT NOT NULL,
    table_name TEXT NOT NULL,
    record_id TEXT NOT NULL,
    data TEXT NOT NULL,
    timestamp TEXT NOT NULL,
    retry_count INTEGER NOT NULL DEFAULT 0,
    status TEXT NOT NULL DEFAULT 'pending'
);

CREATE INDEX IF NOT EXISTS idx_sync_queue_status ON sync_queue(status, timestamp);
"#;

const COLUMNS: &str = "id, operation_type, table_name, record_id, data, timestamp, retry_count, \
     status, last_error, completed_at";

/// Formats a timestamp so that lexical order matches chronological order.
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a string value from the database, returning a rusqlite error on parse failure.
fn parse_db<T: std::str::FromStr>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    value.parse().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(Error::CorruptedData(format!(
                "invalid value '{value}' in column '{column}'"
            ))),
        )
    })
}

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(Error::CorruptedData(format!(
                    "invalid timestamp '{value}' in column '{column}'"
                ))),
            )
        })
}

fn row_to_record(row: &Row<'_>) -> std::result::Result<MutationRecord, rusqlite::Error> {
    let op_str: String = row.get(1)?;
    let table_str: String = row.get(2)?;
    let ts_str: String = row.get(5)?;
    let status_str: String = row.get(7)?;

    Ok(MutationRecord {
        id: row.get(0)?,
        operation: parse_db::<OperationType>(&op_str, "operation_type")?,
        table: parse_db::<Table>(&table_str, "table_name")?,
        record_id: row.get(3)?,
        payload: row.get(4)?,
        enqueued_at: parse_timestamp(&ts_str, "timestamp")?,
        retry_count: row.get(6)?,
        status: parse_db::<MutationStatus>(&status_str, "status")?,
        last_error: row.get(8)?,
        completed_at: row
            .get::<_, Option<String>>(9)?
            .map(|ts| parse_timestamp(&ts, "completed_at"))
            .transpose()?,
    })
}

/// Run schema creation and all migrations on a database connection.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    migrate_add_last_error(conn)?;
    migrate_add_completed_at(conn)?;
    Ok(())
}

/// Migration: Add last_error column to queues created before it existed.
fn migrate_add_last_error(conn: &Connection) -> Result<()> {
    let has_column: bool = conn
        .query_row(
            "SELECT COUNT(*) > 0 FROM pragma_table_info('sync_queue') WHERE name = 'last_error'",
            [],
            |row| row.get(0),
        )
        .unwrap_or(false);

    if !has_column {
        conn.execute("ALTER TABLE sync_queue ADD COLUMN last_error TEXT", [])?;
    }
    Ok(())
}

/// Migration: Add completed_at so retention counts from completion, not enqueue.
///
/// Rows already completed get their enqueue time as a best guess.
fn migrate_add_completed_at(conn: &Connection) -> Result<()> {
    let has_column: bool = conn
        .query_row(
            "SELECT COUNT(*) > 0 FROM pragma_table_info('sync_queue') WHERE name = 'completed_at'",
            [],
            |row| row.get(0),
        )
        .unwrap_or(false);

    if !has_column {
        conn.execute_batch(
            "ALTER TABLE sync_queue ADD COLUMN completed_at TEXT;
             UPDATE sync_queue SET completed_at = timestamp WHERE status = 'completed';",
        )?;
    }
    Ok(())
}

/// Number of queue rows in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub syncing: usize,
    pub completed: usize,
    pub failed: usize,
}

/// Durable queue store over a SQLite connection.
pub struct QueueStore {
    conn: Connection,
}

impl QueueStore {
    /// Open a queue at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        run_migrations(&conn)?;
        Ok(QueueStore { conn })
    }

    /// Open an in-memory queue (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;
        Ok(QueueStore { conn })
    }

    /// Append a new pending record.
    pub fn insert(
        &self,
        operation: OperationType,
        record_id: &str,
        payload: &str,
        enqueued_at: DateTime<Utc>,
    ) -> Result<MutationRecord> {
        self.conn.execute(
            "INSERT INTO sync_queue (operation_type, table_name, record_id, data, timestamp,
             retry_count, status)
             VALUES (?1, ?2, ?3, ?4, ?5, 0, 'pending')",
            params![
                operation.as_str(),
                operation.table().as_str(),
                record_id,
                payload,
                format_timestamp(enqueued_at),
            ],
        )?;
        self.get(self.conn.last_insert_rowid())
    }

    /// Get a record by queue id.
    pub fn get(&self, id: i64) -> Result<MutationRecord> {
        let record = self
            .conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM sync_queue WHERE id = ?1"),
                params![id],
                row_to_record,
            )
            .optional()?;
        record.ok_or(Error::RecordNotFound(id))
    }

    /// Oldest pending records first, at most `limit` of them.
    pub fn pending_batch(&self, limit: usize) -> Result<Vec<MutationRecord>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM sync_queue
             WHERE status = 'pending'
             ORDER BY timestamp ASC, id ASC
             LIMIT ?1"
        ))?;
        let records = stmt
            .query_map(params![limit], row_to_record)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// List records in queue order, optionally filtered by status.
    pub fn list(&self, status: Option<MutationStatus>) -> Result<Vec<MutationRecord>> {
        let mut sql = format!("SELECT {COLUMNS} FROM sync_queue");
        let mut params_vec: Vec<String> = Vec::new();
        if let Some(s) = status {
            sql.push_str(" WHERE status = ?");
            params_vec.push(s.as_str().to_string());
        }
        sql.push_str(" ORDER BY timestamp ASC, id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map(rusqlite::params_from_iter(params_vec.iter()), row_to_record)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Move a record from pending to syncing.
    ///
    /// Returns false if the record is no longer pending (another drain
    /// claimed it, or it was reset or swept in the meantime).
    pub fn claim(&self, id: i64) -> Result<bool> {
        let affected = self.conn.execute(
            "UPDATE sync_queue SET status = 'syncing' WHERE id = ?1 AND status = 'pending'",
            params![id],
        )?;
        Ok(affected == 1)
    }

    /// Mark a record as applied remotely at `completed_at`.
    pub fn mark_completed(&self, id: i64, completed_at: DateTime<Utc>) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE sync_queue SET status = 'completed', last_error = NULL, completed_at = ?2
             WHERE id = ?1",
            params![id, format_timestamp(completed_at)],
        )?;
        if affected == 0 {
            return Err(Error::RecordNotFound(id));
        }
        Ok(())
    }

    /// Record a failed apply attempt and return the record's new status.
    ///
    /// The retry count always increases. The record goes back to pending
    /// unless the ceiling is reached or the failure is not retryable, in
    /// which case it becomes failed.
    pub fn record_failure(
        &self,
        id: i64,
        error: &str,
        max_retries: u32,
        retryable: bool,
    ) -> Result<MutationStatus> {
        let status: Option<String> = self
            .conn
            .query_row(
                "UPDATE sync_queue
                 SET retry_count = retry_count + 1,
                     last_error = ?2,
                     status = CASE
                         WHEN ?3 = 0 OR retry_count + 1 >= ?4 THEN 'failed'
                         ELSE 'pending'
                     END
                 WHERE id = ?1
                 RETURNING status",
                params![id, error, retryable, max_retries],
                |row| row.get(0),
            )
            .optional()?;

        let status = status.ok_or(Error::RecordNotFound(id))?;
        status.parse()
    }

    /// Reset every failed record to pending with a fresh retry budget.
    pub fn reset_failed(&self) -> Result<usize> {
        let affected = self.conn.execute(
            "UPDATE sync_queue SET status = 'pending', retry_count = 0, last_error = NULL
             WHERE status = 'failed'",
            [],
        )?;
        Ok(affected)
    }

    /// Return records stranded in syncing (e.g. by a crash mid-apply) to pending.
    pub fn recover_syncing(&self) -> Result<usize> {
        let affected = self.conn.execute(
            "UPDATE sync_queue SET status = 'pending' WHERE status = 'syncing'",
            [],
        )?;
        Ok(affected)
    }

    /// Delete records that completed before `cutoff`.
    pub fn sweep_completed(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        let affected = self.conn.execute(
            "DELETE FROM sync_queue WHERE status = 'completed' AND completed_at < ?1",
            params![format_timestamp(cutoff)],
        )?;
        Ok(affected)
    }

    /// Count records by status.
    pub fn status_counts(&self) -> Result<StatusCounts> {
        let mut stmt = self
            .conn
            .prepare("SELECT status, COUNT(*) FROM sync_queue GROUP BY status")?;
        let rows = stmt
            .query_map([], |row| {
                let status: String = row.get(0)?;
                let count: i64 = row.get(1)?;
                Ok((status, count))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut counts = StatusCounts::default();
        for (status, count) in rows {
            let count = usize::try_from(count).unwrap_or(0);
            match status.parse::<MutationStatus>()? {
                MutationStatus::Pending => counts.pending = count,
                MutationStatus::Syncing => counts.syncing = count,
                MutationStatus::Completed => counts.completed = count,
                MutationStatus::Failed => counts.failed = count,
            }
        }
        Ok(counts)
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
