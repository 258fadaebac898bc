// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Server state management.
//!
//! Wraps the canonical `workouts`/`exercises` database for shared access
//! from connection tasks. Applies are idempotent where replay is likely:
//! inserts upsert and deletes of missing rows succeed.

use std::path::Path;
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection, OptionalExtension};
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use liftlog_core::protocol::ApplyAction;
use liftlog_core::{EntityFields, Table};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS workouts (
    id TEXT PRIMARY KEY,
    user_id TEXT,
    name TEXT NOT NULL,
    notes TEXT,
    date TEXT,
    duration_minutes INTEGER,
    calories INTEGER,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS exercises (
    id TEXT PRIMARY KEY,
    workout_id TEXT,
    name TEXT NOT NULL,
    notes TEXT,
    sets INTEGER,
    reps INTEGER,
    weight REAL,
    rest_seconds INTEGER,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_exercises_workout ON exercises(workout_id);
"#;

/// Why an apply request was not applied.
#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    /// The request can never succeed as sent.
    #[error("{0}")]
    Invalid(String),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl ApplyError {
    /// Storage hiccups may clear up; invalid requests will not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApplyError::Storage(_))
    }
}

/// Shared server state containing the canonical database.
#[derive(Clone)]
pub struct ServerState {
    inner: Arc<ServerStateInner>,
}

struct ServerStateInner {
    db: Mutex<Connection>,
}

impl ServerState {
    /// Opens (or creates) `remote.db` in the given directory.
    pub fn new(data_dir: &Path) -> rusqlite::Result<Self> {
        let conn = Connection::open(data_dir.join("remote.db"))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        conn.execute_batch(SCHEMA)?;

        Ok(ServerState {
            inner: Arc::new(ServerStateInner {
                db: Mutex::new(conn),
            }),
        })
    }

    /// Applies one mutation to `table`.
    pub async fn apply(
        &self,
        table: Table,
        action: ApplyAction,
        id: &str,
        fields: Option<Value>,
    ) -> Result<(), ApplyError> {
        if id.is_empty() {
            return Err(ApplyError::Invalid("id is required".to_string()));
        }

        let conn = self.inner.db.lock().await;
        match action {
            ApplyAction::Insert => {
                let columns = columns(table, fields)?;
                if !has_name(&columns) {
                    return Err(ApplyError::Invalid(format!(
                        "cannot create {} '{}': name is required",
                        singular(table),
                        id
                    )));
                }
                upsert(&conn, table, id, &columns)
            }
            ApplyAction::Update => {
                let columns = columns(table, fields)?;
                if columns.contains_key("name") && !has_name(&columns) {
                    return Err(ApplyError::Invalid("name cannot be empty".to_string()));
                }
                update(&conn, table, id, &columns)
            }
            ApplyAction::Delete => {
                conn.execute(
                    &format!("DELETE FROM {} WHERE id = ?1", table.as_str()),
                    [id],
                )?;
                Ok(())
            }
        }
    }

    /// Returns a row as a JSON object, or `None` if it does not exist.
    pub async fn row(&self, table: Table, id: &str) -> rusqlite::Result<Option<Value>> {
        let conn = self.inner.db.lock().await;
        let mut stmt = conn.prepare(&format!("SELECT * FROM {} WHERE id = ?1", table.as_str()))?;
        let names: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

        stmt.query_row([id], |row| {
            let mut obj = Map::new();
            for (i, name) in names.iter().enumerate() {
                let value = match row.get::<_, SqlValue>(i)? {
                    SqlValue::Null => Value::Null,
                    SqlValue::Integer(n) => Value::from(n),
                    SqlValue::Real(f) => Value::from(f),
                    SqlValue::Text(s) => Value::from(s),
                    SqlValue::Blob(_) => Value::Null,
                };
                obj.insert(name.clone(), value);
            }
            Ok(Value::Object(obj))
        })
        .optional()
    }
}

fn singular(table: Table) -> &'static str {
    match table {
        Table::Workouts => "workout",
        Table::Exercises => "exercise",
    }
}

/// Decode `fields` as the table's entity and flatten it to column values.
///
/// Decoding through the typed entity restricts column names to the known
/// whitelist, so they are safe to splice into SQL.
fn columns(table: Table, fields: Option<Value>) -> Result<Map<String, Value>, ApplyError> {
    let fields = fields.unwrap_or_else(|| Value::Object(Map::new()));
    let entity = EntityFields::from_value(table.kind(), fields)
        .map_err(|e| ApplyError::Invalid(format!("invalid {} fields: {}", singular(table), e)))?;

    match serde_json::to_value(&entity) {
        Ok(Value::Object(mut map)) => {
            map.remove("id");
            Ok(map)
        }
        _ => Err(ApplyError::Invalid("fields must be an object".to_string())),
    }
}

fn has_name(columns: &Map<String, Value>) -> bool {
    columns
        .get("name")
        .and_then(Value::as_str)
        .is_some_and(|name| !name.trim().is_empty())
}

fn sql_value(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or(0.0)),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn upsert(
    conn: &Connection,
    table: Table,
    id: &str,
    columns: &Map<String, Value>,
) -> Result<(), ApplyError> {
    let names: Vec<&str> = columns.keys().map(String::as_str).collect();
    let placeholders: Vec<String> = (0..names.len() + 2).map(|i| format!("?{}", i + 1)).collect();
    let updates: Vec<String> = names
        .iter()
        .chain(std::iter::once(&"updated_at"))
        .map(|c| format!("{c} = excluded.{c}"))
        .collect();

    let sql = format!(
        "INSERT INTO {table} (id, {cols}, updated_at) VALUES ({placeholders})
         ON CONFLICT(id) DO UPDATE SET {updates}",
        table = table.as_str(),
        cols = names.join(", "),
        placeholders = placeholders.join(", "),
        updates = updates.join(", "),
    );

    let mut params = vec![SqlValue::Text(id.to_string())];
    params.extend(columns.values().map(sql_value));
    params.push(SqlValue::Text(now()));

    conn.execute(&sql, params_from_iter(params))?;
    Ok(())
}

fn update(
    conn: &Connection,
    table: Table,
    id: &str,
    columns: &Map<String, Value>,
) -> Result<(), ApplyError> {
    let mut assignments: Vec<String> = columns
        .keys()
        .enumerate()
        .map(|(i, c)| format!("{c} = ?{}", i + 1))
        .collect();
    assignments.push(format!("updated_at = ?{}", columns.len() + 1));

    let sql = format!(
        "UPDATE {} SET {} WHERE id = ?{}",
        table.as_str(),
        assignments.join(", "),
        columns.len() + 2
    );

    let mut params: Vec<SqlValue> = columns.values().map(sql_value).collect();
    params.push(SqlValue::Text(now()));
    params.push(SqlValue::Text(id.to_string()));

    if conn.execute(&sql, params_from_iter(params))? == 0 {
        return Err(ApplyError::Invalid(format!(
            "cannot update {} '{}': not found",
            singular(table),
            id
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
