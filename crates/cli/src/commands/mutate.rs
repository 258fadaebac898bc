// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::Value;

use liftlog_core::{EntityKind, OperationType, SyncEvent, Verb};

use crate::cli::{ExerciseCommand, WorkoutCommand};
use crate::error::{Error, Result};

use super::{drain_budget, open_manager, wait_for_outcome};

pub async fn workout(action: WorkoutCommand) -> Result<()> {
    let (verb, id, payload) = match action {
        WorkoutCommand::Create { id, fields } => (Verb::Create, id, fields.to_payload()),
        WorkoutCommand::Update { id, fields } => (Verb::Update, id, fields.to_payload()),
        WorkoutCommand::Delete { id } => (Verb::Delete, id, Value::Null),
    };
    run(OperationType::new(verb, EntityKind::Workout), &id, payload).await
}

pub async fn exercise(action: ExerciseCommand) -> Result<()> {
    let (verb, id, payload) = match action {
        ExerciseCommand::Create { id, fields } => (Verb::Create, id, fields.to_payload()),
        ExerciseCommand::Update { id, fields } => (Verb::Update, id, fields.to_payload()),
        ExerciseCommand::Delete { id } => (Verb::Delete, id, Value::Null),
    };
    run(OperationType::new(verb, EntityKind::Exercise), &id, payload).await
}

pub async fn enqueue(operation: &str, record_id: &str, data: Option<&str>) -> Result<()> {
    let operation: OperationType = operation.parse()?;
    let payload = match data {
        Some(json) => parse_payload(json)?,
        None => Value::Null,
    };
    run(operation, record_id, payload).await
}

/// Parse `--data`, which must be a JSON object.
pub(crate) fn parse_payload(json: &str) -> Result<Value> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| Error::InvalidPayload(e.to_string()))?;
    if !value.is_object() {
        return Err(Error::InvalidPayload("expected a JSON object".to_string()));
    }
    Ok(value)
}

async fn run(operation: OperationType, record_id: &str, payload: Value) -> Result<()> {
    let (manager, _) = open_manager().await?;
    let mut events = manager.subscribe();

    let record = manager.enqueue(operation, record_id, &payload).await?;
    println!("Queued {} {} (#{})", record.operation, record.record_id, record.id);

    if !manager.is_online() {
        println!("Offline: will sync when connected");
        return Ok(());
    }

    // Let the background drain finish before the process exits.
    match wait_for_outcome(&mut events, drain_budget(&manager)).await {
        Some(event @ SyncEvent::Succeeded { .. }) => println!("{}", event.message()),
        Some(event) => eprintln!("warning: {}", event.message()),
        None => tracing::warn!("background sync did not finish before exit"),
    }
    Ok(())
}

#[cfg(test)]
#[path = "mutate_tests.rs"]
mod tests;
