// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! User-facing sync status and notifications.
//!
//! [`QueueStatus`] is a point-in-time snapshot of the queue. [`SyncEvent`]s
//! are the coarse notifications a toast/snackbar layer consumes; failures
//! are reported as one generic signal per drain, never per record.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::queue::StatusCounts;

/// Snapshot of queue counters plus connectivity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStatus {
    pub pending: usize,
    pub failed: usize,
    pub syncing: usize,
    pub completed: usize,
    pub is_online: bool,
}

impl QueueStatus {
    pub fn new(counts: StatusCounts, is_online: bool) -> Self {
        QueueStatus {
            pending: counts.pending,
            failed: counts.failed,
            syncing: counts.syncing,
            completed: counts.completed,
            is_online,
        }
    }
}

/// Notification emitted by a drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SyncEvent {
    /// A drain picked up `count` records.
    Started { count: usize },
    /// Every record in the batch was applied.
    Succeeded { count: usize },
    /// At least one record in the batch failed.
    Failed { failed: usize, succeeded: usize },
}

impl SyncEvent {
    /// Short message suitable for a transient notification.
    pub fn message(&self) -> String {
        match self {
            SyncEvent::Started { count } => format!("syncing {} {}", count, plural(*count)),
            SyncEvent::Succeeded { count } => {
                format!("synced {} {} successfully", count, plural(*count))
            }
            SyncEvent::Failed { .. } => "sync failed, will retry".to_string(),
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "change"
    } else {
        "changes"
    }
}

/// Fan-out of sync events to any number of listeners.
#[derive(Debug, Clone)]
pub struct StatusNotifier {
    tx: broadcast::Sender<SyncEvent>,
}

impl StatusNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        StatusNotifier { tx }
    }

    /// Subscribe to future events.
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.tx.subscribe()
    }

    /// Publish an event. Having no listeners is not an error.
    pub fn notify(&self, event: SyncEvent) {
        tracing::debug!(?event, "sync event");
        let _ = self.tx.send(event);
    }
}

impl Default for StatusNotifier {
    fn default() -> Self {
        StatusNotifier::new(64)
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
