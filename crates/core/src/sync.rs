// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync queue manager.
//!
//! Owns the durable queue, the remote and the connectivity monitor, and
//! drives queued mutations through their lifecycle:
//!
//! ```text
//! enqueue ──► pending ──claim──► syncing ──ok──► completed ──sweep──► (deleted)
//!                ▲                  │
//!                └──── retryable ───┤
//!                                   └── ceiling / permanent ──► failed
//! ```
//!
//! Records within one drain are applied strictly one at a time in enqueue
//! order. Overlapping drains are safe: the pending→syncing claim is a
//! conditional update, so a record is applied at most once per claim.

use std::sync::{Arc, Weak};
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::{broadcast, watch, Mutex};
use tokio::task::JoinHandle;

use crate::clock::{ClockSource, SystemClock};
use crate::connectivity::ConnectivityMonitor;
use crate::error::{Error, Result};
use crate::mutation::{Mutation, MutationRecord, MutationStatus, OperationType, Verb};
use crate::queue::QueueStore;
use crate::remote::{RemoteApply, RemoteError, RemoteResult};
use crate::sanitize::{sanitize, sanitize_text};
use crate::status::{QueueStatus, StatusNotifier, SyncEvent};

/// Tuning knobs for the sync manager.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Maximum records applied per drain.
    pub batch_size: usize,
    /// Failed attempts before a record is marked failed.
    pub max_retries: u32,
    /// How long completed records are kept before the sweep deletes them.
    pub retention: chrono::Duration,
    /// Upper bound on a single remote call. `None` waits forever.
    pub apply_timeout: Option<Duration>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            batch_size: 10,
            max_retries: 3,
            retention: chrono::Duration::hours(24),
            apply_timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// Outcome of one drain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DrainReport {
    /// Records applied remotely.
    pub succeeded: usize,
    /// Apply attempts that failed (requeued or marked failed).
    pub failed: usize,
    /// Failures that moved a record to the terminal failed state.
    pub exhausted: usize,
    /// Records claimed by an overlapping drain first.
    pub skipped: usize,
    /// Completed records removed by the sweep.
    pub swept: usize,
}

impl DrainReport {
    /// Number of records this drain attempted to apply.
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed
    }
}

struct Inner<R> {
    store: Mutex<QueueStore>,
    remote: R,
    monitor: Arc<ConnectivityMonitor>,
    notifier: StatusNotifier,
    clock: Arc<dyn ClockSource>,
    config: SyncConfig,
}

/// Long-lived service that queues mutations and replays them remotely.
///
/// Cheap to clone; all clones share the same queue and state.
pub struct SyncManager<R: RemoteApply> {
    inner: Arc<Inner<R>>,
}

impl<R: RemoteApply> Clone for SyncManager<R> {
    fn clone(&self) -> Self {
        SyncManager {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: RemoteApply + 'static> SyncManager<R> {
    /// Create a manager using the system clock.
    ///
    /// Records left in `syncing` by an interrupted process are returned to
    /// `pending` before the manager is handed out.
    pub fn new(
        store: QueueStore,
        remote: R,
        monitor: Arc<ConnectivityMonitor>,
        config: SyncConfig,
    ) -> Result<Self> {
        Self::with_clock(store, remote, monitor, config, Arc::new(SystemClock))
    }

    /// Create a manager with a custom clock source.
    pub fn with_clock(
        store: QueueStore,
        remote: R,
        monitor: Arc<ConnectivityMonitor>,
        config: SyncConfig,
        clock: Arc<dyn ClockSource>,
    ) -> Result<Self> {
        let recovered = store.recover_syncing()?;
        if recovered > 0 {
            tracing::warn!(recovered, "returned interrupted records to pending");
        }

        Ok(SyncManager {
            inner: Arc::new(Inner {
                store: Mutex::new(store),
                remote,
                monitor,
                notifier: StatusNotifier::default(),
                clock,
                config,
            }),
        })
    }

    pub fn is_online(&self) -> bool {
        self.inner.monitor.is_online()
    }

    pub fn monitor(&self) -> &Arc<ConnectivityMonitor> {
        &self.inner.monitor
    }

    pub fn config(&self) -> &SyncConfig {
        &self.inner.config
    }

    /// Subscribe to sync notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.inner.notifier.subscribe()
    }

    async fn with_store<T>(&self, f: impl FnOnce(&QueueStore) -> Result<T>) -> Result<T> {
        let store = self.inner.store.lock().await;
        f(&store)
    }

    /// Sanitize and durably queue a mutation.
    ///
    /// Returns once the record is stored. When online, a drain is started in
    /// the background; the caller never waits on the remote.
    pub async fn enqueue(
        &self,
        operation: OperationType,
        record_id: &str,
        payload: &Value,
    ) -> Result<MutationRecord> {
        let record_id = sanitize_text(record_id);
        if record_id.is_empty() {
            return Err(Error::InvalidInput("record id cannot be empty".to_string()));
        }

        let data = match operation.verb() {
            Verb::Delete => serde_json::json!({ "id": record_id }).to_string(),
            Verb::Create | Verb::Update => {
                let mut fields = sanitize(payload, operation.kind());
                fields.set_id(&record_id);
                fields.to_json()?
            }
        };

        let now = self.inner.clock.now();
        let record = self
            .with_store(|store| store.insert(operation, &record_id, &data, now))
            .await?;
        tracing::debug!(id = record.id, %operation, record_id = %record.record_id, "queued mutation");

        if self.is_online() {
            self.spawn_drain();
        }
        Ok(record)
    }

    /// Start a drain on a background task.
    pub fn spawn_drain(&self) -> JoinHandle<()> {
        let manager = self.clone();
        tokio::spawn(async move {
            if let Err(e) = manager.drain().await {
                tracing::warn!(error = %e, "background drain failed");
            }
        })
    }

    /// Apply the oldest batch of pending records.
    ///
    /// A no-op while offline. Remote failures are absorbed into each
    /// record's retry state; only queue storage failures are returned.
    pub async fn drain(&self) -> Result<DrainReport> {
        let mut report = DrainReport::default();
        if !self.is_online() {
            tracing::debug!("offline, skipping drain");
            return Ok(report);
        }

        let batch_size = self.inner.config.batch_size;
        let batch = self
            .with_store(|store| store.pending_batch(batch_size))
            .await?;
        if batch.is_empty() {
            return Ok(report);
        }

        self.inner.notifier.notify(SyncEvent::Started { count: batch.len() });

        for record in batch {
            if !self.with_store(|store| store.claim(record.id)).await? {
                tracing::debug!(id = record.id, "record already claimed, skipping");
                report.skipped += 1;
                continue;
            }

            match self.apply(&record).await {
                Ok(()) => {
                    let now = self.inner.clock.now();
                    self.with_store(|store| store.mark_completed(record.id, now))
                        .await?;
                    tracing::debug!(id = record.id, operation = %record.operation, "applied");
                    report.succeeded += 1;
                }
                Err(err) => {
                    let max_retries = self.inner.config.max_retries;
                    let status = self
                        .with_store(|store| {
                            store.record_failure(record.id, &err.message, max_retries, err.retryable)
                        })
                        .await?;
                    report.failed += 1;
                    if status == MutationStatus::Failed {
                        report.exhausted += 1;
                        tracing::warn!(
                            id = record.id,
                            operation = %record.operation,
                            record_id = %record.record_id,
                            error = %err,
                            "mutation failed permanently"
                        );
                    } else {
                        tracing::debug!(id = record.id, error = %err, "apply failed, will retry");
                    }
                }
            }
        }

        if report.failed == 0 {
            self.inner.notifier.notify(SyncEvent::Succeeded {
                count: report.succeeded,
            });
        } else {
            self.inner.notifier.notify(SyncEvent::Failed {
                failed: report.failed,
                succeeded: report.succeeded,
            });
        }

        match self.sweep().await {
            Ok(swept) => report.swept = swept,
            Err(e) => tracing::warn!(error = %e, "sweep of completed records failed"),
        }

        tracing::info!(
            succeeded = report.succeeded,
            failed = report.failed,
            skipped = report.skipped,
            "drain finished"
        );
        Ok(report)
    }

    /// Decode a claimed record and replay it against the remote.
    async fn apply(&self, record: &MutationRecord) -> RemoteResult<()> {
        let mutation = record
            .decode()
            .map_err(|e| RemoteError::permanent(format!("undecodable payload: {e}")))?;

        let remote = &self.inner.remote;
        let table = mutation.table();
        let call = match mutation {
            Mutation::Create(fields) => remote.insert(table, fields),
            Mutation::Update { id, patch } => remote.update(table, &id, patch),
            Mutation::Delete { id, .. } => remote.delete(table, &id),
        };

        match self.inner.config.apply_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => Err(RemoteError::transient(format!(
                    "remote apply timed out after {}ms",
                    limit.as_millis()
                ))),
            },
            None => call.await,
        }
    }

    /// User-triggered drain. Unlike [`drain`](Self::drain), fails when offline.
    pub async fn force_sync_now(&self) -> Result<DrainReport> {
        if !self.is_online() {
            return Err(Error::Offline);
        }
        self.drain().await
    }

    /// Give every failed record a fresh retry budget, then drain if online.
    ///
    /// Returns the number of records reset.
    pub async fn retry_failed_operations(&self) -> Result<usize> {
        let reset = self.with_store(|store| store.reset_failed()).await?;
        tracing::info!(reset, "reset failed mutations");
        if self.is_online() {
            self.drain().await?;
        }
        Ok(reset)
    }

    /// Counts by status plus connectivity.
    pub async fn queue_status(&self) -> Result<QueueStatus> {
        let counts = self.with_store(|store| store.status_counts()).await?;
        Ok(QueueStatus::new(counts, self.is_online()))
    }

    /// Delete completed records older than the retention window.
    pub async fn sweep(&self) -> Result<usize> {
        let cutoff = self.inner.clock.now() - self.inner.config.retention;
        let swept = self
            .with_store(|store| store.sweep_completed(cutoff))
            .await?;
        if swept > 0 {
            tracing::debug!(swept, "swept completed records");
        }
        Ok(swept)
    }

    /// Queue records, optionally filtered by status.
    pub async fn records(&self, status: Option<MutationStatus>) -> Result<Vec<MutationRecord>> {
        self.with_store(|store| store.list(status)).await
    }

    /// Follow a platform connectivity feed, draining on every
    /// offline→online edge.
    pub fn follow_connectivity(&self, feed: watch::Receiver<bool>) {
        let weak: Weak<Inner<R>> = Arc::downgrade(&self.inner);
        self.inner.monitor.subscribe(feed, move || {
            if let Some(inner) = weak.upgrade() {
                SyncManager { inner }.spawn_drain();
            }
        });
    }

    /// Stop following connectivity changes.
    pub fn shutdown(&self) {
        self.inner.monitor.teardown();
    }
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
