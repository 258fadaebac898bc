// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod init;
pub mod list;
pub mod mutate;
pub mod status;
pub mod sync;
pub mod watch;

use std::sync::Arc;
use std::time::Duration;

use liftlog_core::{ConnectivityMonitor, QueueStore, SyncEvent, SyncManager};
use tokio::sync::broadcast;

use crate::config::{find_work_dir, queue_db_path, Config};
use crate::error::Result;
use crate::sync::{probe, WebSocketRemote};

/// Sync manager as wired up by the CLI.
pub type Manager = SyncManager<WebSocketRemote>;

/// Helper to open the queue and sync manager from the current context.
///
/// Connectivity is seeded by a single reachability probe. Without a
/// configured remote the manager is permanently offline.
pub async fn open_manager() -> Result<(Manager, Config)> {
    let work_dir = find_work_dir()?;
    let config = Config::load(&work_dir)?;
    let store = QueueStore::open(&queue_db_path(&work_dir))?;

    let online = match &config.remote {
        Some(remote) => probe(&remote.url, remote.probe_timeout()).await,
        None => false,
    };
    let remote = WebSocketRemote::new(config.remote_url().unwrap_or_default());
    let monitor = Arc::new(ConnectivityMonitor::new(online));

    let manager = SyncManager::new(store, remote, monitor, config.sync.to_sync_config())?;
    Ok((manager, config))
}

/// Wait for the outcome of a drain announced on `events`.
///
/// Returns `None` if nothing conclusive arrives within `limit`.
pub async fn wait_for_outcome(
    events: &mut broadcast::Receiver<SyncEvent>,
    limit: Duration,
) -> Option<SyncEvent> {
    let outcome = async {
        loop {
            match events.recv().await {
                Ok(SyncEvent::Started { .. }) => continue,
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    };
    tokio::time::timeout(limit, outcome).await.ok().flatten()
}

/// Upper bound for one drain of `manager`.
pub fn drain_budget(manager: &Manager) -> Duration {
    let config = manager.config();
    let per_record = config.apply_timeout.unwrap_or(Duration::from_secs(30));
    let records = u32::try_from(config.batch_size).unwrap_or(u32::MAX);
    per_record.saturating_mul(records).saturating_add(Duration::from_secs(1))
}
