// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `liftlog watch`: long-running sync loop.
//!
//! Probes the remote on an interval and feeds the result to the connectivity
//! monitor, so every offline→online edge drains the queue. While online, each
//! tick also drains so transient failures are retried without a reconnect.

use tokio::sync::broadcast;

use crate::error::{Error, Result};
use crate::sync::probe_feed;

use super::open_manager;

pub async fn run() -> Result<()> {
    let (manager, config) = open_manager().await?;
    let Some(remote) = config.remote else {
        return Err(Error::Config(
            "no remote configured\n  hint: add a [remote] url to .liftlog/config.toml".to_string(),
        ));
    };

    let feed = probe_feed(
        remote.url.clone(),
        remote.probe_interval(),
        remote.probe_timeout(),
    )
    .await;
    manager.follow_connectivity(feed);
    let mut events = manager.subscribe();

    println!("Watching {} (Ctrl-C to stop)", remote.url);
    tracing::info!(url = %remote.url, online = manager.is_online(), "watching remote");

    let mut ticker = tokio::time::interval(remote.probe_interval());
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            _ = ticker.tick() => {
                if manager.is_online() {
                    manager.spawn_drain();
                }
            }
            event = events.recv() => match event {
                Ok(event) => println!("{}", event.message()),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "missed sync notifications");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }

    manager.shutdown();
    println!("Stopped");
    Ok(())
}
