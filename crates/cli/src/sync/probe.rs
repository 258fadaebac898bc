// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Reachability probing.
//!
//! A probe is a plain TCP connect to the remote's host and port with a
//! short timeout. It stands in for the platform network-state feed that
//! drives the connectivity monitor.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio_tungstenite::tungstenite::http::Uri;

/// Extract `(host, port)` from a `ws://` or `wss://` URL.
pub fn socket_addr(url: &str) -> Option<(String, u16)> {
    let uri: Uri = url.parse().ok()?;
    let default_port = match uri.scheme_str()? {
        "ws" => 80,
        "wss" => 443,
        _ => return None,
    };
    let host = uri.host()?.trim_start_matches('[').trim_end_matches(']');
    Some((host.to_string(), uri.port_u16().unwrap_or(default_port)))
}

/// Returns true if the remote accepts a TCP connection within `timeout`.
pub async fn probe(url: &str, timeout: Duration) -> bool {
    let Some((host, port)) = socket_addr(url) else {
        tracing::debug!(%url, "unprobeable remote url");
        return false;
    };
    match tokio::time::timeout(timeout, TcpStream::connect((host.as_str(), port))).await {
        Ok(Ok(_)) => true,
        Ok(Err(e)) => {
            tracing::debug!(%url, error = %e, "remote unreachable");
            false
        }
        Err(_) => {
            tracing::debug!(%url, "remote probe timed out");
            false
        }
    }
}

/// Probe once, then keep probing every `interval` on a background task.
///
/// The returned feed only changes when reachability does. Probing stops
/// once every receiver is dropped.
pub async fn probe_feed(url: String, interval: Duration, timeout: Duration) -> watch::Receiver<bool> {
    let initial = probe(&url, timeout).await;
    let (tx, rx) = watch::channel(initial);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately; the initial probe covered it.
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = tx.closed() => break,
                _ = ticker.tick() => {
                    let online = probe(&url, timeout).await;
                    tx.send_if_modified(|current| {
                        let changed = *current != online;
                        *current = online;
                        changed
                    });
                }
            }
        }
    });

    rx
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
