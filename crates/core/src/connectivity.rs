// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connectivity monitor.
//!
//! A passive mirror of the platform's reachability feed. It keeps a single
//! online flag and fires a callback exactly once per offline→online edge.
//! It never polls; whoever owns the platform feed decides how reachability
//! is detected.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Tracks whether the remote is believed to be reachable.
#[derive(Debug)]
pub struct ConnectivityMonitor {
    online: Arc<AtomicBool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

/// Store `online` and report whether this was an offline→online edge.
fn transition(flag: &AtomicBool, online: bool) -> bool {
    let was_online = flag.swap(online, Ordering::SeqCst);
    online && !was_online
}

impl ConnectivityMonitor {
    /// Create a monitor seeded with the initial (best-effort) reachability.
    pub fn new(initial: bool) -> Self {
        ConnectivityMonitor {
            online: Arc::new(AtomicBool::new(initial)),
            task: Mutex::new(None),
        }
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    /// Apply one reachability observation.
    ///
    /// Returns true if the monitor just came online.
    pub fn set_online(&self, online: bool) -> bool {
        transition(&self.online, online)
    }

    /// Mirror a platform connectivity feed.
    ///
    /// The feed's current value is adopted silently; every later change is
    /// mirrored and `on_online` runs once per offline→online edge. Calling
    /// this again replaces the previous subscription. Must be called from
    /// within a Tokio runtime.
    pub fn subscribe<F>(&self, mut feed: watch::Receiver<bool>, on_online: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        let online = Arc::clone(&self.online);
        online.store(*feed.borrow_and_update(), Ordering::SeqCst);

        let handle = tokio::spawn(async move {
            while feed.changed().await.is_ok() {
                let now = *feed.borrow_and_update();
                if transition(&online, now) {
                    tracing::info!("connectivity restored");
                    on_online();
                } else if !now {
                    tracing::debug!("connectivity lost");
                }
            }
            tracing::debug!("connectivity feed closed");
        });

        let mut task = self.task.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = task.replace(handle) {
            previous.abort();
        }
    }

    /// Stop following the feed. Safe to call any number of times.
    pub fn teardown(&self) {
        let mut task = self.task.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = task.take() {
            handle.abort();
        }
    }

    /// Returns true while a feed subscription is active.
    pub fn is_subscribed(&self) -> bool {
        let task = self.task.lock().unwrap_or_else(|e| e.into_inner());
        task.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for ConnectivityMonitor {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "connectivity_tests.rs"]
mod tests;
