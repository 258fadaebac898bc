// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use liftlog_core::QueueStore;

use crate::config::{init_work_dir, queue_db_path, Config};
use crate::error::Result;

pub fn run(remote: Option<String>, path: Option<String>) -> Result<()> {
    let target_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir()?,
    };

    let config = Config::new(remote)?;
    let work_dir = init_work_dir(&target_path, &config)?;

    // Create the queue schema up front so later commands only open it.
    QueueStore::open(&queue_db_path(&work_dir))?;

    println!("Initialized liftlog at {}", work_dir.display());
    match config.remote_url() {
        Some(url) => println!("Remote: {}", url),
        None => println!("Remote: none (local-only, changes stay queued)"),
    }
    Ok(())
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
