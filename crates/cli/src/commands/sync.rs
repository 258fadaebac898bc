// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Manual sync commands: `sync`, `retry-failed` and `sweep`.

use crate::cli::OutputFormat;
use crate::error::Result;

use super::open_manager;

pub async fn run(output: OutputFormat) -> Result<()> {
    let (manager, _) = open_manager().await?;
    let report = manager.force_sync_now().await?;

    match output {
        OutputFormat::Text => {
            if report.attempted() == 0 {
                println!("Nothing to sync");
            } else {
                println!(
                    "Synced {} of {} queued change(s)",
                    report.succeeded,
                    report.attempted()
                );
            }
            if report.failed > report.exhausted {
                println!("{} change(s) will be retried", report.failed - report.exhausted);
            }
            if report.exhausted > 0 {
                println!(
                    "{} change(s) failed permanently; run 'liftlog retry-failed' to try again",
                    report.exhausted
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

pub async fn retry_failed() -> Result<()> {
    let (manager, _) = open_manager().await?;
    let reset = manager.retry_failed_operations().await?;

    println!("Reset {} failed change(s)", reset);
    if reset > 0 && !manager.is_online() {
        println!("Offline: will sync when connected");
    }
    Ok(())
}

pub async fn sweep() -> Result<()> {
    let (manager, _) = open_manager().await?;
    let swept = manager.sweep().await?;
    println!("Removed {} completed change(s)", swept);
    Ok(())
}
