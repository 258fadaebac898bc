// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use liftlog_core::QueueStatus;

use crate::cli::OutputFormat;
use crate::error::Result;

use super::open_manager;

pub async fn run(output: OutputFormat) -> Result<()> {
    let (manager, _) = open_manager().await?;
    let status = manager.queue_status().await?;

    match output {
        OutputFormat::Text => print!("{}", format_status(&status)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
    }
    Ok(())
}

pub(crate) fn format_status(status: &QueueStatus) -> String {
    format!(
        "Pending:   {}\nSyncing:   {}\nFailed:    {}\nCompleted: {}\nOnline:    {}\n",
        status.pending,
        status.syncing,
        status.failed,
        status.completed,
        if status.is_online { "yes" } else { "no" },
    )
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
