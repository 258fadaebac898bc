// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;

use liftlog_core::{MutationRecord, MutationStatus};

use crate::cli::OutputFormat;
use crate::error::Result;

use super::open_manager;

/// JSON output structure for the list command.
#[derive(Serialize)]
struct ListOutputJson<'a> {
    mutations: &'a [MutationRecord],
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<MutationStatus>,
}

pub async fn run(status: Option<String>, output: OutputFormat) -> Result<()> {
    let status = status.map(|s| s.parse::<MutationStatus>()).transpose()?;
    let (manager, _) = open_manager().await?;
    let records = manager.records(status).await?;

    match output {
        OutputFormat::Text => {
            if records.is_empty() {
                println!("Queue is empty");
            }
            for record in &records {
                println!("{}", format_record_line(record));
            }
        }
        OutputFormat::Json => {
            let json = ListOutputJson {
                mutations: &records,
                status,
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }
    Ok(())
}

pub(crate) fn format_record_line(record: &MutationRecord) -> String {
    let mut line = format!(
        "#{:<4} {:<9} {:<15} {} (retries: {})",
        record.id,
        record.status.as_str(),
        record.operation.as_str(),
        record.record_id,
        record.retry_count,
    );
    if let Some(error) = &record.last_error {
        line.push_str(&format!("\n      last error: {}", error));
    }
    line
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
