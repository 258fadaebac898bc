// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! liftlogrs - library behind the `liftlog` CLI.
//!
//! Workout and exercise changes are queued in `.liftlog/queue.db` and
//! replayed in order against a `liftlog-remote` server whenever it is
//! reachable.
//!
//! # Main Components
//!
//! - [`Config`] - Project configuration (remote URL, queue tuning)
//! - [`sync::WebSocketRemote`] - Remote apply over WebSocket
//! - [`sync::probe`] - Reachability probing that drives connectivity
//! - [`Error`] - Error types for all operations

mod cli;
mod commands;

pub mod config;
pub mod error;
pub mod sync;

pub use cli::{Cli, Command, ExerciseCommand, OutputFormat, WorkoutCommand};
pub use config::{find_work_dir, init_work_dir, queue_db_path, Config};
pub use error::{Error, Result};

/// Execute a parsed command line. This is the main entry point for library
/// users and provides a testable way to run commands without process
/// execution.
pub fn run(cli: Cli) -> Result<()> {
    if let Some(dir) = &cli.directory {
        std::env::set_current_dir(dir)?;
    }

    if let Command::Init { remote, path } = cli.command {
        return commands::init::run(remote, path);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(dispatch(cli.command))
}

async fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Init { remote, path } => commands::init::run(remote, path),
        Command::Workout { action } => commands::mutate::workout(action).await,
        Command::Exercise { action } => commands::mutate::exercise(action).await,
        Command::Enqueue {
            operation,
            record_id,
            data,
        } => commands::mutate::enqueue(&operation, &record_id, data.as_deref()).await,
        Command::Status { output } => commands::status::run(output).await,
        Command::List { status, output } => commands::list::run(status, output).await,
        Command::Sync { output } => commands::sync::run(output).await,
        Command::RetryFailed => commands::sync::retry_failed().await,
        Command::Sweep => commands::sync::sweep().await,
        Command::Watch => commands::watch::run().await,
    }
}
