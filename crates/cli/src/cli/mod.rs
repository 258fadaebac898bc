// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use clap::{Parser, Subcommand, ValueEnum};

pub use args::{ExerciseArgs, WorkoutArgs};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "liftlog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Offline-first workout log with queued remote sync")]
#[command(
    long_about = "Offline-first workout log with queued remote sync.\n\n\
    Workout and exercise changes are queued locally and replayed in order\n\
    against the remote server whenever it is reachable."
)]
pub struct Cli {
    /// Run as if liftlog was started in <path>
    #[arg(short = 'C', long = "directory", global = true, value_name = "path")]
    pub directory: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a liftlog queue in the current directory
    Init {
        /// WebSocket URL of the sync server (ws:// or wss://)
        #[arg(long)]
        remote: Option<String>,

        /// Directory to initialize (defaults to the current directory)
        #[arg(long)]
        path: Option<String>,
    },

    /// Queue a workout change
    Workout {
        #[command(subcommand)]
        action: WorkoutCommand,
    },

    /// Queue an exercise change
    Exercise {
        #[command(subcommand)]
        action: ExerciseCommand,
    },

    /// Queue a raw mutation (payload is sanitized like any other)
    #[command(arg_required_else_help = true)]
    Enqueue {
        /// Operation (create_workout, update_exercise, ...)
        operation: String,

        /// Id of the record being mutated
        #[arg(value_parser = non_empty_string)]
        record_id: String,

        /// JSON object with the record fields
        #[arg(long, short)]
        data: Option<String>,
    },

    /// Show queue counters and connectivity
    Status {
        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// List queued mutations
    List {
        /// Only show mutations with this status (pending, syncing, completed, failed)
        #[arg(long, short)]
        status: Option<String>,

        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Sync queued mutations now (fails when offline)
    Sync {
        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Give failed mutations a fresh retry budget and sync them
    RetryFailed,

    /// Delete completed mutations past the retention window
    Sweep,

    /// Stay running, syncing whenever the remote becomes reachable
    Watch,
}

#[derive(Subcommand, Debug)]
pub enum WorkoutCommand {
    /// Queue creation of a workout
    Create {
        #[arg(value_parser = non_empty_string)]
        id: String,
        #[command(flatten)]
        fields: WorkoutArgs,
    },
    /// Queue changes to a workout
    Update {
        #[arg(value_parser = non_empty_string)]
        id: String,
        #[command(flatten)]
        fields: WorkoutArgs,
    },
    /// Queue deletion of a workout
    Delete {
        #[arg(value_parser = non_empty_string)]
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ExerciseCommand {
    /// Queue creation of an exercise
    Create {
        #[arg(value_parser = non_empty_string)]
        id: String,
        #[command(flatten)]
        fields: ExerciseArgs,
    },
    /// Queue changes to an exercise
    Update {
        #[arg(value_parser = non_empty_string)]
        id: String,
        #[command(flatten)]
        fields: ExerciseArgs,
    },
    /// Queue deletion of an exercise
    Delete {
        #[arg(value_parser = non_empty_string)]
        id: String,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
