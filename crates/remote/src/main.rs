// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! liftlog-remote: WebSocket server holding the canonical workout data.
//!
//! Clients replay their queued mutations here; each one is applied to the
//! `workouts` or `exercises` table and acknowledged individually.

mod server;
mod state;

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// liftlog-remote: sync server for liftlog clients
#[derive(Parser, Debug)]
#[command(name = "liftlog-remote")]
#[command(about = "WebSocket server applying queued liftlog mutations")]
struct Args {
    /// Address to bind the server to
    #[arg(short, long, default_value = "0.0.0.0:7891")]
    bind: SocketAddr,

    /// Directory for database storage
    #[arg(short, long, default_value = ".")]
    data: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // RUST_LOG wins over --verbose.
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting liftlog-remote server");
    info!("  Bind address: {}", args.bind);
    info!("  Data directory: {}", args.data.display());

    std::fs::create_dir_all(&args.data)?;
    let state = state::ServerState::new(&args.data)?;

    server::run(args.bind, state).await?;

    Ok(())
}
