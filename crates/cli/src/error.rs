// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All possible errors that can occur in the liftlog CLI.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not initialized: run 'liftlog init' first")]
    NotInitialized,

    #[error("already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("invalid remote URL '{0}'\n  hint: remote URLs must start with ws:// or wss://")]
    InvalidRemoteUrl(String),

    #[error("invalid JSON payload: {0}\n  hint: --data expects a JSON object, e.g. '{{\"name\":\"Leg Day\"}}'")]
    InvalidPayload(String),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] liftlog_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for liftlog CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
