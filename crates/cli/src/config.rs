// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project configuration management.
//!
//! Configuration is stored in `.liftlog/config.toml`:
//! - `[remote]`: WebSocket server to replay mutations against. Absent means
//!   local-only mode, where everything stays queued.
//! - `[sync]`: queue tuning (batch size, retry ceiling, retention, timeouts).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use liftlog_core::SyncConfig;

use crate::error::{Error, Result};

const WORK_DIR_NAME: &str = ".liftlog";
const CONFIG_FILE_NAME: &str = "config.toml";
const QUEUE_DB_FILE_NAME: &str = "queue.db";
const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Project configuration stored in `.liftlog/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Remote sync configuration (optional - if absent, runs in local-only mode).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteConfig>,
    #[serde(default)]
    pub sync: SyncSettings,
}

/// Remote server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// WebSocket URL (`ws://...` or `wss://...`).
    pub url: String,
    /// Max time for a reachability probe in milliseconds (default: 500).
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
    /// Seconds between reachability probes in `liftlog watch` (default: 5).
    #[serde(default = "default_probe_interval_secs")]
    pub probe_interval_secs: u64,
}

fn default_probe_timeout_ms() -> u64 {
    500
}

fn default_probe_interval_secs() -> u64 {
    5
}

impl RemoteConfig {
    pub fn new(url: impl Into<String>) -> Self {
        RemoteConfig {
            url: url.into(),
            probe_timeout_ms: default_probe_timeout_ms(),
            probe_interval_secs: default_probe_interval_secs(),
        }
    }

    /// Validates that the URL is a WebSocket URL.
    pub fn validate_url(&self) -> Result<()> {
        if self.url.starts_with("ws://") || self.url.starts_with("wss://") {
            Ok(())
        } else {
            Err(Error::InvalidRemoteUrl(self.url.clone()))
        }
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn probe_interval(&self) -> Duration {
        // A zero interval would spin.
        Duration::from_secs(self.probe_interval_secs.max(1))
    }
}

/// Queue tuning knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Maximum mutations applied per drain (default: 10).
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Failed attempts before a mutation is parked as failed (default: 3).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Hours completed mutations are kept before being swept (default: 24).
    #[serde(default = "default_retention_hours")]
    pub retention_hours: u32,
    /// Upper bound on a single remote apply in seconds (default: 30). 0 = no limit.
    #[serde(default = "default_apply_timeout_secs")]
    pub apply_timeout_secs: u64,
}

fn default_batch_size() -> usize {
    10
}

fn default_max_retries() -> u32 {
    3
}

fn default_retention_hours() -> u32 {
    24
}

fn default_apply_timeout_secs() -> u64 {
    30
}

impl Default for SyncSettings {
    fn default() -> Self {
        SyncSettings {
            batch_size: default_batch_size(),
            max_retries: default_max_retries(),
            retention_hours: default_retention_hours(),
            apply_timeout_secs: default_apply_timeout_secs(),
        }
    }
}

impl SyncSettings {
    /// Converts the file settings into the sync manager's configuration.
    pub fn to_sync_config(&self) -> SyncConfig {
        SyncConfig {
            batch_size: self.batch_size.max(1),
            max_retries: self.max_retries.max(1),
            retention: chrono::Duration::hours(i64::from(self.retention_hours)),
            apply_timeout: match self.apply_timeout_secs {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
        }
    }
}

impl Config {
    /// Creates a config, optionally pointing at a remote.
    pub fn new(remote: Option<String>) -> Result<Self> {
        let remote = remote.map(RemoteConfig::new);
        if let Some(r) = &remote {
            r.validate_url()?;
        }
        Ok(Config {
            remote,
            sync: SyncSettings::default(),
        })
    }

    /// Loads configuration from the given `.liftlog/` directory.
    pub fn load(work_dir: &Path) -> Result<Self> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = fs::read_to_string(&config_path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        if let Some(remote) = &config.remote {
            remote.validate_url()?;
        }
        Ok(config)
    }

    /// Saves configuration to the given `.liftlog/` directory.
    pub fn save(&self, work_dir: &Path) -> Result<()> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    /// Returns the remote URL if configured.
    pub fn remote_url(&self) -> Option<&str> {
        self.remote.as_ref().map(|r| r.url.as_str())
    }
}

/// Find the .liftlog directory by walking up from the current directory
pub fn find_work_dir() -> Result<PathBuf> {
    let mut current = std::env::current_dir()?;
    loop {
        let work_dir = current.join(WORK_DIR_NAME);
        if work_dir.is_dir() {
            return Ok(work_dir);
        }
        if !current.pop() {
            return Err(Error::NotInitialized);
        }
    }
}

/// Path of the durable mutation queue.
pub fn queue_db_path(work_dir: &Path) -> PathBuf {
    work_dir.join(QUEUE_DB_FILE_NAME)
}

/// Initialize a new .liftlog directory at the given path
pub fn init_work_dir(path: &Path, config: &Config) -> Result<PathBuf> {
    let work_dir = path.join(WORK_DIR_NAME);

    if work_dir.join(CONFIG_FILE_NAME).exists() {
        return Err(Error::AlreadyInitialized(work_dir.display().to_string()));
    }

    fs::create_dir_all(&work_dir)?;
    config.save(&work_dir)?;
    fs::write(
        work_dir.join(GITIGNORE_FILE_NAME),
        "# Local mutation queue\nqueue.db\nqueue.db-*\n",
    )?;

    Ok(work_dir)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
