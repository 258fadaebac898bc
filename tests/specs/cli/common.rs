// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test files,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::path::Path;

use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

pub fn liftlog() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("liftlog").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Helper to create an initialized temp directory with no remote (always offline)
pub fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    liftlog()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

/// Helper to create an initialized temp directory pointing at `url`
pub fn init_temp_with_remote(url: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    liftlog()
        .args(["init", "--remote", url])
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

/// Run `status -o json` and parse the result.
pub fn status_json(dir: &Path) -> serde_json::Value {
    let output = liftlog()
        .args(["status", "-o", "json"])
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(output.status.success(), "status failed: {:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

/// Run `list -o json` and return the queued mutations.
pub fn list_json(dir: &Path) -> Vec<serde_json::Value> {
    let output = liftlog()
        .args(["list", "-o", "json"])
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(output.status.success(), "list failed: {:?}", output);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    json["mutations"].as_array().cloned().unwrap_or_default()
}
