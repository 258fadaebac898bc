// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Init command tests.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::common::*;
use yare::parameterized;

#[test]
fn creates_liftlog_directory() {
    let temp = TempDir::new().unwrap();

    liftlog()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized liftlog"))
        .stdout(predicate::str::contains("Remote: none"));

    assert!(temp.path().join(".liftlog").is_dir());
    assert!(temp.path().join(".liftlog/config.toml").exists());
    assert!(temp.path().join(".liftlog/queue.db").exists());
}

#[test]
fn fails_if_already_initialized() {
    let temp = init_temp();

    liftlog()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn path_option_initializes_elsewhere() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("nested");
    std::fs::create_dir(&target).unwrap();

    liftlog()
        .args(["init", "--path"])
        .arg(&target)
        .current_dir(temp.path())
        .assert()
        .success();

    assert!(target.join(".liftlog/config.toml").exists());
    assert!(!temp.path().join(".liftlog").exists());
}

#[test]
fn remote_url_is_written_to_config() {
    let temp = init_temp_with_remote("ws://127.0.0.1:7891");

    let config = std::fs::read_to_string(temp.path().join(".liftlog/config.toml")).unwrap();
    assert!(config.contains("url = \"ws://127.0.0.1:7891\""));
}

#[parameterized(
    http = { "http://example.com" },
    bare_host = { "example.com:7891" },
    empty = { "" },
)]
fn rejects_invalid_remote(url: &str) {
    let temp = TempDir::new().unwrap();

    liftlog()
        .args(["init", "--remote", url])
        .current_dir(temp.path())
        .assert()
        .failure();

    assert!(!temp.path().join(".liftlog").exists());
}

#[test]
fn creates_gitignore_for_queue_database() {
    let temp = init_temp();

    let gitignore = std::fs::read_to_string(temp.path().join(".liftlog/.gitignore")).unwrap();
    assert!(gitignore.contains("queue.db"));
}

#[test]
fn commands_fail_outside_initialized_directory() {
    let temp = TempDir::new().unwrap();

    liftlog()
        .arg("status")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("liftlog init"));
}
