// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync command tests, offline and against an in-process remote.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::common::*;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::runtime::Runtime;
use tokio_tungstenite::tungstenite::Message;

/// A remote that acknowledges every apply request.
struct AcceptingRemote {
    runtime: Runtime,
    url: String,
}

impl AcceptingRemote {
    fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let listener = runtime.block_on(TcpListener::bind("127.0.0.1:0")).unwrap();
        let url = format!("ws://{}", listener.local_addr().unwrap());

        runtime.spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(async move {
                    // Reachability probes connect and hang up without a handshake.
                    let Ok(mut ws) = tokio_tungstenite::accept_async(stream).await else {
                        return;
                    };
                    while let Some(Ok(Message::Text(text))) = ws.next().await {
                        let request: serde_json::Value = serde_json::from_str(text.as_str()).unwrap();
                        let reply = match request["type"].as_str() {
                            Some("ping") => serde_json::json!({"type": "pong", "id": request["id"]}),
                            _ => serde_json::json!({
                                "type": "applied",
                                "request_id": request["request_id"],
                            }),
                        };
                        if ws.send(Message::Text(reply.to_string().into())).await.is_err() {
                            return;
                        }
                    }
                });
            }
        });

        AcceptingRemote { runtime, url }
    }
}

#[test]
fn sync_offline_fails() {
    let temp = init_temp();

    liftlog()
        .arg("sync")
        .current_dir(temp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("offline"));
}

#[test]
fn retry_failed_with_nothing_failed() {
    let temp = init_temp();

    liftlog()
        .arg("retry-failed")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Reset 0 failed change(s)"));
}

#[test]
fn sweep_keeps_recent_entries() {
    let temp = init_temp();
    liftlog()
        .args(["workout", "create", "w1", "--name", "Legs"])
        .current_dir(temp.path())
        .assert()
        .success();

    liftlog()
        .arg("sweep")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 0 completed change(s)"));

    assert_eq!(status_json(temp.path())["pending"], 1);
}

#[test]
fn online_mutation_syncs_immediately() {
    let remote = AcceptingRemote::start();
    let temp = init_temp_with_remote(&remote.url);

    liftlog()
        .args(["workout", "create", "w1", "--name", "Legs"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Queued create_workout w1"))
        .stdout(predicate::str::contains("Offline").not());

    let status = status_json(temp.path());
    assert_eq!(status["isOnline"], true);
    assert_eq!(status["pending"], 0);
    assert_eq!(status["completed"], 1);

    drop(remote.runtime);
}

#[test]
fn queued_changes_sync_once_remote_is_reachable() {
    let remote = AcceptingRemote::start();
    let temp = TempDir::new().unwrap();

    // Queue offline first, then point the project at the remote.
    liftlog()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .success();
    for id in ["w1", "w2", "w3"] {
        liftlog()
            .args(["workout", "create", id, "--name", "Legs"])
            .current_dir(temp.path())
            .assert()
            .success();
    }
    let config_path = temp.path().join(".liftlog/config.toml");
    let config = std::fs::read_to_string(&config_path).unwrap();
    std::fs::write(
        &config_path,
        format!("[remote]\nurl = \"{}\"\n\n{}", remote.url, config),
    )
    .unwrap();

    liftlog()
        .arg("sync")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Synced 3 of 3 queued change(s)"));

    liftlog()
        .arg("sync")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to sync"));

    drop(remote.runtime);
}
