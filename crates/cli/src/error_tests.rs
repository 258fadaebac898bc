// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn not_initialized_points_at_init() {
    assert!(Error::NotInitialized.to_string().contains("liftlog init"));
}

#[test]
fn core_errors_display_unchanged() {
    let err: Error = liftlog_core::Error::Offline.into();
    assert_eq!(err.to_string(), liftlog_core::Error::Offline.to_string());
}

#[test]
fn invalid_payload_shows_example() {
    let msg = Error::InvalidPayload("expected value".to_string()).to_string();
    assert!(msg.starts_with("invalid JSON payload: expected value"));
    assert!(msg.contains(r#"{"name":"Leg Day"}"#));
}
