// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    offline = { Error::Offline, "offline" },
    invalid_operation = { Error::InvalidOperation("explode".into()), "explode" },
    invalid_table = { Error::InvalidTable("users".into()), "users" },
    record_not_found = { Error::RecordNotFound(42), "42" },
    remote = { Error::Remote(RemoteError::permanent("name is required")), "name is required" },
)]
fn error_display_contains(err: Error, expected: &str) {
    assert!(err.to_string().contains(expected));
}

#[test]
fn error_from_io() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn error_from_json() {
    let json_err = serde_json::from_str::<()>("invalid").unwrap_err();
    let err: Error = json_err.into();
    assert!(matches!(err, Error::Json(_)));
}
