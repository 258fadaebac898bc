// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box specs for the `liftlog` binary.
//!
//! The specs drive the built binary from `target/`, so run them as part of
//! the workspace: `cargo test --workspace`.
