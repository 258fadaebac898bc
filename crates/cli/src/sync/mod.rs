// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client side of remote sync.
//!
//! - [`transport`]: WebSocket plumbing behind a mockable trait
//! - [`remote`]: the remote apply implementation speaking the wire protocol
//! - [`probe`]: reachability checks feeding the connectivity monitor

pub mod probe;
pub mod remote;
pub mod transport;

pub use probe::{probe, probe_feed};
pub use remote::WebSocketRemote;
pub use transport::{Transport, TransportError, TransportResult, WebSocketTransport};
