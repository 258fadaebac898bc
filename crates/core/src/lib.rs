// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! liftlog-core: offline-first mutation sync for workout data.
//!
//! Local workout and exercise changes are sanitized, queued durably in
//! SQLite and replayed in order against a remote store whenever the device
//! is online. Used by both the `liftlog` CLI and the `liftlog-remote` server.

pub mod clock;
pub mod connectivity;
pub mod entity;
pub mod error;
pub mod mutation;
pub mod protocol;
pub mod queue;
pub mod remote;
pub mod sanitize;
pub mod status;
pub mod sync;

pub use clock::{ClockSource, ManualClock, SystemClock};
pub use connectivity::ConnectivityMonitor;
pub use entity::{EntityFields, EntityKind, ExerciseFields, Table, WorkoutFields};
pub use error::{Error, Result};
pub use mutation::{Mutation, MutationRecord, MutationStatus, OperationType, Verb};
pub use protocol::{ApplyAction, ClientMessage, ServerMessage};
pub use queue::{QueueStore, StatusCounts};
pub use remote::{RemoteApply, RemoteError, RemoteFuture, RemoteResult};
pub use sanitize::sanitize;
pub use status::{QueueStatus, StatusNotifier, SyncEvent};
pub use sync::{DrainReport, SyncConfig, SyncManager};
