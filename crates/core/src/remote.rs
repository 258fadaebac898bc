// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote apply contract.
//!
//! The sync manager only needs a remote that can insert, update and delete
//! rows per table and can fail. How it does so (WebSocket, REST, ...) is up
//! to the implementation.

use std::future::Future;
use std::pin::Pin;

use crate::entity::{EntityFields, Table};

/// A failed remote apply.
///
/// `retryable` separates transient failures (network, timeouts, server
/// storage hiccups) from permanent rejections such as validation errors.
/// Permanent rejections skip the rest of the retry budget.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RemoteError {
    pub message: String,
    pub retryable: bool,
}

impl RemoteError {
    /// A failure worth retrying on the next drain.
    pub fn transient(message: impl Into<String>) -> Self {
        RemoteError {
            message: message.into(),
            retryable: true,
        }
    }

    /// A rejection that will not succeed on retry.
    pub fn permanent(message: impl Into<String>) -> Self {
        RemoteError {
            message: message.into(),
            retryable: false,
        }
    }
}

/// Result type for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Boxed future returned by [`RemoteApply`] methods.
pub type RemoteFuture<'a> = Pin<Box<dyn Future<Output = RemoteResult<()>> + Send + 'a>>;

/// Remote store that queued mutations are replayed against.
pub trait RemoteApply: Send + Sync {
    /// Insert a full record into `table`.
    fn insert(&self, table: Table, record: EntityFields) -> RemoteFuture<'_>;

    /// Overwrite the fields present in `patch` on row `id`.
    fn update(&self, table: Table, id: &str, patch: EntityFields) -> RemoteFuture<'_>;

    /// Delete row `id` from `table`.
    fn delete(&self, table: Table, id: &str) -> RemoteFuture<'_>;
}

impl<R: RemoteApply + ?Sized> RemoteApply for std::sync::Arc<R> {
    fn insert(&self, table: Table, record: EntityFields) -> RemoteFuture<'_> {
        (**self).insert(table, record)
    }

    fn update(&self, table: Table, id: &str, patch: EntityFields) -> RemoteFuture<'_> {
        (**self).update(table, id, patch)
    }

    fn delete(&self, table: Table, id: &str) -> RemoteFuture<'_> {
        (**self).delete(table, id)
    }
}
