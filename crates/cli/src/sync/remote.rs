// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote apply over WebSocket.
//!
//! Each apply is one request/response exchange on a lazily opened
//! connection. Transport failures are reported as retryable; the server's
//! `rejected` replies carry their own retryability.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;

use liftlog_core::protocol::{ClientMessage, ServerMessage};
use liftlog_core::{EntityFields, RemoteApply, RemoteError, RemoteFuture, RemoteResult, Table};

use super::transport::{Transport, WebSocketTransport};

/// [`RemoteApply`] implementation talking to `liftlog-remote`.
pub struct WebSocketRemote<T = WebSocketTransport> {
    url: String,
    transport: Mutex<T>,
    next_request: AtomicU64,
}

impl WebSocketRemote<WebSocketTransport> {
    /// Create a remote for `url`. Nothing is opened until the first apply.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_transport(url, WebSocketTransport::new())
    }
}

impl<T: Transport> WebSocketRemote<T> {
    pub fn with_transport(url: impl Into<String>, transport: T) -> Self {
        WebSocketRemote {
            url: url.into(),
            transport: Mutex::new(transport),
            next_request: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn next_request_id(&self) -> u64 {
        self.next_request.fetch_add(1, Ordering::Relaxed)
    }

    /// Send one request and wait for its reply.
    async fn exchange(&self, request_id: u64, msg: ClientMessage) -> RemoteResult<()> {
        let mut transport = self.transport.lock().await;

        if !transport.is_connected() {
            transport
                .connect(&self.url)
                .await
                .map_err(|e| RemoteError::transient(e.to_string()))?;
        }

        if let Err(e) = transport.send(msg).await {
            transport.disconnect().await;
            return Err(RemoteError::transient(e.to_string()));
        }

        loop {
            match transport.recv().await {
                Ok(Some(ServerMessage::Applied { request_id: id })) if id == request_id => {
                    return Ok(());
                }
                Ok(Some(ServerMessage::Rejected {
                    request_id: id,
                    message,
                    retryable,
                })) if id == request_id => {
                    return Err(RemoteError { message, retryable });
                }
                Ok(Some(ServerMessage::Error { message })) => {
                    return Err(RemoteError::permanent(format!("server error: {message}")));
                }
                // Replies to requests abandoned by a timeout, or pongs.
                Ok(Some(other)) => {
                    tracing::debug!(?other, request_id, "ignoring unrelated message");
                }
                Ok(None) => {
                    return Err(RemoteError::transient("connection closed by remote"));
                }
                Err(e) => {
                    transport.disconnect().await;
                    return Err(RemoteError::transient(e.to_string()));
                }
            }
        }
    }
}

impl<T: Transport> RemoteApply for WebSocketRemote<T> {
    fn insert(&self, table: Table, record: EntityFields) -> RemoteFuture<'_> {
        let request_id = self.next_request_id();
        Box::pin(async move {
            let msg = ClientMessage::insert(request_id, table, &record)
                .map_err(|e| RemoteError::permanent(e.to_string()))?;
            self.exchange(request_id, msg).await
        })
    }

    fn update(&self, table: Table, id: &str, patch: EntityFields) -> RemoteFuture<'_> {
        let request_id = self.next_request_id();
        let id = id.to_string();
        Box::pin(async move {
            let msg = ClientMessage::update(request_id, table, &id, &patch)
                .map_err(|e| RemoteError::permanent(e.to_string()))?;
            self.exchange(request_id, msg).await
        })
    }

    fn delete(&self, table: Table, id: &str) -> RemoteFuture<'_> {
        let request_id = self.next_request_id();
        let msg = ClientMessage::delete(request_id, table, id);
        Box::pin(self.exchange(request_id, msg))
    }
}

#[cfg(test)]
#[path = "remote_tests.rs"]
mod tests;
