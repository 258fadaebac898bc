// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! WebSocket server implementation.
//!
//! Each connection is served by its own task. Every `apply` request gets
//! exactly one `applied` or `rejected` reply carrying its request id.

use std::net::SocketAddr;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

use liftlog_core::protocol::{ClientMessage, ServerMessage};

use crate::state::ServerState;

/// Run the WebSocket server on the given address.
pub async fn run(addr: SocketAddr, state: ServerState) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on: {}", addr);
    serve(listener, state)
        .await
        .map_err(|e| e as Box<dyn std::error::Error>)?;
    Ok(())
}

/// Accept connections from an already bound listener.
pub(crate) async fn serve(
    listener: TcpListener,
    state: ServerState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    loop {
        let (stream, peer_addr) = listener.accept().await?;
        let state = state.clone();

        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer_addr, state).await {
                error!("Connection error from {}: {}", peer_addr, e);
            }
        });
    }
}

/// Handle a single WebSocket connection.
pub(crate) async fn handle_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: ServerState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut ws = tokio_tungstenite::accept_async(stream).await?;
    info!("New WebSocket connection from: {}", peer_addr);

    while let Some(msg) = ws.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                let response = handle_client_message(text.as_str(), &state).await;
                ws.send(Message::Text(response.to_json()?.into())).await?;
            }
            Ok(Message::Close(_)) => {
                info!("Client {} disconnected", peer_addr);
                return Ok(());
            }
            Ok(Message::Ping(data)) => {
                ws.send(Message::Pong(data)).await?;
            }
            Ok(_) => {}
            Err(e) => {
                error!("WebSocket error from {}: {}", peer_addr, e);
                return Ok(());
            }
        }
    }

    info!("Client {} stream ended", peer_addr);
    Ok(())
}

/// Process a client message and return the reply.
pub(crate) async fn handle_client_message(text: &str, state: &ServerState) -> ServerMessage {
    let msg = match ClientMessage::from_json(text) {
        Ok(msg) => msg,
        Err(e) => {
            warn!("Unparsable message: {}", e);
            return ServerMessage::error(format!("invalid message: {}", e));
        }
    };
    debug!("Received message: {:?}", msg);

    match msg {
        ClientMessage::Apply {
            request_id,
            table,
            action,
            id,
            fields,
        } => match state.apply(table, action, &id, fields).await {
            Ok(()) => {
                debug!(request_id, %table, ?action, %id, "applied");
                ServerMessage::applied(request_id)
            }
            Err(e) => {
                warn!(request_id, %table, ?action, %id, error = %e, "rejected");
                ServerMessage::rejected(request_id, e.to_string(), e.is_retryable())
            }
        },

        ClientMessage::Ping { id } => {
            debug!("Ping received: {}", id);
            ServerMessage::pong(id)
        }
    }
}
