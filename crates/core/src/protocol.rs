// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! WebSocket protocol messages for client-server communication.
//!
//! The protocol is request/response:
//! - Client sends `apply` requests, each tagged with a request id
//! - Server answers every request with `applied` or `rejected`

use serde::{Deserialize, Serialize};

use crate::entity::{EntityFields, Table};
use crate::error::Result;

/// What an apply request does to its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyAction {
    Insert,
    Update,
    Delete,
}

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Apply one mutation to a remote table.
    Apply {
        /// Client-chosen ID echoed in the response.
        request_id: u64,
        table: Table,
        action: ApplyAction,
        /// Row id being mutated.
        id: String,
        /// Record (insert) or patch (update). Absent for deletes.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fields: Option<serde_json::Value>,
    },

    /// Ping message for keepalive.
    Ping {
        /// Client-chosen ID echoed in Pong.
        id: u64,
    },
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The request was applied.
    Applied { request_id: u64 },

    /// The request was not applied.
    Rejected {
        request_id: u64,
        /// Human-readable reason.
        message: String,
        /// False when retrying the same request cannot succeed.
        retryable: bool,
    },

    /// Pong response to client Ping.
    Pong {
        /// Echoed from the Ping message.
        id: u64,
    },

    /// Error not tied to a request (e.g. unparsable message).
    Error {
        /// Human-readable error description.
        message: String,
    },
}

impl ClientMessage {
    /// Creates an insert request.
    pub fn insert(request_id: u64, table: Table, record: &EntityFields) -> Result<Self> {
        Ok(ClientMessage::Apply {
            request_id,
            table,
            action: ApplyAction::Insert,
            id: record.id().unwrap_or_default().to_string(),
            fields: Some(serde_json::to_value(record)?),
        })
    }

    /// Creates an update request.
    pub fn update(request_id: u64, table: Table, id: &str, patch: &EntityFields) -> Result<Self> {
        Ok(ClientMessage::Apply {
            request_id,
            table,
            action: ApplyAction::Update,
            id: id.to_string(),
            fields: Some(serde_json::to_value(patch)?),
        })
    }

    /// Creates a delete request.
    pub fn delete(request_id: u64, table: Table, id: &str) -> Self {
        ClientMessage::Apply {
            request_id,
            table,
            action: ApplyAction::Delete,
            id: id.to_string(),
            fields: None,
        }
    }

    /// Creates a Ping message.
    pub fn ping(id: u64) -> Self {
        ClientMessage::Ping { id }
    }

    /// Decodes the fields of an apply request as the table's entity kind.
    ///
    /// Returns `Ok(None)` for pings and for requests without fields.
    pub fn entity_fields(&self) -> Result<Option<EntityFields>> {
        match self {
            ClientMessage::Apply {
                table,
                fields: Some(fields),
                ..
            } => Ok(Some(EntityFields::from_value(table.kind(), fields.clone())?)),
            _ => Ok(None),
        }
    }

    /// Serializes the message to JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the message from JSON.
    pub fn from_json(s: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

impl ServerMessage {
    /// Creates an Applied message.
    pub fn applied(request_id: u64) -> Self {
        ServerMessage::Applied { request_id }
    }

    /// Creates a Rejected message.
    pub fn rejected(request_id: u64, message: impl Into<String>, retryable: bool) -> Self {
        ServerMessage::Rejected {
            request_id,
            message: message.into(),
            retryable,
        }
    }

    /// Creates a Pong message.
    pub fn pong(id: u64) -> Self {
        ServerMessage::Pong { id }
    }

    /// Creates an Error message.
    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }

    /// Returns the request id this message answers, if any.
    pub fn request_id(&self) -> Option<u64> {
        match self {
            ServerMessage::Applied { request_id } | ServerMessage::Rejected { request_id, .. } => {
                Some(*request_id)
            }
            ServerMessage::Pong { .. } | ServerMessage::Error { .. } => None,
        }
    }

    /// Serializes the message to JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the message from JSON.
    pub fn from_json(s: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
